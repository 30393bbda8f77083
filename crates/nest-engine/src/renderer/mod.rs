pub mod color;
pub mod draw_list;
pub mod pipeline;
pub mod surface;

// Re-export key types for convenient access
pub use color::Color;
pub use draw_list::{DrawCommand, DrawList, DrawOp};
pub use pipeline::{FrameStats, RenderPipeline};
pub use surface::{Glow, RenderSurface};
