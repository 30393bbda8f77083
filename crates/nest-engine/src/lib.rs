pub mod api;
pub mod core;
pub mod field;
pub mod graph;
pub mod view;
pub mod renderer;
pub mod input;
pub mod driver;

// Re-export key types at crate root for convenience
pub use api::config::{
    BoundaryPolicy, ColorConfig, DustConfig, EdgeConfig, FieldConfig, GlowConfig, MassConfig,
    MotionConfig, ParallaxConfig,
};
pub use api::error::{ConfigError, DataSourceError, FieldError, SurfaceError};
pub use api::source::{DataSource, JsonSource, StaticSource};
pub use api::types::{FieldEvent, IdeaRecord, Selection};
pub use core::rng::Rng;
pub use core::time::TickClock;
pub use field::attributes::{color_of, glow_of, mass_of, title_hash, title_hue};
pub use field::dust::Mote;
pub use field::particle::Particle;
pub use field::state::FieldState;
pub use graph::proximity::{compute_edges, Edge, ProximityGraph};
pub use view::parallax::Parallax;
pub use view::picker::pick;
pub use renderer::{Color, DrawCommand, DrawList, DrawOp, FrameStats, Glow, RenderPipeline, RenderSurface};
pub use input::queue::{InputEvent, InputQueue};
pub use driver::animation::{AnimationDriver, DriverState, FrameOutcome};
