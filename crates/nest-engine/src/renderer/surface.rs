//! Render surface contract.
//!
//! The engine never touches a graphics API directly. A host backend
//! (Canvas2D in the browser, a native rasterizer, or the recording
//! [`DrawList`](super::draw_list::DrawList)) implements this trait and the
//! render pipeline drives it once per frame.

use glam::Vec2;

use super::color::Color;
use crate::api::error::SurfaceError;

/// Blur halo applied to subsequent fills until reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in surface units.
    pub blur: f32,
    pub color: Color,
}

/// Drawing primitives the render pipeline needs.
///
/// # Example Implementation
///
/// ```ignore
/// struct CanvasSurface {
///     ctx: web_sys::CanvasRenderingContext2d,
///     width: f32,
///     height: f32,
/// }
///
/// impl RenderSurface for CanvasSurface {
///     fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), SurfaceError> {
///         self.ctx.begin_path();
///         self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, std::f64::consts::TAU)
///             .map_err(|e| SurfaceError::Lost(format!("{e:?}")))?;
///         // ...
///     }
///     // ...
/// }
/// ```
pub trait RenderSurface {
    fn width(&self) -> f32;

    fn height(&self) -> f32;

    /// Resize the backing store (e.g. on window resize).
    fn resize(&mut self, width: f32, height: f32);

    /// Paint the whole surface with `color`.
    fn clear(&mut self, color: Color) -> Result<(), SurfaceError>;

    /// Fill an axis-aligned rectangle (alpha-blended).
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) -> Result<(), SurfaceError>;

    /// Filled circle, using the current glow if any.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), SurfaceError>;

    /// Unfilled circle outline.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) -> Result<(), SurfaceError>;

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, width: f32) -> Result<(), SurfaceError>;

    /// Set (`Some`) or reset (`None`) the glow applied to later fills.
    fn set_glow(&mut self, glow: Option<Glow>) -> Result<(), SurfaceError>;
}
