//! Recording render surface.
//!
//! Captures every surface call as a fixed-size command so the host can replay
//! the frame on its own canvas. Wire format (12 floats / 48 bytes):
//!
//! ```text
//! [op, x0, y0, x1, y1, size, r, g, b, a, glow, reserved]
//! ```
//!
//! | op | command       | x0,y0   | x1,y1       | size        |
//! |----|---------------|---------|-------------|-------------|
//! | 1  | clear         | -       | -           | -           |
//! | 2  | fill rect     | min     | rect size   | -           |
//! | 3  | fill circle   | center  | -           | radius      |
//! | 4  | stroke circle | center  | line width  | radius      |
//! | 5  | line          | start   | end         | line width  |
//! | 6  | set glow      | -       | -           | blur (0 = reset) |
//!
//! `glow` carries the active glow blur on fill-circle commands.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::color::Color;
use super::surface::{Glow, RenderSurface};
use crate::api::error::SurfaceError;

/// Commands reserved up front; the list grows past this as needed.
const INITIAL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DrawOp {
    Clear = 1,
    FillRect = 2,
    FillCircle = 3,
    StrokeCircle = 4,
    Line = 5,
    SetGlow = 6,
}

impl DrawOp {
    pub fn from_f32(v: f32) -> Option<Self> {
        Some(match v as u8 {
            1 => DrawOp::Clear,
            2 => DrawOp::FillRect,
            3 => DrawOp::FillCircle,
            4 => DrawOp::StrokeCircle,
            5 => DrawOp::Line,
            6 => DrawOp::SetGlow,
            _ => return None,
        })
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawCommand {
    pub op: f32,
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
    pub glow: f32,
    pub reserved: f32,
}

impl DrawCommand {
    /// Number of floats per command.
    pub const FLOATS: usize = 12;

    fn new(op: DrawOp, p0: Vec2, p1: Vec2, size: f32, color: Color) -> Self {
        Self {
            op: op as u8 as f32,
            x0: p0.x,
            y0: p0.y,
            x1: p1.x,
            y1: p1.y,
            size,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
            glow: 0.0,
            reserved: 0.0,
        }
    }

    pub fn kind(&self) -> Option<DrawOp> {
        DrawOp::from_f32(self.op)
    }

    pub fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b, self.a)
    }
}

/// A [`RenderSurface`] that records commands instead of drawing.
#[derive(Debug, Clone)]
pub struct DrawList {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    /// Hard limit on commands per frame; `None` grows without bound.
    max_commands: Option<usize>,
    glow: Option<Glow>,
}

impl DrawList {
    /// A list that grows to fit any frame (edge count is quadratic in the
    /// particle count, so no fixed size is safe).
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(INITIAL_CAPACITY),
            max_commands: None,
            glow: None,
        }
    }

    /// A list that rejects commands past `max_commands`, for hosts with a
    /// fixed-size shared buffer.
    pub fn with_limit(width: f32, height: f32, max_commands: usize) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(max_commands.min(INITIAL_CAPACITY)),
            max_commands: Some(max_commands),
            glow: None,
        }
    }

    /// Drop last frame's commands. Glow state is reset too.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.glow = None;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands that put pixels on the surface (everything but glow state).
    pub fn draw_call_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| c.kind() != Some(DrawOp::SetGlow))
            .count()
    }

    pub fn count_of(&self, op: DrawOp) -> usize {
        self.commands.iter().filter(|c| c.kind() == Some(op)).count()
    }

    /// The active glow (None once every glow has been reset).
    pub fn current_glow(&self) -> Option<Glow> {
        self.glow
    }

    /// Flat float view of the commands for the host.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.commands)
    }

    /// Raw pointer to the command floats (for zero-copy reads from WASM memory).
    pub fn as_ptr(&self) -> *const f32 {
        self.commands.as_ptr() as *const f32
    }

    fn push(&mut self, command: DrawCommand) -> Result<(), SurfaceError> {
        if let Some(max) = self.max_commands {
            if self.commands.len() >= max {
                return Err(SurfaceError::Rejected(format!("draw list full ({max} commands)")));
            }
        }
        self.commands.push(command);
        Ok(())
    }
}

impl RenderSurface for DrawList {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self, color: Color) -> Result<(), SurfaceError> {
        self.push(DrawCommand::new(DrawOp::Clear, Vec2::ZERO, Vec2::ZERO, 0.0, color))
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) -> Result<(), SurfaceError> {
        self.push(DrawCommand::new(DrawOp::FillRect, min, size, 0.0, color))
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) -> Result<(), SurfaceError> {
        let mut cmd = DrawCommand::new(DrawOp::FillCircle, center, Vec2::ZERO, radius, color);
        cmd.glow = self.glow.map_or(0.0, |g| g.blur);
        self.push(cmd)
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) -> Result<(), SurfaceError> {
        self.push(DrawCommand::new(DrawOp::StrokeCircle, center, Vec2::new(width, 0.0), radius, color))
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, width: f32) -> Result<(), SurfaceError> {
        self.push(DrawCommand::new(DrawOp::Line, a, b, width, color))
    }

    fn set_glow(&mut self, glow: Option<Glow>) -> Result<(), SurfaceError> {
        let (blur, color) = glow.map_or((0.0, Color::TRANSPARENT), |g| (g.blur, g.color));
        self.push(DrawCommand::new(DrawOp::SetGlow, Vec2::ZERO, Vec2::ZERO, blur, color))?;
        self.glow = glow;
        Ok(())
    }
}
