//! Pointer-driven parallax.
//!
//! Each particle is displaced against the pointer offset in proportion to its
//! depth weight: `render = base - offset * depth`. Depth is a weighting
//! scalar, not a z coordinate.

use glam::Vec2;

use crate::api::config::ParallaxConfig;
use crate::field::particle::Particle;

#[derive(Debug, Clone)]
pub struct Parallax {
    enabled: bool,
    magnitude: f32,
    smoothing: f32,
    /// Normalized pointer in [-1, 1]².
    target: Vec2,
    /// Current offset in surface units.
    offset: Vec2,
}

impl Parallax {
    pub fn new(config: &ParallaxConfig) -> Self {
        Self {
            enabled: config.enabled,
            magnitude: config.magnitude,
            smoothing: config.smoothing,
            target: Vec2::ZERO,
            offset: Vec2::ZERO,
        }
    }

    /// A projector that returns base positions unchanged.
    pub fn disabled() -> Self {
        Self::new(&ParallaxConfig {
            enabled: false,
            ..ParallaxConfig::default()
        })
    }

    /// Map a pixel coordinate to [-1, 1]² with (0, 0) at the surface center.
    pub fn normalize(pointer: Vec2, width: f32, height: f32) -> Vec2 {
        if width <= 0.0 || height <= 0.0 {
            return Vec2::ZERO;
        }
        let n = Vec2::new(pointer.x / width, pointer.y / height) * 2.0 - Vec2::ONE;
        n.clamp(Vec2::NEG_ONE, Vec2::ONE)
    }

    /// Offset in surface units for a normalized pointer coordinate.
    pub fn pointer_offset(&self, normalized: Vec2) -> Vec2 {
        normalized.clamp(Vec2::NEG_ONE, Vec2::ONE) * self.magnitude
    }

    /// Point the parallax at a normalized pointer coordinate.
    pub fn set_pointer(&mut self, normalized: Vec2) {
        if normalized.is_finite() {
            self.target = normalized.clamp(Vec2::NEG_ONE, Vec2::ONE);
        }
    }

    /// Pointer left the surface: ease back to center.
    pub fn reset_pointer(&mut self) {
        self.target = Vec2::ZERO;
    }

    /// Move the current offset toward the target. Call once per frame.
    pub fn update(&mut self) {
        let goal = self.pointer_offset(self.target);
        if self.smoothing <= 0.0 {
            self.offset = goal;
        } else {
            self.offset += (goal - self.offset) * (1.0 - self.smoothing);
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Render position of a particle under the current offset.
    pub fn project(&self, particle: &Particle) -> Vec2 {
        if self.enabled {
            project_at(particle.base_position, particle.depth, self.offset)
        } else {
            particle.base_position
        }
    }
}

/// `base - offset * depth`.
#[inline]
pub fn project_at(base: Vec2, depth: f32, offset: Vec2) -> Vec2 {
    base - offset * depth
}
