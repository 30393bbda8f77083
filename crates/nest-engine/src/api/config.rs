use serde::Deserialize;

use crate::api::error::ConfigError;
use crate::renderer::color::Color;

/// Configuration for the idea field, provided by the host.
///
/// Every field has a default, so a host config only lists what it changes:
///
/// ```ignore
/// let config = FieldConfig::from_json(r#"{ "edges": { "threshold": 120 } }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Ticks per second of the fixed simulation step (default: 60).
    pub tick_rate: f32,
    /// Maximum ticks run in a single frame after a stall (default: 10).
    pub max_catch_up_ticks: u32,
    /// Seed for initial positions, velocities, depths and dust.
    pub seed: u64,
    /// Background wash color (default: `#0A0E14`).
    pub background: Color,
    /// When set, the background is painted at this alpha instead of an
    /// opaque clear, leaving motion trails.
    pub trail_alpha: Option<f32>,
    /// Extra tolerance around a particle's radius for picking.
    pub pick_margin: f32,
    pub mass: MassConfig,
    pub color: ColorConfig,
    pub motion: MotionConfig,
    pub edges: EdgeConfig,
    pub parallax: ParallaxConfig,
    pub glow: GlowConfig,
    pub dust: DustConfig,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_catch_up_ticks: 10,
            seed: 0x5eed_1dea,
            background: Color::DEEP_SPACE,
            trail_alpha: None,
            pick_margin: 6.0,
            mass: MassConfig::default(),
            color: ColorConfig::default(),
            motion: MotionConfig::default(),
            edges: EdgeConfig::default(),
            parallax: ParallaxConfig::default(),
            glow: GlowConfig::default(),
            dust: DustConfig::default(),
        }
    }
}

impl FieldConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the field cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        let m = &self.mass;
        if !(m.min_radius <= m.base_radius && m.base_radius <= m.max_radius) {
            return invalid("mass radii must satisfy min_radius <= base_radius <= max_radius");
        }
        if m.min_radius < 0.0 || m.length_divisor <= 0.0 || m.per_engagement < 0.0 || m.length_bonus_cap < 0.0 {
            return invalid("mass bonuses must be non-negative and length_divisor positive");
        }
        if self.motion.min_depth > self.motion.max_depth || self.motion.min_depth < 0.0 {
            return invalid("motion depth range must be ordered and non-negative");
        }
        if self.motion.speed < 0.0 {
            return invalid("motion.speed must be non-negative");
        }
        if let BoundaryPolicy::Wrap { margin } = self.motion.boundary {
            if margin < 0.0 {
                return invalid("wrap margin must be non-negative");
            }
        }
        if self.edges.threshold <= 0.0 {
            return invalid("edges.threshold must be positive");
        }
        if self.tick_rate <= 0.0 || self.max_catch_up_ticks == 0 {
            return invalid("tick_rate and max_catch_up_ticks must be positive");
        }
        if let Some(a) = self.trail_alpha {
            if !(a > 0.0 && a <= 1.0) {
                return invalid("trail_alpha must be in (0, 1]");
            }
        }
        if !(0.0..1.0).contains(&self.parallax.smoothing) {
            return invalid("parallax.smoothing must be in [0, 1)");
        }
        if self.pick_margin < 0.0 {
            return invalid("pick_margin must be non-negative");
        }
        Ok(())
    }

    /// Fixed simulation step in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

/// Radius ("mass") derivation constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MassConfig {
    pub base_radius: f32,
    /// Radius added per engagement (comment/discussion).
    pub per_engagement: f32,
    /// Description characters per unit of content bonus.
    pub length_divisor: f32,
    pub length_bonus_cap: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for MassConfig {
    fn default() -> Self {
        Self {
            base_radius: 4.0,
            per_engagement: 1.5,
            length_divisor: 50.0,
            length_bonus_cap: 4.0,
            min_radius: 2.0,
            max_radius: 18.0,
        }
    }
}

/// Fixed saturation/lightness for title-derived colors (0.0 - 1.0).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub saturation: f32,
    pub lightness: f32,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            saturation: 0.8,
            lightness: 0.7,
        }
    }
}

/// What happens when a particle reaches the surface edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Invert the velocity component, keeping particles inside `[0, dim]`.
    #[default]
    Reflect,
    /// Teleport to the opposite edge once `margin` units outside.
    Wrap { margin: f32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Maximum per-axis speed in units per tick.
    pub speed: f32,
    pub min_depth: f32,
    pub max_depth: f32,
    /// Breathing phase advance in radians per tick.
    pub phase_speed: f32,
    pub boundary: BoundaryPolicy,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 0.25,
            min_depth: 0.2,
            max_depth: 1.0,
            phase_speed: 0.04,
            boundary: BoundaryPolicy::Reflect,
        }
    }
}

/// Proximity edge constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    /// Pairs closer than this are connected.
    pub threshold: f32,
    /// Opacity of an edge between coincident particles.
    pub max_opacity: f32,
    pub line_width: f32,
    pub color: Color,
    /// Particle count above which the spatial grid replaces the pairwise scan.
    pub grid_above: usize,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            threshold: 150.0,
            max_opacity: 0.35,
            line_width: 0.8,
            color: Color::CYBER_CYAN,
            grid_above: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub enabled: bool,
    /// Offset in surface units at a normalized pointer coordinate of 1.
    pub magnitude: f32,
    /// 0 = snap to the pointer each frame, closer to 1 = slower easing.
    pub smoothing: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            magnitude: 30.0,
            smoothing: 0.0,
        }
    }
}

/// Glow halo and "active" ring constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    pub base_blur: f32,
    pub per_engagement: f32,
    pub max_blur: f32,
    /// Fraction of the glow that pulses with the particle phase (0 = steady).
    pub breath: f32,
    /// Gap between the body and the ring drawn around engaged particles.
    pub ring_offset: f32,
    pub ring_width: f32,
    pub ring_alpha: f32,
    pub selection_color: Color,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            base_blur: 4.0,
            per_engagement: 2.0,
            max_blur: 30.0,
            breath: 0.3,
            ring_offset: 4.0,
            ring_width: 1.0,
            ring_alpha: 0.45,
            selection_color: Color::WHITE,
        }
    }
}

/// Ambient dust motes drawn behind the ideas.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DustConfig {
    pub count: usize,
    pub color: Color,
    /// Maximum per-axis speed in units per tick.
    pub speed: f32,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            count: 0,
            color: Color::CYBER_CYAN,
            speed: 0.25,
        }
    }
}
