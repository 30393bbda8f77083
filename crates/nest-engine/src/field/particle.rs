use glam::Vec2;

use crate::api::config::FieldConfig;
use crate::api::types::IdeaRecord;
use crate::core::rng::Rng;
use crate::field::attributes::{color_of, mass_of};
use crate::renderer::color::Color;

/// A simulated node bound one-to-one to an idea record.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Last projected render position (equals `base_position` without parallax).
    pub position: Vec2,
    /// Simulated position, integrated every tick.
    pub base_position: Vec2,
    /// Units per tick. Only boundary handling touches it, and only its signs.
    pub velocity: Vec2,
    /// Parallax weight in `[min_depth, max_depth]`.
    pub depth: f32,
    pub radius: f32,
    pub color: Color,
    /// Breathing phase in radians, kept in [0, 2π).
    pub phase: f32,
    record: IdeaRecord,
}

impl Particle {
    /// Seed a particle for `record` inside a `width` x `height` surface.
    pub fn seed(record: IdeaRecord, width: f32, height: f32, config: &FieldConfig, rng: &mut Rng) -> Self {
        let position = rng.point_in(width, height);
        let velocity = rng.velocity(config.motion.speed);
        let depth = rng.range(config.motion.min_depth, config.motion.max_depth);
        let phase = rng.range(0.0, std::f32::consts::TAU);
        Self::new(record, config)
            .with_position(position)
            .with_velocity(velocity)
            .with_depth(depth)
            .with_phase(phase)
    }

    /// A particle at the origin at rest, with attributes derived from `record`.
    pub fn new(record: IdeaRecord, config: &FieldConfig) -> Self {
        Self {
            position: Vec2::ZERO,
            base_position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            depth: config.motion.min_depth,
            radius: mass_of(&record, &config.mass),
            color: color_of(&record.title, &config.color),
            phase: 0.0,
            record,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self.base_position = pos;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_phase(mut self, phase: f32) -> Self {
        self.phase = phase.rem_euclid(std::f32::consts::TAU);
        self
    }

    /// The idea this particle stands for.
    pub fn record(&self) -> &IdeaRecord {
        &self.record
    }

    /// Whether the idea has any discussion ("active" ring).
    pub fn is_engaged(&self) -> bool {
        self.record.engagement_count > 0
    }

    /// Advance the breathing phase.
    pub fn advance_phase(&mut self, amount: f32) {
        self.phase = (self.phase + amount).rem_euclid(std::f32::consts::TAU);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_derived_once_from_record() {
        let config = FieldConfig::default();
        let record = IdeaRecord::new("1", "Night market").with_engagement(2);
        let p = Particle::new(record.clone(), &config);
        assert_eq!(p.radius, mass_of(&record, &config.mass));
        assert_eq!(p.color, color_of("Night market", &config.color));
        assert_eq!(p.record(), &record);
        assert!(p.is_engaged());
    }

    #[test]
    fn seeded_particle_within_ranges() {
        let config = FieldConfig::default();
        let mut rng = Rng::new(9);
        for i in 0..200 {
            let p = Particle::seed(IdeaRecord::new(i.to_string(), "t"), 320.0, 240.0, &config, &mut rng);
            assert!(p.base_position.x >= 0.0 && p.base_position.x < 320.0);
            assert!(p.base_position.y >= 0.0 && p.base_position.y < 240.0);
            assert!(p.depth >= config.motion.min_depth && p.depth <= config.motion.max_depth);
            assert!(p.velocity.x.abs() <= config.motion.speed);
            assert!(p.velocity.y.abs() <= config.motion.speed);
            assert_eq!(p.position, p.base_position);
        }
    }

    #[test]
    fn phase_stays_wrapped() {
        let mut p = Particle::new(IdeaRecord::default(), &FieldConfig::default());
        for _ in 0..1000 {
            p.advance_phase(0.5);
            assert!(p.phase >= 0.0 && p.phase < std::f32::consts::TAU);
        }
    }
}
