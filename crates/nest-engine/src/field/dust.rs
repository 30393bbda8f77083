//! Ambient dust: small drifting motes behind the ideas.
//! Decorative only; motes are never picked and never connected.

use glam::Vec2;

use crate::api::config::{BoundaryPolicy, DustConfig};
use crate::core::rng::Rng;
use crate::field::state::confine;

#[derive(Debug, Clone, PartialEq)]
pub struct Mote {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radius in [1, 3).
    pub size: f32,
    /// Opacity in [0, 1).
    pub opacity: f32,
}

impl Mote {
    pub fn seed(width: f32, height: f32, config: &DustConfig, rng: &mut Rng) -> Self {
        Self {
            position: rng.point_in(width, height),
            velocity: rng.velocity(config.speed),
            size: rng.range(1.0, 3.0),
            opacity: rng.next_f32(),
        }
    }

    pub fn tick(&mut self, dt_scale: f32, bounds: Vec2, policy: BoundaryPolicy) {
        let step = self.velocity * dt_scale;
        self.position += step;
        confine(&mut self.position, &mut self.velocity, step, bounds, policy);
    }
}

/// Seed `config.count` motes.
pub fn scatter(width: f32, height: f32, config: &DustConfig, rng: &mut Rng) -> Vec<Mote> {
    (0..config.count).map(|_| Mote::seed(width, height, config, rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scatter_respects_count_and_ranges() {
        let config = DustConfig { count: 150, ..DustConfig::default() };
        let motes = scatter(400.0, 300.0, &config, &mut Rng::new(3));
        assert_eq!(motes.len(), 150);
        for m in &motes {
            assert!(m.size >= 1.0 && m.size < 3.0);
            assert!(m.opacity >= 0.0 && m.opacity < 1.0);
        }
    }

    #[test]
    fn motes_bounce_inside() {
        let config = DustConfig { count: 50, speed: 3.0, ..DustConfig::default() };
        let mut motes = scatter(100.0, 80.0, &config, &mut Rng::new(11));
        let bounds = Vec2::new(100.0, 80.0);
        for _ in 0..500 {
            for m in motes.iter_mut() {
                m.tick(1.0, bounds, BoundaryPolicy::Reflect);
                assert!(m.position.x >= 0.0 && m.position.x <= 100.0);
                assert!(m.position.y >= 0.0 && m.position.y <= 80.0);
            }
        }
    }
}
