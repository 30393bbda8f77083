use glam::Vec2;

use crate::api::config::{BoundaryPolicy, FieldConfig};
use crate::api::error::FieldError;
use crate::api::types::IdeaRecord;
use crate::core::rng::Rng;
use crate::field::dust::{self, Mote};
use crate::field::particle::Particle;
use crate::view::parallax::Parallax;

/// Live simulation state for one data snapshot.
///
/// Owned by the animation driver and passed explicitly into tick, render and
/// pick. The particle set is fixed for the life of the snapshot; a refresh
/// builds a new `FieldState`.
#[derive(Debug, Clone)]
pub struct FieldState {
    particles: Vec<Particle>,
    motes: Vec<Mote>,
    bounds: Vec2,
    policy: BoundaryPolicy,
    phase_speed: f32,
}

impl FieldState {
    /// Seed one particle per record at random positions inside the surface.
    pub fn initialize(
        records: Vec<IdeaRecord>,
        width: f32,
        height: f32,
        config: &FieldConfig,
        rng: &mut Rng,
    ) -> Result<Self, FieldError> {
        FieldError::check_surface(width, height)?;

        let particles = records
            .into_iter()
            .map(|record| Particle::seed(record, width, height, config, rng))
            .collect();
        let motes = dust::scatter(width, height, &config.dust, rng);

        Ok(Self {
            particles,
            motes,
            bounds: Vec2::new(width, height),
            policy: config.motion.boundary,
            phase_speed: config.motion.phase_speed,
        })
    }

    /// Build a field from already-placed particles (no random seeding).
    pub fn from_particles(
        particles: Vec<Particle>,
        width: f32,
        height: f32,
        config: &FieldConfig,
    ) -> Result<Self, FieldError> {
        FieldError::check_surface(width, height)?;
        Ok(Self {
            particles,
            motes: Vec::new(),
            bounds: Vec2::new(width, height),
            policy: config.motion.boundary,
            phase_speed: config.motion.phase_speed,
        })
    }

    /// Advance every particle and mote by `dt_scale` ticks.
    pub fn tick(&mut self, dt_scale: f32) -> Result<(), FieldError> {
        for (index, p) in self.particles.iter_mut().enumerate() {
            let step = p.velocity * dt_scale;
            p.base_position += step;
            confine(&mut p.base_position, &mut p.velocity, step, self.bounds, self.policy);
            if !p.base_position.is_finite() {
                return Err(FieldError::Diverged { index });
            }
            p.advance_phase(self.phase_speed * dt_scale);
        }
        for mote in self.motes.iter_mut() {
            mote.tick(dt_scale, self.bounds, self.policy);
        }
        Ok(())
    }

    /// Change the bounds used by boundary handling. Particles are not moved;
    /// any left outside drift back in.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), FieldError> {
        FieldError::check_surface(width, height)?;
        self.bounds = Vec2::new(width, height);
        Ok(())
    }

    /// Refresh every particle's render position from the projector.
    pub fn project(&mut self, parallax: &Parallax) {
        for p in self.particles.iter_mut() {
            p.position = parallax.project(p);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f32 {
        self.bounds.x
    }

    pub fn height(&self) -> f32 {
        self.bounds.y
    }
}

/// Apply the boundary policy after a move of `step`.
pub(crate) fn confine(pos: &mut Vec2, vel: &mut Vec2, step: Vec2, bounds: Vec2, policy: BoundaryPolicy) {
    match policy {
        BoundaryPolicy::Reflect => {
            reflect_axis(&mut pos.x, &mut vel.x, step.x, bounds.x);
            reflect_axis(&mut pos.y, &mut vel.y, step.y, bounds.y);
        }
        BoundaryPolicy::Wrap { margin } => {
            wrap_axis(&mut pos.x, bounds.x, margin);
            wrap_axis(&mut pos.y, bounds.y, margin);
        }
    }
}

fn reflect_axis(p: &mut f32, v: &mut f32, step: f32, max: f32) {
    // An overshoot larger than this tick's step means the particle was
    // already outside (bounds shrank): only turn it around.
    if *p < 0.0 {
        *v = v.abs();
        let overshoot = -*p;
        if overshoot <= step.abs() {
            *p = overshoot.min(max);
        }
    } else if *p > max {
        *v = -v.abs();
        let overshoot = *p - max;
        if overshoot <= step.abs() {
            *p = (max - overshoot).max(0.0);
        }
    }
}

fn wrap_axis(p: &mut f32, max: f32, margin: f32) {
    if *p < -margin {
        *p = max + margin;
    } else if *p > max + margin {
        *p = -margin;
    }
}
