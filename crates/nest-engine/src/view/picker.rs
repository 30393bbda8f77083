use glam::Vec2;

use crate::field::particle::Particle;
use crate::view::parallax::Parallax;

/// Index of the particle whose silhouette (radius + `margin`) contains the
/// pointer, or `None` on a miss.
///
/// When several particles qualify the first one in iteration order wins;
/// there is no nearest-first ranking.
pub fn pick(pointer: Vec2, particles: &[Particle], parallax: &Parallax, margin: f32) -> Option<usize> {
    particles
        .iter()
        .position(|p| parallax.project(p).distance(pointer) < p.radius + margin)
}
