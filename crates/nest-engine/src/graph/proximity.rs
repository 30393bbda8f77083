//! Proximity edges between particles, recomputed every frame.

use glam::Vec2;

use crate::api::config::EdgeConfig;
use crate::field::particle::Particle;
use crate::graph::grid::SpatialGrid;

/// A transient connective line between particles `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    /// Linear falloff: `max_opacity` at coincidence, 0 at the threshold.
    pub opacity: f32,
}

/// Opacity for a pair at `distance`, or `None` when not connected.
#[inline]
pub fn edge_opacity(distance: f32, threshold: f32, max_opacity: f32) -> Option<f32> {
    if distance < threshold {
        Some((1.0 - distance / threshold) * max_opacity)
    } else {
        None
    }
}

/// Every unordered pair closer than `threshold`. O(n²).
pub fn compute_edges(positions: &[Vec2], threshold: f32, max_opacity: f32) -> Vec<Edge> {
    let mut edges = Vec::new();
    compute_edges_into(positions, threshold, max_opacity, &mut edges);
    edges
}

/// As [`compute_edges`], reusing `out`. Edges come out ordered by `(a, b)`.
pub fn compute_edges_into(positions: &[Vec2], threshold: f32, max_opacity: f32, out: &mut Vec<Edge>) {
    out.clear();
    for (a, pa) in positions.iter().enumerate() {
        for (offset, pb) in positions[a + 1..].iter().enumerate() {
            if let Some(opacity) = edge_opacity(pa.distance(*pb), threshold, max_opacity) {
                out.push(Edge { a, b: a + 1 + offset, opacity });
            }
        }
    }
}

/// Per-frame edge builder that keeps its buffers between frames.
///
/// Uses the pairwise scan for small fields and a uniform grid above
/// `grid_above` particles; both produce the same edges in the same order.
#[derive(Debug, Clone)]
pub struct ProximityGraph {
    threshold: f32,
    max_opacity: f32,
    grid_above: usize,
    positions: Vec<Vec2>,
    edges: Vec<Edge>,
    grid: SpatialGrid,
}

impl ProximityGraph {
    pub fn new(config: &EdgeConfig) -> Self {
        Self {
            threshold: config.threshold,
            max_opacity: config.max_opacity,
            grid_above: config.grid_above,
            positions: Vec::new(),
            edges: Vec::new(),
            grid: SpatialGrid::new(config.threshold),
        }
    }

    /// Recompute edges from the particles' current render positions.
    pub fn rebuild(&mut self, particles: &[Particle]) -> &[Edge] {
        self.positions.clear();
        self.positions.extend(particles.iter().map(|p| p.position));

        if self.positions.len() > self.grid_above {
            self.grid.edges_into(&self.positions, self.max_opacity, &mut self.edges);
        } else {
            compute_edges_into(&self.positions, self.threshold, self.max_opacity, &mut self.edges);
        }
        &self.edges
    }
}
