//! Uniform spatial grid for neighbor queries within a fixed radius.
//!
//! Cell size equals the query radius, so every neighbor of a point lives in
//! the 3x3 block of cells around it.

use glam::Vec2;

use crate::graph::proximity::{compute_edges_into, edge_opacity, Edge};

/// Upper bound on cells per point before falling back to the pairwise scan
/// (a few far-flung points would otherwise allocate a huge sparse grid).
const MAX_CELLS_PER_POINT: usize = 16;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    origin: Vec2,
    /// Start offset of each cell's run in `entries` (cols * rows + 1 long).
    starts: Vec<usize>,
    /// Point indices sorted by cell.
    entries: Vec<usize>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cols: 0,
            rows: 0,
            origin: Vec2::ZERO,
            starts: Vec::new(),
            entries: Vec::new(),
        }
    }

    fn cell_of(&self, p: Vec2) -> (usize, usize) {
        let rel = (p - self.origin) / self.cell_size;
        let col = (rel.x.max(0.0) as usize).min(self.cols - 1);
        let row = (rel.y.max(0.0) as usize).min(self.rows - 1);
        (col, row)
    }

    /// Bucket `positions` into cells (counting sort). Returns false when the
    /// grid would be too sparse to be worth it.
    pub fn build(&mut self, positions: &[Vec2]) -> bool {
        if positions.is_empty() || !(self.cell_size > 0.0) {
            return false;
        }
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for p in positions {
            if !p.is_finite() {
                return false;
            }
            min = min.min(*p);
            max = max.max(*p);
        }

        let span = (max - min) / self.cell_size;
        let cols = span.x as usize + 1;
        let rows = span.y as usize + 1;
        match cols.checked_mul(rows) {
            Some(cells) if cells <= positions.len().saturating_mul(MAX_CELLS_PER_POINT).max(64) => {}
            _ => return false,
        }

        self.cols = cols;
        self.rows = rows;
        self.origin = min;

        let cell_count = cols * rows;
        self.starts.clear();
        self.starts.resize(cell_count + 1, 0);
        for p in positions {
            let (c, r) = self.cell_of(*p);
            self.starts[r * cols + c + 1] += 1;
        }
        for i in 0..cell_count {
            self.starts[i + 1] += self.starts[i];
        }

        self.entries.clear();
        self.entries.resize(positions.len(), 0);
        let mut cursor = self.starts.clone();
        for (i, p) in positions.iter().enumerate() {
            let (c, r) = self.cell_of(*p);
            let slot = &mut cursor[r * cols + c];
            self.entries[*slot] = i;
            *slot += 1;
        }
        true
    }

    /// Point indices in cell `(col, row)`.
    fn cell(&self, col: usize, row: usize) -> &[usize] {
        let idx = row * self.cols + col;
        &self.entries[self.starts[idx]..self.starts[idx + 1]]
    }

    /// All pairs closer than the cell size, ordered by `(a, b)`.
    pub fn edges_into(&mut self, positions: &[Vec2], max_opacity: f32, out: &mut Vec<Edge>) {
        let threshold = self.cell_size;
        if !self.build(positions) {
            compute_edges_into(positions, threshold, max_opacity, out);
            return;
        }

        out.clear();
        for (a, pa) in positions.iter().enumerate() {
            let (col, row) = self.cell_of(*pa);
            for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                    for &b in self.cell(c, r) {
                        if b <= a {
                            continue;
                        }
                        if let Some(opacity) = edge_opacity(pa.distance(positions[b]), threshold, max_opacity) {
                            out.push(Edge { a, b, opacity });
                        }
                    }
                }
            }
        }
        out.sort_unstable_by_key(|e| (e.a, e.b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::Rng;
    use crate::graph::proximity::compute_edges;

    #[test]
    fn matches_pairwise_scan() {
        let mut rng = Rng::new(99);
        let positions: Vec<Vec2> = (0..300).map(|_| rng.point_in(1000.0, 700.0)).collect();
        let mut grid = SpatialGrid::new(80.0);
        let mut out = Vec::new();
        grid.edges_into(&positions, 0.5, &mut out);
        assert_eq!(out, compute_edges(&positions, 80.0, 0.5));
    }

    #[test]
    fn handles_negative_coordinates() {
        let positions = vec![Vec2::new(-40.0, -40.0), Vec2::new(-10.0, -35.0), Vec2::new(300.0, 300.0)];
        let mut grid = SpatialGrid::new(50.0);
        let mut out = Vec::new();
        grid.edges_into(&positions, 1.0, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].a, out[0].b), (0, 1));
    }

    #[test]
    fn sparse_layout_falls_back() {
        let positions = vec![Vec2::new(0.0, 0.0), Vec2::new(1.0e7, 1.0e7), Vec2::new(10.0, 0.0)];
        let mut grid = SpatialGrid::new(20.0);
        assert!(!grid.build(&positions));
        let mut out = Vec::new();
        grid.edges_into(&positions, 1.0, &mut out);
        assert_eq!(out.len(), 1);
    }
}
