//! Per-frame draw order: background wash, dust, edges, bodies.

use glam::Vec2;

use super::color::Color;
use super::surface::{Glow, RenderSurface};
use crate::api::config::{FieldConfig, GlowConfig};
use crate::api::error::FieldError;
use crate::field::attributes::glow_of;
use crate::field::state::FieldState;
use crate::graph::proximity::Edge;

/// What a frame drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub motes: usize,
    pub edges: usize,
    pub particles: usize,
}

#[derive(Debug, Clone)]
pub struct RenderPipeline {
    background: Color,
    trail_alpha: Option<f32>,
    edge_color: Color,
    edge_width: f32,
    dust_color: Color,
    glow: GlowConfig,
}

impl RenderPipeline {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            background: config.background,
            trail_alpha: config.trail_alpha,
            edge_color: config.edges.color,
            edge_width: config.edges.line_width,
            dust_color: config.dust.color,
            glow: config.glow.clone(),
        }
    }

    /// Paint the background only (used while no field is loaded).
    pub fn wash<S: RenderSurface + ?Sized>(&self, surface: &mut S) -> Result<(), FieldError> {
        match self.trail_alpha {
            Some(alpha) => {
                let size = Vec2::new(surface.width(), surface.height());
                surface.fill_rect(Vec2::ZERO, size, self.background.with_alpha(alpha))?;
            }
            None => surface.clear(self.background)?,
        }
        Ok(())
    }

    /// Draw one frame. Particle render positions must already be projected.
    pub fn render<S: RenderSurface + ?Sized>(
        &self,
        surface: &mut S,
        field: &FieldState,
        edges: &[Edge],
        selected: Option<usize>,
    ) -> Result<FrameStats, FieldError> {
        let mut stats = FrameStats::default();

        self.wash(surface)?;

        for mote in field.motes() {
            surface.draw_circle(mote.position, mote.size, self.dust_color.with_alpha(mote.opacity))?;
            stats.motes += 1;
        }

        let particles = field.particles();
        for edge in edges {
            let (Some(a), Some(b)) = (particles.get(edge.a), particles.get(edge.b)) else {
                continue;
            };
            surface.draw_line(a.position, b.position, self.edge_color.with_alpha(edge.opacity), self.edge_width)?;
            stats.edges += 1;
        }

        for (index, p) in particles.iter().enumerate() {
            let blur = glow_of(p.record(), p.phase, &self.glow);
            if blur > 0.0 {
                surface.set_glow(Some(Glow { blur, color: p.color }))?;
                let body = surface.draw_circle(p.position, p.radius, p.color);
                // Reset even if the body failed so the glow never bleeds.
                surface.set_glow(None)?;
                body?;
            } else {
                surface.draw_circle(p.position, p.radius, p.color)?;
            }

            if p.is_engaged() {
                surface.stroke_circle(
                    p.position,
                    p.radius + self.glow.ring_offset,
                    p.color.with_alpha(self.glow.ring_alpha),
                    self.glow.ring_width,
                )?;
            }
            if selected == Some(index) {
                surface.stroke_circle(
                    p.position,
                    p.radius + self.glow.ring_offset * 2.0,
                    self.glow.selection_color,
                    self.glow.ring_width * 1.5,
                )?;
            }
            stats.particles += 1;
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::IdeaRecord;
    use crate::field::particle::Particle;
    use crate::graph::proximity::compute_edges;
    use crate::renderer::draw_list::{DrawList, DrawOp};

    fn field(config: &FieldConfig) -> FieldState {
        let particles = vec![
            Particle::new(IdeaRecord::new("a", "quiet"), config).with_position(Vec2::new(100.0, 100.0)),
            Particle::new(IdeaRecord::new("b", "busy").with_engagement(4), config)
                .with_position(Vec2::new(200.0, 100.0)),
        ];
        FieldState::from_particles(particles, 800.0, 600.0, config).unwrap()
    }

    fn positions(field: &FieldState) -> Vec<Vec2> {
        field.particles().iter().map(|p| p.position).collect()
    }

    #[test]
    fn draws_in_fixed_order() {
        let config = FieldConfig::default();
        let field = field(&config);
        let edges = compute_edges(&positions(&field), 150.0, 0.35);
        let mut list = DrawList::new(800.0, 600.0);

        let stats = RenderPipeline::new(&config).render(&mut list, &field, &edges, None).unwrap();
        assert_eq!(stats, FrameStats { motes: 0, edges: 1, particles: 2 });

        let kinds: Vec<DrawOp> = list.commands().iter().filter_map(|c| c.kind()).collect();
        assert_eq!(kinds[0], DrawOp::Clear);
        assert_eq!(kinds[1], DrawOp::Line);
        let first_circle = kinds.iter().position(|k| *k == DrawOp::FillCircle).unwrap();
        assert!(first_circle > 1);
    }

    #[test]
    fn glow_reset_after_every_body() {
        let config = FieldConfig::default();
        let field = field(&config);
        let mut list = DrawList::new(800.0, 600.0);
        RenderPipeline::new(&config).render(&mut list, &field, &[], None).unwrap();

        let cmds = list.commands();
        for (i, c) in cmds.iter().enumerate() {
            if c.kind() == Some(DrawOp::FillCircle) && c.glow > 0.0 {
                let next = cmds[i + 1];
                assert_eq!(next.kind(), Some(DrawOp::SetGlow));
                assert_eq!(next.size, 0.0);
            }
        }
        assert_eq!(list.current_glow(), None);
    }

    #[test]
    fn engaged_particles_get_a_ring() {
        let config = FieldConfig::default();
        let field = field(&config);
        let mut list = DrawList::new(800.0, 600.0);
        RenderPipeline::new(&config).render(&mut list, &field, &[], None).unwrap();

        assert_eq!(list.count_of(DrawOp::StrokeCircle), 1);
        let ring = list.commands().iter().find(|c| c.kind() == Some(DrawOp::StrokeCircle)).unwrap();
        let busy = &field.particles()[1];
        assert!((ring.size - (busy.radius + config.glow.ring_offset)).abs() < 1e-5);
    }

    #[test]
    fn stronger_glow_for_more_engagement() {
        let config = FieldConfig::default();
        let field = field(&config);
        let mut list = DrawList::new(800.0, 600.0);
        RenderPipeline::new(&config).render(&mut list, &field, &[], None).unwrap();

        let glows: Vec<f32> = list
            .commands()
            .iter()
            .filter(|c| c.kind() == Some(DrawOp::FillCircle))
            .map(|c| c.glow)
            .collect();
        let config_steady = GlowConfig { breath: 0.0, ..config.glow.clone() };
        assert!(glow_of(field.particles()[1].record(), 0.0, &config_steady)
            > glow_of(field.particles()[0].record(), 0.0, &config_steady));
        assert_eq!(glows.len(), 2);
        assert!(glows.iter().all(|g| *g > 0.0));
    }

    #[test]
    fn trail_mode_uses_translucent_rect() {
        let config = FieldConfig { trail_alpha: Some(0.2), ..FieldConfig::default() };
        let field = field(&config);
        let mut list = DrawList::new(800.0, 600.0);
        RenderPipeline::new(&config).render(&mut list, &field, &[], None).unwrap();

        let first = list.commands()[0];
        assert_eq!(first.kind(), Some(DrawOp::FillRect));
        assert_eq!((first.x1, first.y1), (800.0, 600.0));
        assert!((first.a - 0.2).abs() < 1e-6);
        assert_eq!(list.count_of(DrawOp::Clear), 0);
    }

    #[test]
    fn selection_adds_highlight() {
        let config = FieldConfig::default();
        let field = field(&config);
        let mut list = DrawList::new(800.0, 600.0);
        RenderPipeline::new(&config).render(&mut list, &field, &[], Some(0)).unwrap();
        assert_eq!(list.count_of(DrawOp::StrokeCircle), 2);
    }

    #[test]
    fn surface_failure_propagates() {
        let config = FieldConfig::default();
        let field = field(&config);
        let mut list = DrawList::with_limit(800.0, 600.0, 3);
        let err = RenderPipeline::new(&config).render(&mut list, &field, &[], None).unwrap_err();
        assert!(matches!(err, FieldError::Surface(_)));
    }
}
