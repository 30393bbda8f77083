//! Pure derivations from an idea record to its visual attributes.

use crate::api::config::{ColorConfig, GlowConfig, MassConfig};
use crate::api::types::IdeaRecord;
use crate::renderer::color::Color;

/// 32-bit rolling hash of a title: `hash = hash * 31 + unit` over UTF-16
/// code units, wrapping on overflow.
pub fn title_hash(title: &str) -> i32 {
    title
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Hue bucket in [0, 360) for a title.
pub fn title_hue(title: &str) -> u32 {
    title_hash(title).unsigned_abs() % 360
}

/// Stable color for a title. Distinct titles may share a hue bucket.
pub fn color_of(title: &str, config: &ColorConfig) -> Color {
    Color::from_hsl(title_hue(title) as f32, config.saturation, config.lightness)
}

/// Radius ("mass") for a record, saturating at `max_radius`.
///
/// Description length is measured in UTF-16 code units, the same unit
/// `title_hash` walks, so both derivations agree with browser string lengths.
pub fn mass_of(record: &IdeaRecord, config: &MassConfig) -> f32 {
    let length = record.description.encode_utf16().count() as f32;
    let content_bonus = (length / config.length_divisor).min(config.length_bonus_cap);
    let radius = config.base_radius
        + record.engagement_count as f32 * config.per_engagement
        + content_bonus;
    radius.clamp(config.min_radius, config.max_radius)
}

/// Glow blur for a record at a given breathing phase.
/// More discussion means a stronger halo, capped at `max_blur`.
pub fn glow_of(record: &IdeaRecord, phase: f32, config: &GlowConfig) -> f32 {
    let steady = (config.base_blur + record.engagement_count as f32 * config.per_engagement)
        .min(config.max_blur)
        .max(0.0);
    let breath = config.breath.clamp(0.0, 1.0);
    let pulse = 0.5 + 0.5 * phase.sin();
    steady * (1.0 - breath + breath * pulse)
}
