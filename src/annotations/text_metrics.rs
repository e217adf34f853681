//! Text measurement used by hit testing.
//!
//! The engine never lays out glyphs itself. Hosts that can measure text
//! exactly plug in their own [`TextMetrics`]; everything else uses the
//! character-count estimate.

use super::shape::TextLabel;

pub trait TextMetrics: Send + Sync {
    /// Rendered width of the label's text in surface units
    fn text_width(&self, label: &TextLabel) -> f32;
}

/// Estimates width from character count and font size
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

/// Average glyph advance as a fraction of the font size
const AVERAGE_ADVANCE: f32 = 0.6;
const BOLD_FACTOR: f32 = 1.1;

impl TextMetrics for ApproxTextMetrics {
    fn text_width(&self, label: &TextLabel) -> f32 {
        let chars = label.text.chars().count() as f32;
        let weight = if label.bold { BOLD_FACTOR } else { 1.0 };
        chars * label.font_size * AVERAGE_ADVANCE * weight
    }
}
