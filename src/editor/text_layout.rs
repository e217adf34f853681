//! Text label layout shared by painting and hit testing.
//!
//! Labels are laid out with egui, so the box a click is tested against is
//! the same galley that gets drawn.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::annotations::{TextLabel, TextMetrics};

use super::board::Board;

/// Layout job for a label's text at `font_size` points
pub fn label_job(label: &TextLabel, font_size: f32, color: egui::Color32) -> egui::text::LayoutJob {
    let format = egui::TextFormat {
        font_id: egui::FontId::proportional(font_size.max(1.0)),
        color,
        italics: label.italic,
        ..Default::default()
    };
    egui::text::LayoutJob::single_section(label.text.clone(), format)
}

/// Measures labels with egui's fonts.
///
/// Only valid once the context has run a pass; before that egui has no fonts.
#[derive(Clone)]
pub struct EguiTextMetrics {
    ctx: egui::Context,
}

impl EguiTextMetrics {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMetrics for EguiTextMetrics {
    fn text_width(&self, label: &TextLabel) -> f32 {
        // Surface units are laid out as points
        let job = label_job(label, label.font_size, egui::Color32::WHITE);
        self.ctx.fonts_mut(|fonts| fonts.layout_job(job)).size().x
    }
}

/// Swap the board's estimated text widths for measured ones
pub fn install_text_metrics(
    mut contexts: EguiContexts,
    mut board: ResMut<Board>,
    mut installed: Local<bool>,
) -> Result {
    if *installed {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?.clone();
    board.set_text_metrics(Box::new(EguiTextMetrics::new(ctx)));
    *installed = true;
    debug!("Text hit testing now uses egui layout");
    Ok(())
}
