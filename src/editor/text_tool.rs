//! Content prompt for the text tool.
//!
//! A press with the text tool opens a single-line prompt at the click
//! position. Enter places the label on the board in one step; Esc or
//! switching tools throws the input away.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::annotations::ToolSettings;

use super::background::Canvas;
use super::board::Board;
use super::params::CameraParams;
use super::tools::ChartTool;

/// Pending text label waiting for its content
#[derive(Resource, Default)]
pub struct TextPrompt {
    /// Surface position the label will be centered on
    pub anchor: Option<Vec2>,
    pub buffer: String,
}

impl TextPrompt {
    pub fn open(&mut self, anchor: Vec2) {
        self.anchor = Some(anchor);
        self.buffer.clear();
    }

    pub fn close(&mut self) {
        self.anchor = None;
        self.buffer.clear();
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }
}

/// UI system showing the text prompt next to its anchor
pub fn text_prompt_ui(
    mut contexts: EguiContexts,
    mut prompt: ResMut<TextPrompt>,
    mut board: ResMut<Board>,
    settings: Res<ToolSettings>,
    canvas: Res<Canvas>,
    camera: CameraParams,
    keyboard: Res<ButtonInput<KeyCode>>,
) {
    let Some(anchor) = prompt.anchor else {
        return;
    };

    if board.tool() != ChartTool::Text || keyboard.just_pressed(KeyCode::Escape) {
        prompt.close();
        return;
    }

    let Some(screen_pos) = camera.surface_to_screen(&canvas, anchor) else {
        return;
    };

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut should_finalize = false;

    egui::Area::new(egui::Id::new("text_label_prompt"))
        .fixed_pos(egui::pos2(screen_pos.x, screen_pos.y))
        .pivot(egui::Align2::LEFT_CENTER)
        .show(ctx, |ui| {
            ui.set_min_width(150.0);
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut prompt.buffer)
                        .hint_text("Label text...")
                        .desired_width(200.0)
                        .font(egui::TextStyle::Body),
                );

                // Request focus only when not already focused
                if !response.has_focus() {
                    response.request_focus();
                }

                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    should_finalize = true;
                }

                ui.label("Press Enter to place, Esc to cancel");
            });
        });

    if should_finalize {
        match board.place_text(&settings, anchor, &prompt.buffer) {
            Some(id) => debug!("Placed text label {:?}", id),
            None => debug!("Empty text label discarded"),
        }
        prompt.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_resets_buffer() {
        let mut prompt = TextPrompt::default();
        prompt.buffer.push_str("stale");
        prompt.open(Vec2::new(10.0, 20.0));
        assert!(prompt.is_open());
        assert!(prompt.buffer.is_empty());
        assert_eq!(prompt.anchor, Some(Vec2::new(10.0, 20.0)));
    }

    #[test]
    fn test_close() {
        let mut prompt = TextPrompt::default();
        prompt.open(Vec2::ZERO);
        prompt.buffer.push_str("Support");
        prompt.close();
        assert!(!prompt.is_open());
        assert!(prompt.buffer.is_empty());
    }
}
