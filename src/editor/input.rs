//! Feeds mouse and keyboard input into the [`Board`].
//!
//! Pointer positions are converted to canvas surface coordinates before they
//! reach the board. Presses are gated on the UI and open dialogs; an active
//! gesture always runs to completion so the board never stays mid-gesture.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::annotations::ToolSettings;
use crate::ui::DialogState;

use super::background::Canvas;
use super::board::Board;
use super::interaction::PointerDown;
use super::params::{CameraParams, is_cursor_over_ui};
use super::text_tool::TextPrompt;

#[allow(clippy::too_many_arguments)]
pub fn handle_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut board: ResMut<Board>,
    settings: Res<ToolSettings>,
    canvas: Res<Canvas>,
    camera: CameraParams,
    dialog_state: Res<DialogState>,
    mut prompt: ResMut<TextPrompt>,
    mut contexts: EguiContexts,
) {
    let cursor = camera.cursor_surface_pos(&canvas);

    if !board.is_idle() {
        match cursor {
            // Cursor left the window mid-gesture
            None => {
                board.pointer_cancel();
            }
            Some(pos) if !mouse_button.pressed(MouseButton::Left) => {
                board.pointer_up(pos);
            }
            Some(pos) => board.pointer_move(pos),
        }
        return;
    }

    if !mouse_button.just_pressed(MouseButton::Left)
        || dialog_state.any_modal_open
        || prompt.is_open()
        || is_cursor_over_ui(&mut contexts)
    {
        return;
    }

    let Some(pos) = cursor else {
        return;
    };
    if !canvas.contains(pos) {
        return;
    }

    match board.pointer_down(&settings, pos) {
        PointerDown::TextRequested(anchor) => prompt.open(anchor),
        PointerDown::Selected(id) => debug!("Selected shape {:?}", id),
        _ => {}
    }
}

/// Delete or Backspace removes the selected shape
pub fn handle_delete(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut board: ResMut<Board>,
    mut contexts: EguiContexts,
) {
    if !keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        return;
    }

    // Don't delete shapes while typing in a text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if board.delete_selected() {
        info!("Deleted selected shape");
    }
}
