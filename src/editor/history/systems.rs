//! Bevy systems for handling undo/redo keyboard shortcuts.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use super::super::board::Board;

fn ctrl_pressed(keyboard: &ButtonInput<KeyCode>) -> bool {
    // Cmd on macOS
    keyboard.any_pressed([
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
    ])
}

fn shift_pressed(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight])
}

fn typing_in_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}

/// System to handle undo keyboard shortcut (Ctrl+Z)
pub fn handle_undo(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut board: ResMut<Board>,
    mut contexts: EguiContexts,
) {
    // Ctrl+Z (without shift) = undo
    if ctrl_pressed(&keyboard)
        && !shift_pressed(&keyboard)
        && keyboard.just_pressed(KeyCode::KeyZ)
        && !typing_in_ui(&mut contexts)
        && !board.undo()
    {
        debug!("Nothing to undo");
    }
}

/// System to handle redo keyboard shortcut (Ctrl+Y or Ctrl+Shift+Z)
pub fn handle_redo(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut board: ResMut<Board>,
    mut contexts: EguiContexts,
) {
    let ctrl = ctrl_pressed(&keyboard);
    let shift = shift_pressed(&keyboard);

    // Ctrl+Y or Ctrl+Shift+Z = redo
    let redo_pressed = (ctrl && keyboard.just_pressed(KeyCode::KeyY))
        || (ctrl && shift && keyboard.just_pressed(KeyCode::KeyZ));

    if redo_pressed && !typing_in_ui(&mut contexts) && !board.redo() {
        debug!("Nothing to redo");
    }
}
