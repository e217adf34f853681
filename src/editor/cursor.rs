//! Cursor icon feedback for the board.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow, SystemCursorIcon};
use bevy_egui::EguiContexts;

use super::background::Canvas;
use super::board::Board;
use super::params::{CameraParams, is_cursor_over_ui};

/// Update cursor icon from what a press at the cursor would start
pub fn update_cursor_icon(
    board: Res<Board>,
    canvas: Res<Canvas>,
    camera: CameraParams,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut contexts: EguiContexts,
) {
    let Ok(window_entity) = window_query.single() else {
        return;
    };

    // Use default cursor over UI
    if board.is_idle() && is_cursor_over_ui(&mut contexts) {
        commands
            .entity(window_entity)
            .insert(CursorIcon::System(SystemCursorIcon::Default));
        return;
    }

    let Some(pos) = camera.cursor_surface_pos(&canvas) else {
        return;
    };

    let cursor = board
        .hover_mode(pos)
        .cursor_icon()
        .unwrap_or_else(|| board.tool().cursor_icon());
    commands.entity(window_entity).insert(cursor);
}
