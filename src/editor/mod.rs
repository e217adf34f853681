//! The annotation editor: board state, gestures, history and drawing.
//!
//! ## Module Structure
//!
//! - [`board`] - Shape collection owner and interaction state machine
//! - [`interaction`] - Gesture states and pointer-down outcomes
//! - [`history`] - Snapshot undo/redo
//! - [`paint`] - Projection of the board into paint operations
//! - [`background`] - Chart image and logical canvas
//! - [`input`], [`text_tool`], [`cursor`] - Bevy systems feeding the board
//! - [`rendering`] - Draws paint operations with gizmos and egui
//! - [`text_layout`] - egui label layout shared by drawing and text hit testing

pub mod background;
pub mod board;
mod camera;
mod conditions;
mod cursor;
pub mod history;
mod input;
pub mod interaction;
pub mod paint;
mod params;
pub mod rendering;
pub mod text_layout;
pub mod text_tool;
pub mod tools;

pub use background::{BackgroundLoadError, Canvas, LoadBackgroundRequest};
pub use board::Board;
pub use interaction::{InteractionState, PointerDown};
pub use paint::{Background, PaintOp};
pub use rendering::paint_board;
pub use text_tool::TextPrompt;
pub use tools::ChartTool;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::annotations::ToolSettings;

use conditions::{no_dialog_open, text_prompt_closed};

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Board>()
            .init_resource::<ToolSettings>()
            .init_resource::<Canvas>()
            .init_resource::<BackgroundLoadError>()
            .init_resource::<TextPrompt>()
            .add_message::<LoadBackgroundRequest>()
            .init_gizmo_group::<rendering::CanvasGizmoGroup>()
            .add_systems(
                Startup,
                (camera::spawn_camera, rendering::configure_canvas_gizmos),
            )
            .add_systems(
                Update,
                (
                    camera::camera_pan,
                    camera::camera_zoom,
                    camera::apply_camera_zoom,
                    background::load_background_system
                        .run_if(on_message::<LoadBackgroundRequest>),
                    camera::fit_camera_to_canvas
                        .run_if(resource_changed::<Canvas>)
                        .after(background::load_background_system),
                    rendering::draw_canvas_frame,
                ),
            )
            .add_systems(
                Update,
                (
                    tools::handle_tool_shortcuts
                        .run_if(no_dialog_open)
                        .run_if(text_prompt_closed),
                    history::handle_undo.run_if(no_dialog_open),
                    history::handle_redo.run_if(no_dialog_open),
                    input::handle_delete.run_if(no_dialog_open),
                    input::handle_pointer,
                    cursor::update_cursor_icon,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    text_layout::install_text_metrics,
                    paint_board,
                    text_tool::text_prompt_ui,
                )
                    .chain(),
            );
    }
}
