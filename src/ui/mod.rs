pub mod file_menu;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::config::ConfigResetNotification;
use crate::editor::{BackgroundLoadError, paint_board};
use crate::export::{AsyncExportOperation, ExportError, ImportError};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    file_menu: Res<file_menu::FileMenuState>,
    config_reset: Res<ConfigResetNotification>,
    export_error: Res<ExportError>,
    import_error: Res<ImportError>,
    background_error: Res<BackgroundLoadError>,
    async_op: Res<AsyncExportOperation>,
    mut dialog_state: ResMut<DialogState>,
) {
    let any_modal_open = file_menu.show_clear_confirmation
        || file_menu.any_file_dialog_pending()
        || config_reset.show
        || export_error.message.is_some()
        || import_error.message.is_some()
        || background_error.message.is_some()
        || async_op.is_busy();

    if dialog_state.any_modal_open != any_modal_open {
        dialog_state.any_modal_open = any_modal_open;
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<file_menu::FileMenuState>()
            .add_systems(Update, file_menu::poll_file_dialogs)
            // Panels first so the board painter can clip to the space they leave
            .add_systems(
                EguiPrimaryContextPass,
                (toolbar::toolbar_ui, toolbar::tool_settings_ui)
                    .chain()
                    .before(paint_board),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    file_menu::clear_confirmation_ui,
                    file_menu::error_dialogs_ui,
                    file_menu::config_reset_notification_ui,
                    file_menu::async_operation_modal_ui,
                )
                    .after(paint_board),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
