use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{EguiContexts, egui};
use futures_lite::future;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, ConfigResetNotification};
use crate::editor::{BackgroundLoadError, Board, LoadBackgroundRequest};
use crate::export::{
    AsyncExportOperation, ExportAnnotationsRequest, ExportError, ImportAnnotationsRequest,
    ImportError,
};
use crate::theme;

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "webp", "bmp", "gif", "tif", "tiff"];

/// Pending native file dialogs and the clear confirmation
#[derive(Resource, Default)]
pub struct FileMenuState {
    pub show_clear_confirmation: bool,
    pub pending_open_image: Option<Task<Option<PathBuf>>>,
    pub pending_export: Option<Task<Option<PathBuf>>>,
    pub pending_import: Option<Task<Option<PathBuf>>>,
}

impl FileMenuState {
    pub fn any_file_dialog_pending(&self) -> bool {
        self.pending_open_image.is_some()
            || self.pending_export.is_some()
            || self.pending_import.is_some()
    }

    pub fn browse_background(&mut self, start_dir: Option<PathBuf>) {
        if self.any_file_dialog_pending() {
            return;
        }
        let task_pool = AsyncComputeTaskPool::get();
        self.pending_open_image = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Open Chart Image")
                .add_filter("Images", &IMAGE_EXTENSIONS);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        }));
    }

    pub fn browse_export(&mut self, start_dir: PathBuf, file_name: String) {
        if self.any_file_dialog_pending() {
            return;
        }
        let task_pool = AsyncComputeTaskPool::get();
        self.pending_export = Some(task_pool.spawn(async move {
            rfd::AsyncFileDialog::new()
                .set_title("Export Annotations")
                .add_filter("Annotations", &["json"])
                .set_directory(start_dir)
                .set_file_name(file_name)
                .save_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    pub fn browse_import(&mut self, start_dir: PathBuf) {
        if self.any_file_dialog_pending() {
            return;
        }
        let task_pool = AsyncComputeTaskPool::get();
        self.pending_import = Some(task_pool.spawn(async move {
            rfd::AsyncFileDialog::new()
                .set_title("Import Annotations")
                .add_filter("Annotations", &["json"])
                .set_directory(start_dir)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }
}

/// Where the export and import dialogs start
pub fn annotations_dir(config: &AppConfig) -> PathBuf {
    config
        .data
        .last_export_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(crate::paths::default_export_dir)
}

/// Suggested export file name, derived from the chart image
pub fn suggested_export_name(background: Option<&Path>) -> String {
    background
        .and_then(|path| path.file_stem())
        .and_then(|stem| stem.to_str())
        .map(|stem| format!("{}.annotations.json", stem))
        .unwrap_or_else(|| "annotations.json".to_string())
}

fn poll_dialog(task: &mut Option<Task<Option<PathBuf>>>) -> Option<PathBuf> {
    let result = future::block_on(future::poll_once(task.as_mut()?))?;
    *task = None;
    result
}

/// Turns finished file dialogs into load, export and import requests
pub fn poll_file_dialogs(
    mut state: ResMut<FileMenuState>,
    mut background_events: MessageWriter<LoadBackgroundRequest>,
    mut export_events: MessageWriter<ExportAnnotationsRequest>,
    mut import_events: MessageWriter<ImportAnnotationsRequest>,
) {
    if let Some(path) = poll_dialog(&mut state.pending_open_image) {
        background_events.write(LoadBackgroundRequest { path });
    }
    if let Some(path) = poll_dialog(&mut state.pending_export) {
        export_events.write(ExportAnnotationsRequest { path });
    }
    if let Some(path) = poll_dialog(&mut state.pending_import) {
        import_events.write(ImportAnnotationsRequest { path });
    }
}

/// Clear-all confirmation dialog
pub fn clear_confirmation_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<FileMenuState>,
    mut board: ResMut<Board>,
) -> Result {
    if !state.show_clear_confirmation {
        return Ok(());
    }

    egui::Window::new("Clear All")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!(
                "Remove all {} annotations? Ctrl+Z brings them back.",
                board.shapes().len()
            ));
            ui.horizontal(|ui| {
                if ui.button("Clear All").clicked() {
                    board.clear_all();
                    state.show_clear_confirmation = false;
                }
                if ui.button("Cancel").clicked() {
                    state.show_clear_confirmation = false;
                }
            });
        });

    Ok(())
}

/// Shows a dismissible error window; returns true when dismissed
fn error_window(ctx: &egui::Context, title: &str, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, message);
            });
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

/// Export, import and background load error dialogs
pub fn error_dialogs_ui(
    mut contexts: EguiContexts,
    mut export_error: ResMut<ExportError>,
    mut import_error: ResMut<ImportError>,
    mut background_error: ResMut<BackgroundLoadError>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    if let Some(message) = &export_error.message
        && error_window(ctx, "Export Failed", message)
    {
        export_error.message = None;
    }

    if let Some(message) = &import_error.message
        && error_window(ctx, "Import Failed", message)
    {
        import_error.message = None;
    }

    if let Some(message) = &background_error.message
        && error_window(ctx, "Could Not Open Image", message)
    {
        background_error.message = None;
    }

    Ok(())
}

/// Notification shown when the config file had to be reset
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}

/// Blocking overlay while an export or import runs
pub fn async_operation_modal_ui(
    mut contexts: EguiContexts,
    async_op: Res<AsyncExportOperation>,
) -> Result {
    if !async_op.is_busy() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let screen = ctx.screen_rect();
    ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("async_operation_overlay"),
    ))
    .rect_filled(screen, 0.0, theme::ui::MODAL_OVERLAY);

    egui::Window::new("Working")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    async_op
                        .operation_description
                        .as_deref()
                        .unwrap_or("Working..."),
                );
            });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggested_export_name() {
        assert_eq!(
            suggested_export_name(Some(Path::new("/charts/btc_daily.png"))),
            "btc_daily.annotations.json"
        );
        assert_eq!(suggested_export_name(None), "annotations.json");
    }

    #[test]
    fn test_annotations_dir_prefers_last_export() {
        let mut config = AppConfig::default();
        assert_eq!(annotations_dir(&config), crate::paths::default_export_dir());

        config.data.last_export_path = Some(PathBuf::from("/exports/btc.json"));
        assert_eq!(annotations_dir(&config), PathBuf::from("/exports"));
    }

    #[test]
    fn test_no_dialog_pending_by_default() {
        let state = FileMenuState::default();
        assert!(!state.any_file_dialog_pending());
        assert!(!state.show_clear_confirmation);
    }
}
