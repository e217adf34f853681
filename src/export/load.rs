//! Import system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::editor::{Board, LoadBackgroundRequest};

use super::helpers::display_name;
use super::messages::ImportAnnotationsRequest;
use super::resources::{AsyncExportOperation, ImportError, ImportTask};
use super::results::ImportResult;
use super::saved::{FORMAT_VERSION, SavedAnnotations};

/// Starts an async import (file I/O and parsing only)
pub fn import_annotations_system(
    mut commands: Commands,
    mut events: MessageReader<ImportAnnotationsRequest>,
    mut async_op: ResMut<AsyncExportOperation>,
) {
    for event in events.read() {
        if async_op.is_busy() {
            warn!("Import operation already in progress");
            continue;
        }

        let path = event.path.clone();
        async_op.is_importing = true;
        async_op.operation_description = Some(format!("Importing {}...", display_name(&path)));

        let task = IoTaskPool::get().spawn(async move {
            let json = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    return ImportResult {
                        path,
                        saved: None,
                        error: Some(format!("Failed to read file: {}", e)),
                    };
                }
            };

            match serde_json::from_str::<SavedAnnotations>(&json) {
                Ok(saved) => ImportResult {
                    path,
                    saved: Some(saved),
                    error: None,
                },
                Err(e) => ImportResult {
                    path,
                    saved: None,
                    error: Some(format!("Failed to parse annotations file: {}", e)),
                },
            }
        });

        commands.spawn(ImportTask(task));
    }
}

/// Polls import tasks and swaps the board contents on completion
pub fn poll_import_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ImportTask)>,
    mut async_op: ResMut<AsyncExportOperation>,
    mut import_error: ResMut<ImportError>,
    mut board: ResMut<Board>,
    mut background_events: MessageWriter<LoadBackgroundRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        // Wait for the current gesture to end before replacing shapes
        if !board.is_idle() {
            continue;
        }
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };

        async_op.is_importing = false;
        async_op.operation_description = None;
        commands.entity(entity).despawn();

        if let Some(error) = result.error {
            error!("{}", error);
            import_error.message = Some(error);
            continue;
        }
        let Some(saved) = result.saved else {
            continue;
        };

        if saved.version > FORMAT_VERSION {
            warn!(
                "{:?} was written by a newer version (format {}), importing anyway",
                result.path, saved.version
            );
        }

        if let Some(background) = saved.background.clone() {
            if background.exists() {
                background_events.write(LoadBackgroundRequest { path: background });
            } else {
                warn!("Background image {:?} no longer exists", background);
            }
        }

        let count = saved.shapes.len();
        board.replace_shapes(saved.into_shapes());
        import_error.message = None;
        info!("Imported {} shapes from {:?}", count, result.path);
    }
}
