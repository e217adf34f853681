//! Export system and task polling.

use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;

use crate::config::UpdateLastExportPathRequest;
use crate::editor::{Board, Canvas};

use super::helpers::{display_name, with_json_extension};
use super::messages::ExportAnnotationsRequest;
use super::resources::{AsyncExportOperation, ExportError, ExportTask};
use super::results::ExportResult;
use super::saved::SavedAnnotations;

/// Starts an async export of the committed shapes
pub fn export_annotations_system(
    mut commands: Commands,
    mut events: MessageReader<ExportAnnotationsRequest>,
    board: Res<Board>,
    canvas: Res<Canvas>,
    mut async_op: ResMut<AsyncExportOperation>,
) {
    for event in events.read() {
        // Don't start a new export if one is already in progress
        if async_op.is_busy() {
            warn!("Export operation already in progress");
            continue;
        }

        let saved = SavedAnnotations::new(
            canvas.size,
            canvas.image_path.clone(),
            &board.snapshot(),
        );
        let path = with_json_extension(&event.path);

        async_op.is_exporting = true;
        async_op.operation_description = Some(format!("Exporting {}...", display_name(&path)));

        let task = IoTaskPool::get().spawn(async move {
            match serde_json::to_string_pretty(&saved) {
                Ok(json) => match std::fs::write(&path, json) {
                    Ok(()) => ExportResult { path, error: None },
                    Err(e) => ExportResult {
                        path,
                        error: Some(format!("Failed to write file: {}", e)),
                    },
                },
                Err(e) => ExportResult {
                    path,
                    error: Some(format!("Failed to serialize annotations: {}", e)),
                },
            }
        });

        commands.spawn(ExportTask(task));
    }
}

/// Polls export tasks and handles completion
pub fn poll_export_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportTask)>,
    mut async_op: ResMut<AsyncExportOperation>,
    mut export_error: ResMut<ExportError>,
    mut config_events: MessageWriter<UpdateLastExportPathRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if let Some(result) = future::block_on(future::poll_once(&mut task.0)) {
            async_op.is_exporting = false;
            async_op.operation_description = None;

            match result.error {
                None => {
                    info!("Annotations exported to {:?}", result.path);
                    export_error.message = None;
                    config_events.write(UpdateLastExportPathRequest { path: result.path });
                }
                Some(error) => {
                    error!("{}", error);
                    export_error.message = Some(error);
                }
            }

            commands.entity(entity).despawn();
        }
    }
}
