//! Resource types for export state tracking.

use bevy::prelude::*;
use bevy::tasks::Task;

use super::results::{ExportResult, ImportResult};

/// Export failure shown to the user
#[derive(Resource, Default)]
pub struct ExportError {
    pub message: Option<String>,
}

/// Import failure shown to the user
#[derive(Resource, Default)]
pub struct ImportError {
    pub message: Option<String>,
}

/// Resource tracking async export I/O for the progress indicator
#[derive(Resource, Default)]
pub struct AsyncExportOperation {
    pub is_exporting: bool,
    pub is_importing: bool,
    /// Description of the current operation
    pub operation_description: Option<String>,
}

impl AsyncExportOperation {
    pub fn is_busy(&self) -> bool {
        self.is_exporting || self.is_importing
    }
}

/// Component for export task
#[derive(Component)]
pub struct ExportTask(pub Task<ExportResult>);

/// Component for import task
#[derive(Component)]
pub struct ImportTask(pub Task<ImportResult>);
