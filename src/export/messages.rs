//! Message types for export and import.

use bevy::prelude::*;
use std::path::PathBuf;

/// Write the committed shape collection to `path` as JSON
#[derive(Message)]
pub struct ExportAnnotationsRequest {
    pub path: PathBuf,
}

/// Replace the shape collection with the contents of `path`
#[derive(Message)]
pub struct ImportAnnotationsRequest {
    pub path: PathBuf,
}
