//! Result types for async export operations.

use std::path::PathBuf;

use super::saved::SavedAnnotations;

/// Result of an async export
pub struct ExportResult {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Result of an async import
pub struct ImportResult {
    pub path: PathBuf,
    pub saved: Option<SavedAnnotations>,
    pub error: Option<String>,
}
