//! Export and import of the committed shape collection.
//!
//! The board is serialized to JSON on Bevy's IoTaskPool so large
//! collections never stall a frame. Only committed shapes are written; a
//! live draft is never part of an export.
//!
//! ## Module Structure
//!
//! - [`saved`] - Plain-data file format
//! - [`messages`] - Message types for export and import
//! - [`resources`] - Error and progress resources
//! - [`results`] - Result types for async operations
//! - [`helpers`] - Color conversion and path helpers
//! - [`save`] - Export system and task polling
//! - [`load`] - Import system and task polling

mod helpers;
mod load;
mod messages;
mod resources;
mod results;
mod saved;
mod save;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

// Re-exports
pub use helpers::{array_to_color, color_to_array};
pub use messages::{ExportAnnotationsRequest, ImportAnnotationsRequest};
pub use resources::{AsyncExportOperation, ExportError, ImportError};
pub use saved::{SavedAnnotations, SavedGeometry, SavedShape};

pub struct ExportPlugin;

impl Plugin for ExportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExportError>()
            .init_resource::<ImportError>()
            .init_resource::<AsyncExportOperation>()
            .add_message::<ExportAnnotationsRequest>()
            .add_message::<ImportAnnotationsRequest>()
            .add_systems(
                Update,
                (
                    save::export_annotations_system
                        .run_if(on_message::<ExportAnnotationsRequest>),
                    save::poll_export_tasks,
                    load::import_annotations_system
                        .run_if(on_message::<ImportAnnotationsRequest>),
                    load::poll_import_tasks,
                ),
            );
    }
}
