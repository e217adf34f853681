//! Common types shared across multiple modules.
//!
//! Used by the editor's gesture handling and by the cursor feedback system.

use bevy::window::{CursorIcon, SystemCursorIcon};

/// What a pointer drag is doing, or would do if it started here.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum DragMode {
    #[default]
    None,
    Move,
    Resize,
    Rotate,
}

impl DragMode {
    /// Get the appropriate cursor icon for this drag mode.
    pub fn cursor_icon(&self) -> Option<CursorIcon> {
        match self {
            DragMode::None => None,
            DragMode::Move => Some(CursorIcon::System(SystemCursorIcon::Move)),
            DragMode::Resize => Some(CursorIcon::System(SystemCursorIcon::Crosshair)),
            DragMode::Rotate => Some(CursorIcon::System(SystemCursorIcon::Grab)),
        }
    }
}
