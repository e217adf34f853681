//! Gesture state of the board.
//!
//! One value describes the whole gesture, so a draft can't coexist with a
//! move and a rotation can't target a missing pivot.

use bevy::prelude::*;

use crate::annotations::{Handle, Shape, ShapeId};
use crate::common::DragMode;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A drawing tool is defining a new shape
    Drawing { draft: Shape },
    /// Translating a shape. `last` is the pointer position of the previous step.
    Moving { shape: ShapeId, last: Vec2 },
    /// Dragging one control point
    Resizing { shape: ShapeId, handle: Handle },
    /// Turning a text label around `pivot`
    Rotating { shape: ShapeId, pivot: Vec2 },
}

impl InteractionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn draft(&self) -> Option<&Shape> {
        match self {
            InteractionState::Drawing { draft } => Some(draft),
            _ => None,
        }
    }

    /// Shape being modified in place, if any
    pub fn target(&self) -> Option<ShapeId> {
        match self {
            InteractionState::Moving { shape, .. }
            | InteractionState::Resizing { shape, .. }
            | InteractionState::Rotating { shape, .. } => Some(*shape),
            InteractionState::Idle | InteractionState::Drawing { .. } => None,
        }
    }

    pub fn drag_mode(&self) -> DragMode {
        match self {
            InteractionState::Idle | InteractionState::Drawing { .. } => DragMode::None,
            InteractionState::Moving { .. } => DragMode::Move,
            InteractionState::Resizing { .. } => DragMode::Resize,
            InteractionState::Rotating { .. } => DragMode::Rotate,
        }
    }
}

/// Outcome of a pointer press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDown {
    /// The press did nothing, e.g. a gesture was already active
    Ignored,
    /// Select tool pressed on empty space
    Deselected,
    /// A shape was selected and is now being moved
    Selected(ShapeId),
    Resizing(ShapeId, Handle),
    Rotating(ShapeId),
    DrawingStarted,
    /// The text tool wants content for a label anchored here
    TextRequested(Vec2),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_target() {
        let state = InteractionState::default();
        assert!(state.is_idle());
        assert_eq!(state.target(), None);
        assert_eq!(state.drag_mode(), DragMode::None);
    }

    #[test]
    fn test_gesture_targets() {
        let moving = InteractionState::Moving {
            shape: ShapeId(3),
            last: Vec2::ZERO,
        };
        assert_eq!(moving.target(), Some(ShapeId(3)));
        assert_eq!(moving.drag_mode(), DragMode::Move);

        let rotating = InteractionState::Rotating {
            shape: ShapeId(4),
            pivot: Vec2::new(10.0, 10.0),
        };
        assert_eq!(rotating.target(), Some(ShapeId(4)));
        assert_eq!(rotating.drag_mode(), DragMode::Rotate);
        assert!(rotating.draft().is_none());
    }
}
