//! Projection of the board into an ordered list of paint operations.
//!
//! Order is fixed: background, committed shapes in collection order, the
//! live draft, then decorations of the selected shape. Renderers draw the
//! list front to back and never reorder it.

use bevy::prelude::*;

use crate::annotations::{Handle, Shape};

/// What sits underneath the shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    pub size: Vec2,
    /// No image is loaded; draw a placeholder frame instead
    pub placeholder: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintOp<'a> {
    Background(Background),
    Shape(&'a Shape),
    Draft(&'a Shape),
    Handle { position: Vec2, handle: Handle },
    RotationHandle { pivot: Vec2, position: Vec2 },
}

pub fn paint_ops<'a>(
    background: Background,
    shapes: &'a [Shape],
    draft: Option<&'a Shape>,
    selected: Option<&'a Shape>,
) -> Vec<PaintOp<'a>> {
    let mut ops = Vec::with_capacity(shapes.len() + 5);
    ops.push(PaintOp::Background(background));
    ops.extend(shapes.iter().map(PaintOp::Shape));

    if let Some(draft) = draft {
        ops.push(PaintOp::Draft(draft));
    }

    if let Some(shape) = selected {
        for (index, position) in shape.control_points().into_iter().enumerate() {
            if let Some(handle) = Handle::from_index(index) {
                ops.push(PaintOp::Handle { position, handle });
            }
        }
        if let Some(label) = shape.text() {
            ops.push(PaintOp::RotationHandle {
                pivot: label.center,
                position: label.rotation_handle(),
            });
        }
    }

    ops
}
