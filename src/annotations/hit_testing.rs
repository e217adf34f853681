//! Hit testing for resolving pointer positions to shapes and handles.

use bevy::prelude::*;

use crate::constants::{HANDLE_RADIUS, HIT_TOLERANCE};

use super::geometry::{
    point_in_rotated_box, point_near_circle_edge, point_near_horizontal_line,
    point_near_rect_perimeter, point_near_segment,
};
use super::shape::{Shape, ShapeGeometry};
use super::text_metrics::TextMetrics;

/// A control handle on the selected shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Start,
    End,
    /// Rotation handle of a text label
    Rotate,
}

impl Handle {
    /// Control point index this handle drags, if any
    pub fn index(&self) -> Option<usize> {
        match self {
            Handle::Start => Some(0),
            Handle::End => Some(1),
            Handle::Rotate => None,
        }
    }

    pub fn from_index(index: usize) -> Option<Handle> {
        match index {
            0 => Some(Handle::Start),
            1 => Some(Handle::End),
            _ => None,
        }
    }
}

/// Check if `point` touches the shape's outline
pub fn shape_contains(shape: &Shape, point: Vec2, metrics: &dyn TextMetrics) -> bool {
    match &shape.geometry {
        ShapeGeometry::Trendline { start, end }
        | ShapeGeometry::Fibonacci { start, end, .. }
        | ShapeGeometry::Angle { start, end } => {
            point_near_segment(point, *start, *end, HIT_TOLERANCE)
        }
        ShapeGeometry::HorizontalRay { anchor } => {
            point_near_horizontal_line(point, anchor.y, HIT_TOLERANCE)
        }
        ShapeGeometry::Rectangle { start, end } => {
            point_near_rect_perimeter(point, *start, *end, HIT_TOLERANCE)
        }
        // Center point also counts as a hit
        ShapeGeometry::Circle { center, edge } => {
            point_near_circle_edge(point, *center, center.distance(*edge), HIT_TOLERANCE)
                || point.distance(*center) < HIT_TOLERANCE
        }
        ShapeGeometry::Text(label) => point_in_rotated_box(
            point,
            label.center,
            metrics.text_width(label),
            label.font_size,
            label.rotation_degrees,
        ),
    }
}

/// Find the topmost shape under `point`. Later shapes in the slice win.
pub fn resolve<'a>(
    point: Vec2,
    shapes: &'a [Shape],
    metrics: &dyn TextMetrics,
) -> Option<&'a Shape> {
    shapes
        .iter()
        .rev()
        .find(|shape| shape_contains(shape, point, metrics))
}

/// Find the handle of `shape` under `point`.
///
/// The rotation handle of a text label is checked first, then the start and
/// end control points.
pub fn handle_at(point: Vec2, shape: &Shape) -> Option<Handle> {
    if let Some(label) = shape.text()
        && point.distance(label.rotation_handle()) < HANDLE_RADIUS
    {
        return Some(Handle::Rotate);
    }

    shape
        .control_points()
        .iter()
        .position(|cp| point.distance(*cp) < HANDLE_RADIUS)
        .and_then(Handle::from_index)
}
