//! The annotation shape model.
//!
//! Each [`ShapeGeometry`] variant carries only the fields meaningful to its
//! kind, so the number of control points always matches the kind's arity.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::ROTATION_HANDLE_GAP;

use super::fibonacci::FibLevels;

/// Identifier of a shape, unique within a board and assigned in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Trendline,
    HorizontalRay,
    Rectangle,
    Circle,
    Fibonacci,
    Angle,
    Text,
}

impl ShapeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Trendline => "Trendline",
            ShapeKind::HorizontalRay => "Horizontal Ray",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Fibonacci => "Fibonacci Retracement",
            ShapeKind::Angle => "Angle",
            ShapeKind::Text => "Text",
        }
    }

    /// Number of control points a shape of this kind carries
    pub fn arity(&self) -> usize {
        match self {
            ShapeKind::HorizontalRay | ShapeKind::Text => 1,
            _ => 2,
        }
    }
}

/// A text label anchored (and rotated) around its center
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub center: Vec2,
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub rotation_degrees: f32,
}

impl TextLabel {
    /// Position of the rotation handle: `font_size + gap` away from the center,
    /// pointing "up" when the label is unrotated.
    pub fn rotation_handle(&self) -> Vec2 {
        let distance = self.font_size + ROTATION_HANDLE_GAP;
        let angle = (self.rotation_degrees - 90.0).to_radians();
        self.center + Vec2::new(angle.cos(), angle.sin()) * distance
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    Trendline { start: Vec2, end: Vec2 },
    HorizontalRay { anchor: Vec2 },
    Rectangle { start: Vec2, end: Vec2 },
    Circle { center: Vec2, edge: Vec2 },
    Fibonacci { start: Vec2, end: Vec2, levels: FibLevels },
    Angle { start: Vec2, end: Vec2 },
    Text(TextLabel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub id: ShapeId,
    pub color: Color,
    pub stroke_width: f32,
    pub geometry: ShapeGeometry,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match &self.geometry {
            ShapeGeometry::Trendline { .. } => ShapeKind::Trendline,
            ShapeGeometry::HorizontalRay { .. } => ShapeKind::HorizontalRay,
            ShapeGeometry::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeGeometry::Circle { .. } => ShapeKind::Circle,
            ShapeGeometry::Fibonacci { .. } => ShapeKind::Fibonacci,
            ShapeGeometry::Angle { .. } => ShapeKind::Angle,
            ShapeGeometry::Text(_) => ShapeKind::Text,
        }
    }

    /// Control points in order: `[start, end]`, `[center, edge]`, or a single anchor
    pub fn control_points(&self) -> Vec<Vec2> {
        match &self.geometry {
            ShapeGeometry::Trendline { start, end }
            | ShapeGeometry::Rectangle { start, end }
            | ShapeGeometry::Fibonacci { start, end, .. }
            | ShapeGeometry::Angle { start, end } => vec![*start, *end],
            ShapeGeometry::Circle { center, edge } => vec![*center, *edge],
            ShapeGeometry::HorizontalRay { anchor } => vec![*anchor],
            ShapeGeometry::Text(label) => vec![label.center],
        }
    }

    pub fn control_point(&self, index: usize) -> Option<Vec2> {
        self.control_points().get(index).copied()
    }

    pub fn text(&self) -> Option<&TextLabel> {
        match &self.geometry {
            ShapeGeometry::Text(label) => Some(label),
            _ => None,
        }
    }

    pub fn fibonacci_levels(&self) -> Option<&FibLevels> {
        match &self.geometry {
            ShapeGeometry::Fibonacci { levels, .. } => Some(levels),
            _ => None,
        }
    }

    /// Radius of a circle shape
    pub fn radius(&self) -> Option<f32> {
        match &self.geometry {
            ShapeGeometry::Circle { center, edge } => Some(center.distance(*edge)),
            _ => None,
        }
    }

    /// Return a copy with every control point shifted by `delta`
    pub fn translate(&self, delta: Vec2) -> Shape {
        let mut moved = self.clone();
        match &mut moved.geometry {
            ShapeGeometry::Trendline { start, end }
            | ShapeGeometry::Rectangle { start, end }
            | ShapeGeometry::Fibonacci { start, end, .. }
            | ShapeGeometry::Angle { start, end } => {
                *start += delta;
                *end += delta;
            }
            ShapeGeometry::Circle { center, edge } => {
                *center += delta;
                *edge += delta;
            }
            ShapeGeometry::HorizontalRay { anchor } => *anchor += delta,
            ShapeGeometry::Text(label) => label.center += delta,
        }
        moved
    }

    /// Overwrite one control point. Returns false when `index` is out of range.
    pub fn set_control_point(&mut self, index: usize, point: Vec2) -> bool {
        let slot = match (&mut self.geometry, index) {
            (ShapeGeometry::Trendline { start, .. }, 0)
            | (ShapeGeometry::Rectangle { start, .. }, 0)
            | (ShapeGeometry::Fibonacci { start, .. }, 0)
            | (ShapeGeometry::Angle { start, .. }, 0) => start,
            (ShapeGeometry::Trendline { end, .. }, 1)
            | (ShapeGeometry::Rectangle { end, .. }, 1)
            | (ShapeGeometry::Fibonacci { end, .. }, 1)
            | (ShapeGeometry::Angle { end, .. }, 1) => end,
            (ShapeGeometry::Circle { center, .. }, 0) => center,
            (ShapeGeometry::Circle { edge, .. }, 1) => edge,
            (ShapeGeometry::HorizontalRay { anchor }, 0) => anchor,
            (ShapeGeometry::Text(label), 0) => &mut label.center,
            _ => return false,
        };
        *slot = point;
        true
    }

    /// Drag one control point to `point`.
    ///
    /// Dragging a circle's center moves the whole circle and keeps its radius;
    /// every other handle is a plain [`Shape::set_control_point`].
    pub fn drag_control_point(&mut self, index: usize, point: Vec2) -> bool {
        if let ShapeGeometry::Circle { center, .. } = &self.geometry
            && index == 0
        {
            let delta = point - *center;
            *self = self.translate(delta);
            return true;
        }
        self.set_control_point(index, point)
    }

    /// Set the rotation of a text label. No-op for other kinds.
    pub fn set_rotation(&mut self, degrees: f32) -> bool {
        match &mut self.geometry {
            ShapeGeometry::Text(label) => {
                label.rotation_degrees = degrees;
                true
            }
            _ => false,
        }
    }

    pub fn set_fibonacci_levels(&mut self, new_levels: FibLevels) -> bool {
        match &mut self.geometry {
            ShapeGeometry::Fibonacci { levels, .. } => {
                *levels = new_levels;
                true
            }
            _ => false,
        }
    }
}

/// Vertical position of a retracement level: ratio 1 sits on `start`, 0 on `end`
pub fn fibonacci_level_y(start: Vec2, end: Vec2, ratio: f32) -> f32 {
    end.y + (start.y - end.y) * ratio
}

/// Angle of the segment `start`-`end` above the horizontal, in degrees.
///
/// Surface y grows downward, so a segment rising to the right is positive.
pub fn angle_degrees(start: Vec2, end: Vec2) -> f32 {
    (start.y - end.y).atan2(end.x - start.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(center: Vec2, edge: Vec2) -> Shape {
        Shape {
            id: ShapeId(1),
            color: Color::WHITE,
            stroke_width: 2.0,
            geometry: ShapeGeometry::Circle { center, edge },
        }
    }

    fn label(rotation_degrees: f32) -> TextLabel {
        TextLabel {
            center: Vec2::new(100.0, 100.0),
            text: "Breakout".to_string(),
            font_size: 20.0,
            bold: false,
            italic: false,
            rotation_degrees,
        }
    }

    #[test]
    fn test_arity_matches_control_points() {
        let shapes = [
            ShapeGeometry::Trendline { start: Vec2::ZERO, end: Vec2::ONE },
            ShapeGeometry::HorizontalRay { anchor: Vec2::ZERO },
            ShapeGeometry::Rectangle { start: Vec2::ZERO, end: Vec2::ONE },
            ShapeGeometry::Circle { center: Vec2::ZERO, edge: Vec2::ONE },
            ShapeGeometry::Fibonacci {
                start: Vec2::ZERO,
                end: Vec2::ONE,
                levels: FibLevels::default(),
            },
            ShapeGeometry::Angle { start: Vec2::ZERO, end: Vec2::ONE },
            ShapeGeometry::Text(label(0.0)),
        ];
        for geometry in shapes {
            let shape = Shape {
                id: ShapeId(1),
                color: Color::WHITE,
                stroke_width: 1.0,
                geometry,
            };
            assert_eq!(shape.control_points().len(), shape.kind().arity());
        }
    }

    #[test]
    fn test_translate_moves_every_point() {
        let shape = circle(Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0));
        let moved = shape.translate(Vec2::new(5.0, -5.0));
        assert_eq!(moved.control_points(), vec![Vec2::new(15.0, 5.0), Vec2::new(25.0, 5.0)]);
        assert_eq!(moved.id, shape.id);
        // Original is untouched
        assert_eq!(shape.control_point(0), Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_set_control_point_out_of_range() {
        let mut shape = Shape {
            id: ShapeId(1),
            color: Color::WHITE,
            stroke_width: 1.0,
            geometry: ShapeGeometry::HorizontalRay { anchor: Vec2::ZERO },
        };
        assert!(!shape.set_control_point(1, Vec2::ONE));
        assert!(shape.set_control_point(0, Vec2::ONE));
        assert_eq!(shape.control_points(), vec![Vec2::ONE]);
    }

    #[test]
    fn test_drag_circle_center_preserves_radius() {
        let mut shape = circle(Vec2::new(300.0, 100.0), Vec2::new(320.0, 100.0));
        assert!(shape.drag_control_point(0, Vec2::new(350.0, 100.0)));
        assert_eq!(shape.control_points(), vec![Vec2::new(350.0, 100.0), Vec2::new(370.0, 100.0)]);
        assert!((shape.radius().unwrap() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_drag_circle_edge_changes_radius() {
        let mut shape = circle(Vec2::new(300.0, 100.0), Vec2::new(320.0, 100.0));
        assert!(shape.drag_control_point(1, Vec2::new(340.0, 100.0)));
        assert_eq!(shape.control_point(0), Some(Vec2::new(300.0, 100.0)));
        assert!((shape.radius().unwrap() - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_set_rotation_only_for_text() {
        let mut text = Shape {
            id: ShapeId(2),
            color: Color::WHITE,
            stroke_width: 1.0,
            geometry: ShapeGeometry::Text(label(0.0)),
        };
        assert!(text.set_rotation(45.0));
        assert_eq!(text.text().unwrap().rotation_degrees, 45.0);

        let mut c = circle(Vec2::ZERO, Vec2::ONE);
        assert!(!c.set_rotation(45.0));
    }

    #[test]
    fn test_rotation_handle_sits_above_unrotated_label() {
        let handle = label(0.0).rotation_handle();
        assert!((handle.x - 100.0).abs() < 1e-4);
        assert!((handle.y - 70.0).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_handle_follows_rotation() {
        let handle = label(90.0).rotation_handle();
        assert!((handle.x - 130.0).abs() < 1e-3);
        assert!((handle.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_fibonacci_level_y() {
        let start = Vec2::new(0.0, 400.0);
        let end = Vec2::new(100.0, 200.0);
        assert_eq!(fibonacci_level_y(start, end, 0.0), 200.0);
        assert_eq!(fibonacci_level_y(start, end, 1.0), 400.0);
        assert_eq!(fibonacci_level_y(start, end, 0.5), 300.0);
    }

    #[test]
    fn test_angle_degrees_rising_is_positive() {
        let a = angle_degrees(Vec2::new(0.0, 100.0), Vec2::new(100.0, 0.0));
        assert!((a - 45.0).abs() < 1e-4);
        let b = angle_degrees(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        assert!((b + 45.0).abs() < 1e-4);
    }
}
