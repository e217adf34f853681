//! Pure geometry helpers used by hit testing and the interaction code.
//!
//! All coordinates are in surface space: pixels of the logical canvas with
//! the origin at the top-left corner and y growing downward.

use bevy::prelude::*;

/// Axis-aligned rectangle spanned by two corner points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in perimeter order: top-left, top-right, bottom-right, bottom-left
    pub fn corners(&self) -> [Vec2; 4] {
        let min = self.min();
        let max = self.max();
        [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)]
    }
}

pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Check if a point is within `tolerance` of the segment `a`-`b`.
///
/// The projection onto the segment is clamped to [0, 1], so points past the
/// ends are measured against the nearest endpoint.
pub fn point_near_segment(point: Vec2, a: Vec2, b: Vec2, tolerance: f32) -> bool {
    let line_vec = b - a;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 0.0001 {
        // Segment is essentially a point
        return point.distance(a) < tolerance;
    }

    let t = ((point - a).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = a + line_vec * t;

    point.distance(projection) < tolerance
}

/// Infinite horizontal line at height `y`
pub fn point_near_horizontal_line(point: Vec2, y: f32, tolerance: f32) -> bool {
    (point.y - y).abs() < tolerance
}

/// Rotate a point around a center by the given angle (in radians)
pub fn rotate_point(point: Vec2, center: Vec2, angle: f32) -> Vec2 {
    let cos_a = angle.cos();
    let sin_a = angle.sin();
    let translated = point - center;
    Vec2::new(
        translated.x * cos_a - translated.y * sin_a,
        translated.x * sin_a + translated.y * cos_a,
    ) + center
}

/// Check if a point lies inside a box of the given size centered on `center`
/// and rotated by `rotation_degrees` around it.
pub fn point_in_rotated_box(
    point: Vec2,
    center: Vec2,
    width: f32,
    height: f32,
    rotation_degrees: f32,
) -> bool {
    // Bring the point into the box's local frame by undoing the rotation
    let local = rotate_point(point, center, -rotation_degrees.to_radians()) - center;
    local.x.abs() <= width / 2.0 && local.y.abs() <= height / 2.0
}

pub fn point_near_circle_edge(point: Vec2, center: Vec2, radius: f32, tolerance: f32) -> bool {
    (point.distance(center) - radius).abs() < tolerance
}

pub fn normalized_rect(a: Vec2, b: Vec2) -> SurfaceRect {
    let min = a.min(b);
    let max = a.max(b);
    SurfaceRect {
        x: min.x,
        y: min.y,
        width: max.x - min.x,
        height: max.y - min.y,
    }
}

/// Check if a point is near any of the four edges of the rectangle spanned by `a` and `b`
pub fn point_near_rect_perimeter(point: Vec2, a: Vec2, b: Vec2, tolerance: f32) -> bool {
    let corners = normalized_rect(a, b).corners();
    (0..4).any(|i| point_near_segment(point, corners[i], corners[(i + 1) % 4], tolerance))
}
