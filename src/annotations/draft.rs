//! In-progress shapes created by drawing gestures.

use bevy::prelude::*;

use crate::constants::MIN_DRAFT_DISTANCE;

use super::fibonacci::FibLevels;
use super::shape::{Shape, ShapeGeometry, ShapeId, ShapeKind, TextLabel};

/// Tool settings copied into every new shape at creation time
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ToolSettings {
    pub color: Color,
    pub stroke_width: f32,
    pub font_size: f32,
    pub text_bold: bool,
    pub text_italic: bool,
    pub fibonacci_levels: FibLevels,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            color: Color::srgb(0.16, 0.38, 1.0),
            stroke_width: 2.0,
            font_size: 16.0,
            text_bold: false,
            text_italic: false,
            fibonacci_levels: FibLevels::default(),
        }
    }
}

/// Start a new shape of `kind` at `first`.
///
/// Two-point kinds begin with both points on `first`; text labels begin empty.
pub fn create_draft(id: ShapeId, kind: ShapeKind, first: Vec2, settings: &ToolSettings) -> Shape {
    let geometry = match kind {
        ShapeKind::Trendline => ShapeGeometry::Trendline {
            start: first,
            end: first,
        },
        ShapeKind::HorizontalRay => ShapeGeometry::HorizontalRay { anchor: first },
        ShapeKind::Rectangle => ShapeGeometry::Rectangle {
            start: first,
            end: first,
        },
        ShapeKind::Circle => ShapeGeometry::Circle {
            center: first,
            edge: first,
        },
        ShapeKind::Fibonacci => ShapeGeometry::Fibonacci {
            start: first,
            end: first,
            levels: settings.fibonacci_levels.clone(),
        },
        ShapeKind::Angle => ShapeGeometry::Angle {
            start: first,
            end: first,
        },
        ShapeKind::Text => ShapeGeometry::Text(TextLabel {
            center: first,
            text: String::new(),
            font_size: settings.font_size,
            bold: settings.text_bold,
            italic: settings.text_italic,
            rotation_degrees: 0.0,
        }),
    };

    Shape {
        id,
        color: settings.color,
        stroke_width: settings.stroke_width,
        geometry,
    }
}

/// Build a complete text label in one step
pub fn create_text(id: ShapeId, anchor: Vec2, text: &str, settings: &ToolSettings) -> Shape {
    let mut shape = create_draft(id, ShapeKind::Text, anchor, settings);
    if let ShapeGeometry::Text(label) = &mut shape.geometry {
        label.text = text.to_string();
    }
    shape
}

/// Move the second control point of a two-point draft. No-op for one-point kinds.
pub fn extend_draft(draft: &mut Shape, second: Vec2) {
    if draft.kind().arity() == 2 {
        draft.set_control_point(1, second);
    }
}

/// Two-point drafts must span at least [`MIN_DRAFT_DISTANCE`]; text needs content.
pub fn is_draft_valid(draft: &Shape) -> bool {
    match &draft.geometry {
        ShapeGeometry::Trendline { start, end }
        | ShapeGeometry::Rectangle { start, end }
        | ShapeGeometry::Fibonacci { start, end, .. }
        | ShapeGeometry::Angle { start, end } => start.distance(*end) >= MIN_DRAFT_DISTANCE,
        ShapeGeometry::Circle { center, edge } => center.distance(*edge) >= MIN_DRAFT_DISTANCE,
        ShapeGeometry::HorizontalRay { .. } => true,
        ShapeGeometry::Text(label) => !label.text.trim().is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_POINT_KINDS: [ShapeKind; 5] = [
        ShapeKind::Trendline,
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::Fibonacci,
        ShapeKind::Angle,
    ];

    #[test]
    fn test_draft_copies_settings() {
        let settings = ToolSettings {
            color: Color::srgb(1.0, 0.0, 0.0),
            stroke_width: 4.0,
            ..default()
        };
        let draft = create_draft(ShapeId(7), ShapeKind::Trendline, Vec2::ZERO, &settings);
        assert_eq!(draft.id, ShapeId(7));
        assert_eq!(draft.color, settings.color);
        assert_eq!(draft.stroke_width, 4.0);
    }

    #[test]
    fn test_fibonacci_draft_clones_default_levels() {
        let mut settings = ToolSettings::default();
        settings.fibonacci_levels.add(1.618);
        let draft = create_draft(ShapeId(1), ShapeKind::Fibonacci, Vec2::ZERO, &settings);
        assert_eq!(draft.fibonacci_levels(), Some(&settings.fibonacci_levels));

        // Later edits to the defaults don't leak into the draft
        settings.fibonacci_levels.remove(1.618);
        assert!(draft.fibonacci_levels().unwrap().contains(1.618));
    }

    #[test]
    fn test_short_drafts_are_rejected_for_every_two_point_kind() {
        let settings = ToolSettings::default();
        let start = Vec2::new(100.0, 100.0);
        for kind in TWO_POINT_KINDS {
            let mut draft = create_draft(ShapeId(1), kind, start, &settings);
            assert!(!is_draft_valid(&draft), "{:?} without extension", kind);

            extend_draft(&mut draft, start + Vec2::new(MIN_DRAFT_DISTANCE - 0.5, 0.0));
            assert!(!is_draft_valid(&draft), "{:?} below threshold", kind);

            extend_draft(&mut draft, start + Vec2::new(MIN_DRAFT_DISTANCE + 0.5, 0.0));
            assert!(is_draft_valid(&draft), "{:?} above threshold", kind);
        }
    }

    #[test]
    fn test_extend_is_noop_for_one_point_kinds() {
        let settings = ToolSettings::default();
        let mut ray = create_draft(ShapeId(1), ShapeKind::HorizontalRay, Vec2::ZERO, &settings);
        extend_draft(&mut ray, Vec2::new(50.0, 50.0));
        assert_eq!(ray.control_points(), vec![Vec2::ZERO]);
        assert!(is_draft_valid(&ray));
    }

    #[test]
    fn test_text_requires_content() {
        let settings = ToolSettings::default();
        assert!(!is_draft_valid(&create_text(ShapeId(1), Vec2::ZERO, "   ", &settings)));
        let text = create_text(ShapeId(1), Vec2::ZERO, "Support", &settings);
        assert!(is_draft_valid(&text));
        assert_eq!(text.text().unwrap().font_size, settings.font_size);
    }
}
