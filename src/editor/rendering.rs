//! Drawing the board's paint operations.
//!
//! The canvas placeholder is drawn with gizmos in world space, underneath
//! everything else. Shapes, the live draft and selection decorations are
//! painted with egui in screen space, so each shape keeps its own stroke
//! width and text labels can rotate.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::annotations::geometry::normalized_rect;
use crate::annotations::{
    FibLevels, Shape, ShapeGeometry, TextLabel, angle_degrees, fibonacci_level_y,
};
use crate::constants::HANDLE_RADIUS;
use crate::theme;

use super::background::Canvas;
use super::board::Board;
use super::paint::{Background, PaintOp};
use super::params::CameraParams;
use super::text_layout::label_job;

/// Size of fibonacci and angle readout labels, in screen points
const LABEL_FONT_SIZE: f32 = 12.0;

/// Gizmo group for the canvas frame
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct CanvasGizmoGroup;

pub fn configure_canvas_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<CanvasGizmoGroup>();
    config.line.width = 1.5;
}

/// Maps surface coordinates to egui screen points.
///
/// Both spaces grow downward, so the mapping is a scale plus an offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    /// Screen position of the surface origin
    pub origin: egui::Pos2,
    /// Surface units per screen point
    pub zoom: f32,
}

impl ScreenTransform {
    pub fn point(&self, surface: Vec2) -> egui::Pos2 {
        self.origin + egui::vec2(surface.x, surface.y) / self.zoom
    }

    pub fn length(&self, surface: f32) -> f32 {
        surface / self.zoom
    }
}

pub fn draw_canvas_frame(
    mut gizmos: Gizmos<CanvasGizmoGroup>,
    board: Res<Board>,
    canvas: Res<Canvas>,
) {
    for op in board.paint_ops(canvas.background()) {
        if let PaintOp::Background(background) = op {
            draw_placeholder(&mut gizmos, background);
        }
    }
}

fn draw_placeholder(gizmos: &mut Gizmos<CanvasGizmoGroup>, background: Background) {
    if !background.placeholder {
        return;
    }

    let half = background.size / 2.0;
    let spacing = theme::PLACEHOLDER_GRID_SPACING;

    let mut x = -half.x + spacing;
    while x < half.x {
        gizmos.line_2d(
            Vec2::new(x, -half.y),
            Vec2::new(x, half.y),
            theme::PLACEHOLDER_GRID,
        );
        x += spacing;
    }

    let mut y = -half.y + spacing;
    while y < half.y {
        gizmos.line_2d(
            Vec2::new(-half.x, y),
            Vec2::new(half.x, y),
            theme::PLACEHOLDER_GRID,
        );
        y += spacing;
    }

    gizmos.rect_2d(
        Isometry2d::IDENTITY,
        background.size,
        theme::PLACEHOLDER_FRAME,
    );
}

/// Paint committed shapes, the draft and selection handles in paint order
pub fn paint_board(
    mut contexts: EguiContexts,
    board: Res<Board>,
    canvas: Res<Canvas>,
    camera: CameraParams,
) {
    let Some(origin) = camera.surface_to_screen(&canvas, Vec2::ZERO) else {
        return;
    };
    let view = ScreenTransform {
        origin: egui::pos2(origin.x, origin.y),
        zoom: camera.zoom_scale(),
    };

    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    // Keep shapes out from under the panels
    let painter = ctx
        .layer_painter(egui::LayerId::new(
            egui::Order::Background,
            egui::Id::new("chart_annotations"),
        ))
        .with_clip_rect(ctx.available_rect());

    for op in board.paint_ops(canvas.background()) {
        match op {
            // Drawn by gizmos underneath the egui pass
            PaintOp::Background(_) => {}
            PaintOp::Shape(shape) => paint_shape(&painter, &view, shape, canvas.size.x, 1.0),
            PaintOp::Draft(shape) => {
                paint_shape(&painter, &view, shape, canvas.size.x, theme::DRAFT_ALPHA)
            }
            PaintOp::Handle { position, .. } => {
                painter.circle(
                    view.point(position),
                    handle_radius(&view),
                    theme::HANDLE_FILL,
                    egui::Stroke::new(1.5, theme::HANDLE_OUTLINE),
                );
            }
            PaintOp::RotationHandle { pivot, position } => {
                painter.line_segment(
                    [view.point(pivot), view.point(position)],
                    egui::Stroke::new(1.0, theme::ROTATION_HANDLE),
                );
                painter.circle(
                    view.point(position),
                    handle_radius(&view),
                    theme::ROTATION_HANDLE,
                    egui::Stroke::new(1.5, theme::HANDLE_FILL),
                );
            }
        }
    }
}

fn handle_radius(view: &ScreenTransform) -> f32 {
    view.length(HANDLE_RADIUS * 0.6).clamp(3.0, 8.0)
}

/// Ends of a horizontal ray as drawn: the full canvas width at the anchor's
/// height, which is the same line clicks are tested against
fn ray_span(anchor: Vec2, canvas_width: f32) -> [Vec2; 2] {
    [
        Vec2::new(anchor.x.min(0.0), anchor.y),
        Vec2::new(anchor.x.max(canvas_width), anchor.y),
    ]
}

fn paint_shape(
    painter: &egui::Painter,
    view: &ScreenTransform,
    shape: &Shape,
    canvas_width: f32,
    alpha: f32,
) {
    let color = theme::bevy_to_egui(theme::fade(shape.color, alpha));
    let stroke = egui::Stroke::new(view.length(shape.stroke_width).max(1.0), color);

    match &shape.geometry {
        ShapeGeometry::Trendline { start, end } => {
            painter.line_segment([view.point(*start), view.point(*end)], stroke);
        }
        ShapeGeometry::HorizontalRay { anchor } => {
            let [left, right] = ray_span(*anchor, canvas_width);
            painter.line_segment([view.point(left), view.point(right)], stroke);
        }
        ShapeGeometry::Rectangle { start, end } => {
            let rect = normalized_rect(*start, *end);
            painter.rect_stroke(
                egui::Rect::from_two_pos(view.point(rect.min()), view.point(rect.max())),
                0.0,
                stroke,
                egui::StrokeKind::Middle,
            );
        }
        ShapeGeometry::Circle { center, edge } => {
            painter.circle_stroke(
                view.point(*center),
                view.length(center.distance(*edge)),
                stroke,
            );
        }
        ShapeGeometry::Fibonacci { start, end, levels } => {
            paint_fibonacci(painter, view, *start, *end, levels, stroke);
        }
        ShapeGeometry::Angle { start, end } => {
            paint_angle(painter, view, *start, *end, stroke);
        }
        ShapeGeometry::Text(label) => paint_text(painter, view, label, color),
    }
}

fn paint_fibonacci(
    painter: &egui::Painter,
    view: &ScreenTransform,
    start: Vec2,
    end: Vec2,
    levels: &FibLevels,
    stroke: egui::Stroke,
) {
    let thin = egui::Stroke::new(1.0, stroke.color);
    painter.extend(egui::Shape::dashed_line(
        &[view.point(start), view.point(end)],
        thin,
        6.0,
        4.0,
    ));

    let left = start.x.min(end.x);
    let right = start.x.max(end.x);
    for level in levels.enabled() {
        let y = fibonacci_level_y(start, end, level.ratio);
        let from = view.point(Vec2::new(left, y));
        painter.line_segment([from, view.point(Vec2::new(right, y))], stroke);
        painter.text(
            from - egui::vec2(4.0, 0.0),
            egui::Align2::RIGHT_CENTER,
            level.label(),
            egui::FontId::proportional(LABEL_FONT_SIZE),
            stroke.color,
        );
    }
}

fn paint_angle(
    painter: &egui::Painter,
    view: &ScreenTransform,
    start: Vec2,
    end: Vec2,
    stroke: egui::Stroke,
) {
    painter.line_segment([view.point(start), view.point(end)], stroke);

    // Horizontal reference the angle is measured from
    let reference = start + Vec2::new(start.distance(end), 0.0);
    painter.extend(egui::Shape::dashed_line(
        &[view.point(start), view.point(reference)],
        egui::Stroke::new(1.0, stroke.color),
        4.0,
        4.0,
    ));

    painter.text(
        view.point(start) + egui::vec2(6.0, -6.0),
        egui::Align2::LEFT_BOTTOM,
        format!("{:.1}°", angle_degrees(start, end)),
        egui::FontId::proportional(LABEL_FONT_SIZE),
        stroke.color,
    );
}

fn paint_text(
    painter: &egui::Painter,
    view: &ScreenTransform,
    label: &TextLabel,
    color: egui::Color32,
) {
    let galley = painter.layout_job(label_job(label, view.length(label.font_size), color));

    // Text shapes rotate around their top-left corner; offset so the label
    // turns around its center instead
    let angle = label.rotation_degrees.to_radians();
    let rotation = egui::emath::Rot2::from_angle(angle);
    let pos = view.point(label.center) + rotation * (-galley.size() / 2.0);

    if label.bold {
        // Faux bold
        let offset = rotation * egui::vec2(0.6, 0.0);
        painter.add(
            egui::epaint::TextShape::new(pos + offset, galley.clone(), color).with_angle(angle),
        );
    }
    painter.add(egui::epaint::TextShape::new(pos, galley, color).with_angle(angle));
}
