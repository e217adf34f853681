//! Unit tests for the board.

use bevy::prelude::*;

use super::Board;
use crate::annotations::{FibLevels, Handle, ShapeGeometry, ShapeId, ShapeKind, ToolSettings};
use crate::common::DragMode;
use crate::editor::interaction::PointerDown;
use crate::editor::tools::ChartTool;

fn draw(board: &mut Board, tool: ChartTool, from: Vec2, to: Vec2) -> bool {
    let settings = ToolSettings::default();
    assert!(board.set_tool(tool));
    assert_eq!(board.pointer_down(&settings, from), PointerDown::DrawingStarted);
    board.pointer_move(to);
    board.pointer_up(to)
}

/// Trendline (100,100)-(300,100) under a circle centered at (300,100) with radius 20
fn trendline_and_circle() -> Board {
    let mut board = Board::default();
    assert!(draw(
        &mut board,
        ChartTool::Trendline,
        Vec2::new(100.0, 100.0),
        Vec2::new(300.0, 100.0)
    ));
    assert!(draw(
        &mut board,
        ChartTool::Circle,
        Vec2::new(300.0, 100.0),
        Vec2::new(320.0, 100.0)
    ));
    board.set_tool(ChartTool::Select);
    board
}

fn click(board: &mut Board, pos: Vec2) -> PointerDown {
    let result = board.pointer_down(&ToolSettings::default(), pos);
    board.pointer_up(pos);
    result
}

#[test]
fn test_click_resolves_topmost_shape() {
    let mut board = trendline_and_circle();
    let circle = board.shapes()[1].id;

    assert_eq!(click(&mut board, Vec2::new(300.0, 100.0)), PointerDown::Selected(circle));
    assert_eq!(board.selected(), Some(circle));
}

#[test]
fn test_drag_circle_center_handle_preserves_radius() {
    let mut board = trendline_and_circle();
    let settings = ToolSettings::default();
    let circle = board.shapes()[1].id;
    click(&mut board, Vec2::new(300.0, 100.0));

    assert_eq!(
        board.pointer_down(&settings, Vec2::new(300.0, 100.0)),
        PointerDown::Resizing(circle, Handle::Start)
    );
    board.pointer_move(Vec2::new(325.0, 100.0));
    assert!(board.pointer_up(Vec2::new(350.0, 100.0)));

    let shape = board.shape(circle).unwrap();
    assert_eq!(
        shape.control_points(),
        vec![Vec2::new(350.0, 100.0), Vec2::new(370.0, 100.0)]
    );
    assert!((shape.radius().unwrap() - 20.0).abs() < 1e-4);
}

#[test]
fn test_drag_circle_edge_handle_changes_radius() {
    let mut board = trendline_and_circle();
    let settings = ToolSettings::default();
    let circle = board.shapes()[1].id;
    click(&mut board, Vec2::new(300.0, 100.0));

    assert_eq!(
        board.pointer_down(&settings, Vec2::new(320.0, 100.0)),
        PointerDown::Resizing(circle, Handle::End)
    );
    board.pointer_up(Vec2::new(340.0, 100.0));

    let shape = board.shape(circle).unwrap();
    assert_eq!(shape.control_point(0), Some(Vec2::new(300.0, 100.0)));
    assert!((shape.radius().unwrap() - 40.0).abs() < 1e-4);
}

#[test]
fn test_history_cursor_and_branch_truncation() {
    let mut board = trendline_and_circle();
    assert_eq!(board.history().cursor(), 2);
    assert_eq!(board.history().len(), 3);

    assert!(board.undo());
    assert_eq!(board.history().cursor(), 1);
    assert_eq!(board.shapes().len(), 1);
    assert_eq!(board.shapes()[0].kind(), ShapeKind::Trendline);
    assert!(board.can_redo());

    assert!(draw(
        &mut board,
        ChartTool::Rectangle,
        Vec2::new(400.0, 400.0),
        Vec2::new(500.0, 450.0)
    ));
    assert!(!board.can_redo());
    assert!(!board.redo());
    assert_eq!(board.history().len(), 3);
    assert!(board.shapes().iter().all(|s| s.kind() != ShapeKind::Circle));
}

#[test]
fn test_undo_all_then_redo_all_restores_collection() {
    let mut board = trendline_and_circle();
    let settings = ToolSettings::default();

    // Move the trendline
    board.pointer_down(&settings, Vec2::new(150.0, 100.0));
    board.pointer_up(Vec2::new(150.0, 160.0));
    // Add and then delete a ray
    draw(
        &mut board,
        ChartTool::HorizontalRay,
        Vec2::new(10.0, 600.0),
        Vec2::new(10.0, 600.0),
    );
    board.set_tool(ChartTool::Select);
    click(&mut board, Vec2::new(900.0, 600.0));
    assert!(board.delete_selected());

    let final_shapes = board.snapshot();
    let commits = board.history().cursor();
    assert_eq!(commits, 5);

    for _ in 0..commits {
        assert!(board.undo());
    }
    assert!(board.shapes().is_empty());
    assert!(!board.undo());

    for _ in 0..commits {
        assert!(board.redo());
    }
    assert_eq!(board.snapshot(), final_shapes);
}

#[test]
fn test_move_is_incremental_and_one_history_entry() {
    let mut board = trendline_and_circle();
    let settings = ToolSettings::default();
    let trendline = board.shapes()[0].id;
    let before = board.history().len();

    board.pointer_down(&settings, Vec2::new(150.0, 100.0));
    board.pointer_move(Vec2::new(160.0, 110.0));
    board.pointer_move(Vec2::new(170.0, 120.0));
    assert!(board.pointer_up(Vec2::new(170.0, 120.0)));

    assert_eq!(
        board.shape(trendline).unwrap().control_points(),
        vec![Vec2::new(120.0, 120.0), Vec2::new(320.0, 120.0)]
    );
    assert_eq!(board.history().len(), before + 1);
}

#[test]
fn test_zero_movement_gesture_does_not_commit() {
    let mut board = trendline_and_circle();
    let before = board.history().len();
    click(&mut board, Vec2::new(150.0, 100.0));
    assert_eq!(board.history().len(), before);
    assert!(board.selected().is_some());
}

#[test]
fn test_degenerate_draft_is_discarded() {
    let mut board = Board::default();
    assert!(!draw(
        &mut board,
        ChartTool::Rectangle,
        Vec2::new(10.0, 10.0),
        Vec2::new(12.0, 11.0)
    ));
    assert!(board.shapes().is_empty());
    assert_eq!(board.history().len(), 1);
    assert!(board.is_idle());
}

#[test]
fn test_commands_rejected_mid_gesture() {
    let mut board = trendline_and_circle();
    let settings = ToolSettings::default();
    click(&mut board, Vec2::new(150.0, 100.0));

    board.pointer_down(&settings, Vec2::new(200.0, 100.0));
    assert!(!board.is_idle());
    assert!(!board.set_tool(ChartTool::Rectangle));
    assert!(!board.undo());
    assert!(!board.delete_selected());
    assert!(!board.clear_all());
    assert_eq!(board.pointer_down(&settings, Vec2::ZERO), PointerDown::Ignored);
    assert_eq!(board.tool(), ChartTool::Select);
    assert_eq!(board.shapes().len(), 2);
}

#[test]
fn test_cancel_ends_gesture_like_release() {
    let mut board = trendline_and_circle();
    let settings = ToolSettings::default();
    let trendline = board.shapes()[0].id;

    board.pointer_down(&settings, Vec2::new(150.0, 100.0));
    board.pointer_move(Vec2::new(150.0, 130.0));
    assert!(board.pointer_cancel());
    assert!(board.is_idle());
    assert_eq!(
        board.shape(trendline).unwrap().control_point(0),
        Some(Vec2::new(100.0, 130.0))
    );
}

#[test]
fn test_switching_tool_clears_selection() {
    let mut board = trendline_and_circle();
    click(&mut board, Vec2::new(150.0, 100.0));
    assert!(board.selected().is_some());

    board.set_tool(ChartTool::Angle);
    assert!(board.selected().is_none());
}

#[test]
fn test_undo_and_redo_clear_selection() {
    let mut board = trendline_and_circle();
    let trendline = board.shapes()[0].id;

    assert_eq!(
        click(&mut board, Vec2::new(150.0, 100.0)),
        PointerDown::Selected(trendline)
    );
    assert!(board.undo());
    assert_eq!(board.selected(), None);

    // The trendline survives undoing the circle
    assert_eq!(
        click(&mut board, Vec2::new(150.0, 100.0)),
        PointerDown::Selected(trendline)
    );
    assert!(board.redo());
    assert_eq!(board.selected(), None);
    assert_eq!(board.shapes().len(), 2);
}

#[test]
fn test_click_on_empty_space_deselects() {
    let mut board = trendline_and_circle();
    click(&mut board, Vec2::new(150.0, 100.0));
    assert_eq!(click(&mut board, Vec2::new(700.0, 700.0)), PointerDown::Deselected);
    assert!(board.selected().is_none());
}

#[test]
fn test_text_tool_requests_content_then_places_label() {
    let mut board = Board::default();
    let settings = ToolSettings::default();
    board.set_tool(ChartTool::Text);

    let anchor = Vec2::new(100.0, 100.0);
    assert_eq!(board.pointer_down(&settings, anchor), PointerDown::TextRequested(anchor));
    assert!(board.is_idle());

    assert_eq!(board.place_text(&settings, anchor, "  "), None);
    assert_eq!(board.history().len(), 1);

    let id = board.place_text(&settings, anchor, "Breakout").unwrap();
    assert_eq!(board.shape(id).unwrap().text().unwrap().text, "Breakout");
    assert_eq!(board.history().len(), 2);
}

#[test]
fn test_rotate_text_label() {
    let mut board = Board::default();
    let settings = ToolSettings {
        font_size: 20.0,
        ..default()
    };
    let id = board
        .place_text(&settings, Vec2::new(100.0, 100.0), "Support")
        .unwrap();
    board.set_tool(ChartTool::Select);
    click(&mut board, Vec2::new(100.0, 100.0));

    // Rotation handle sits font_size + 10 above the center
    assert_eq!(
        board.pointer_down(&settings, Vec2::new(100.0, 70.0)),
        PointerDown::Rotating(id)
    );
    assert_eq!(board.hover_mode(Vec2::ZERO), DragMode::Rotate);
    assert!(board.pointer_up(Vec2::new(130.0, 100.0)));

    let rotation = board.shape(id).unwrap().text().unwrap().rotation_degrees;
    assert!((rotation - 90.0).abs() < 1e-3);
}

#[test]
fn test_fibonacci_levels_of_selected_shape() {
    let mut board = Board::default();
    draw(
        &mut board,
        ChartTool::Fibonacci,
        Vec2::new(0.0, 400.0),
        Vec2::new(200.0, 200.0),
    );
    board.set_tool(ChartTool::Select);
    assert!(!board.set_selected_fibonacci_levels(FibLevels::default()));

    click(&mut board, Vec2::new(100.0, 300.0));
    let mut levels = FibLevels::default();
    levels.add(1.618);
    assert!(board.set_selected_fibonacci_levels(levels.clone()));
    assert_eq!(board.shapes()[0].fibonacci_levels(), Some(&levels));

    assert!(board.undo());
    assert_eq!(board.shapes()[0].fibonacci_levels(), Some(&FibLevels::default()));
}

#[test]
fn test_clear_all_is_undoable() {
    let mut board = trendline_and_circle();
    assert!(board.clear_all());
    assert!(board.shapes().is_empty());
    assert!(!board.clear_all());
    assert!(board.undo());
    assert_eq!(board.shapes().len(), 2);
}

#[test]
fn test_replace_shapes_assigns_fresh_ids() {
    let mut board = trendline_and_circle();
    let mut imported = board.snapshot();
    imported.extend(board.snapshot());

    assert!(board.replace_shapes(imported));
    let mut ids: Vec<ShapeId> = board.shapes().iter().map(|s| s.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 4);
    assert!(board.undo());
    assert_eq!(board.shapes().len(), 2);
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let board = trendline_and_circle();
    let ids: Vec<ShapeId> = board.shapes().iter().map(|s| s.id).collect();
    assert!(ids[0] < ids[1]);
}

#[test]
fn test_hover_mode() {
    let mut board = trendline_and_circle();
    assert_eq!(board.hover_mode(Vec2::new(150.0, 100.0)), DragMode::Move);
    assert_eq!(board.hover_mode(Vec2::new(700.0, 700.0)), DragMode::None);

    click(&mut board, Vec2::new(150.0, 100.0));
    assert_eq!(board.hover_mode(Vec2::new(100.0, 100.0)), DragMode::Resize);

    board.set_tool(ChartTool::Trendline);
    assert_eq!(board.hover_mode(Vec2::new(150.0, 100.0)), DragMode::None);
}

#[test]
fn test_paint_ops_include_live_draft() {
    use crate::editor::paint::{Background, PaintOp};

    let mut board = trendline_and_circle();
    board.set_tool(ChartTool::Angle);
    board.pointer_down(&ToolSettings::default(), Vec2::new(10.0, 10.0));
    board.pointer_move(Vec2::new(60.0, 10.0));

    let ops = board.paint_ops(Background {
        size: Vec2::new(1200.0, 800.0),
        placeholder: false,
    });
    assert_eq!(ops.len(), 4);
    match ops[3] {
        PaintOp::Draft(draft) => {
            assert!(matches!(draft.geometry, ShapeGeometry::Angle { end, .. } if end == Vec2::new(60.0, 10.0)));
        }
        other => panic!("expected draft, got {:?}", other),
    }
}
