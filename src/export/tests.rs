//! Unit tests for the export module.

use bevy::prelude::*;
use std::path::{Path, PathBuf};

use super::helpers::{array_to_color, color_to_array, with_json_extension};
use super::resources::{AsyncExportOperation, ExportError};
use super::saved::{FORMAT_VERSION, SavedAnnotations, SavedGeometry};
use crate::annotations::{
    FibLevels, Shape, ShapeGeometry, ShapeId, ShapeKind, TextLabel, ToolSettings, create_draft,
};

fn sample_shapes() -> Vec<Shape> {
    let settings = ToolSettings {
        color: Color::srgba(0.2, 0.4, 0.6, 0.8),
        ..default()
    };
    let mut fib = create_draft(ShapeId(3), ShapeKind::Fibonacci, Vec2::new(0.0, 400.0), &settings);
    fib.set_control_point(1, Vec2::new(300.0, 100.0));
    let mut levels = FibLevels::default();
    levels.add(1.618);
    levels.toggle(0.0);
    fib.set_fibonacci_levels(levels);

    vec![
        Shape {
            id: ShapeId(1),
            color: Color::srgb(1.0, 0.0, 0.0),
            stroke_width: 2.5,
            geometry: ShapeGeometry::Trendline {
                start: Vec2::new(100.0, 100.0),
                end: Vec2::new(300.0, 100.0),
            },
        },
        Shape {
            id: ShapeId(2),
            color: Color::srgb(0.0, 1.0, 0.0),
            stroke_width: 1.0,
            geometry: ShapeGeometry::HorizontalRay {
                anchor: Vec2::new(40.0, 250.5),
            },
        },
        fib,
        Shape {
            id: ShapeId(4),
            color: Color::WHITE,
            stroke_width: 1.0,
            geometry: ShapeGeometry::Text(TextLabel {
                center: Vec2::new(500.0, 80.0),
                text: "Double top".to_string(),
                font_size: 18.0,
                bold: true,
                italic: false,
                rotation_degrees: -15.0,
            }),
        },
    ]
}

#[test]
fn test_export_preserves_every_shape() {
    let shapes = sample_shapes();
    let saved = SavedAnnotations::new(
        Vec2::new(1200.0, 800.0),
        Some(PathBuf::from("chart.png")),
        &shapes,
    );

    let json = serde_json::to_string_pretty(&saved).unwrap();
    let parsed: SavedAnnotations = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.canvas_size, Vec2::new(1200.0, 800.0));
    assert_eq!(parsed.background, Some(PathBuf::from("chart.png")));
    assert_eq!(parsed.into_shapes(), shapes);
}

#[test]
fn test_kind_tag_is_snake_case() {
    let saved = SavedAnnotations::new(Vec2::ONE, None, &sample_shapes());
    let json = serde_json::to_string(&saved).unwrap();
    assert!(json.contains("\"kind\":\"horizontal_ray\""));
    assert!(json.contains("\"kind\":\"fibonacci\""));
}

#[test]
fn test_minimal_file_uses_defaults() {
    let json = r#"{
        "canvas_size": [800.0, 600.0],
        "shapes": [
            { "id": 9, "color": [1.0, 1.0, 1.0, 1.0], "stroke_width": 1.0,
              "kind": "fibonacci", "start": [0.0, 0.0], "end": [10.0, 10.0] },
            { "id": 10, "color": [1.0, 1.0, 1.0, 1.0], "stroke_width": 1.0,
              "kind": "text", "center": [5.0, 5.0], "text": "Hi", "font_size": 12.0 }
        ]
    }"#;
    let parsed: SavedAnnotations = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.version, FORMAT_VERSION);
    assert!(parsed.background.is_none());

    match &parsed.shapes[0].geometry {
        SavedGeometry::Fibonacci { levels, .. } => assert_eq!(levels, &FibLevels::default()),
        other => panic!("expected fibonacci, got {:?}", other),
    }

    let shapes = parsed.into_shapes();
    let label = shapes[1].text().unwrap();
    assert!(!label.bold);
    assert_eq!(label.rotation_degrees, 0.0);
}

#[test]
fn test_unknown_kind_is_rejected() {
    let json = r#"{ "canvas_size": [1.0, 1.0], "shapes": [
        { "id": 1, "color": [1.0, 1.0, 1.0, 1.0], "stroke_width": 1.0,
          "kind": "pitchfork", "start": [0.0, 0.0] } ] }"#;
    assert!(serde_json::from_str::<SavedAnnotations>(json).is_err());
}

#[test]
fn test_color_roundtrip() {
    let original = Color::srgba(0.2, 0.4, 0.6, 0.8);
    let recovered = array_to_color(color_to_array(original)).to_srgba();
    let original = original.to_srgba();

    assert!((original.red - recovered.red).abs() < 0.001);
    assert!((original.green - recovered.green).abs() < 0.001);
    assert!((original.blue - recovered.blue).abs() < 0.001);
    assert!((original.alpha - recovered.alpha).abs() < 0.001);
}

#[test]
fn test_with_json_extension() {
    assert_eq!(
        with_json_extension(Path::new("out/chart")),
        PathBuf::from("out/chart.json")
    );
    assert_eq!(
        with_json_extension(Path::new("out/chart.JSON")),
        PathBuf::from("out/chart.JSON")
    );
    assert_eq!(
        with_json_extension(Path::new("chart.v2")),
        PathBuf::from("chart.v2.json")
    );
}

#[test]
fn test_resource_defaults() {
    assert!(ExportError::default().message.is_none());
    assert!(!AsyncExportOperation::default().is_busy());
}
