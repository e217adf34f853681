//! Plain-data snapshot of the shape collection written to disk.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::annotations::{FibLevels, Shape, ShapeGeometry, ShapeId, TextLabel};

use super::helpers::{array_to_color, color_to_array};

/// Current version of the export format
pub const FORMAT_VERSION: u32 = 1;

fn default_version() -> u32 {
    FORMAT_VERSION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAnnotations {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Logical canvas size the coordinates refer to
    pub canvas_size: Vec2,
    /// Background image the shapes were drawn over
    #[serde(default)]
    pub background: Option<PathBuf>,
    pub shapes: Vec<SavedShape>,
}

impl SavedAnnotations {
    pub fn new(canvas_size: Vec2, background: Option<PathBuf>, shapes: &[Shape]) -> Self {
        Self {
            version: FORMAT_VERSION,
            canvas_size,
            background,
            shapes: shapes.iter().map(SavedShape::from).collect(),
        }
    }

    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes.into_iter().map(Shape::from).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedShape {
    pub id: u64,
    pub color: [f32; 4],
    pub stroke_width: f32,
    #[serde(flatten)]
    pub geometry: SavedGeometry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SavedGeometry {
    Trendline {
        start: Vec2,
        end: Vec2,
    },
    HorizontalRay {
        anchor: Vec2,
    },
    Rectangle {
        start: Vec2,
        end: Vec2,
    },
    Circle {
        center: Vec2,
        edge: Vec2,
    },
    Fibonacci {
        start: Vec2,
        end: Vec2,
        #[serde(default)]
        levels: FibLevels,
    },
    Angle {
        start: Vec2,
        end: Vec2,
    },
    Text {
        center: Vec2,
        text: String,
        font_size: f32,
        #[serde(default)]
        bold: bool,
        #[serde(default)]
        italic: bool,
        #[serde(default)]
        rotation_degrees: f32,
    },
}

impl From<&Shape> for SavedShape {
    fn from(shape: &Shape) -> Self {
        let geometry = match &shape.geometry {
            ShapeGeometry::Trendline { start, end } => SavedGeometry::Trendline {
                start: *start,
                end: *end,
            },
            ShapeGeometry::HorizontalRay { anchor } => {
                SavedGeometry::HorizontalRay { anchor: *anchor }
            }
            ShapeGeometry::Rectangle { start, end } => SavedGeometry::Rectangle {
                start: *start,
                end: *end,
            },
            ShapeGeometry::Circle { center, edge } => SavedGeometry::Circle {
                center: *center,
                edge: *edge,
            },
            ShapeGeometry::Fibonacci { start, end, levels } => SavedGeometry::Fibonacci {
                start: *start,
                end: *end,
                levels: levels.clone(),
            },
            ShapeGeometry::Angle { start, end } => SavedGeometry::Angle {
                start: *start,
                end: *end,
            },
            ShapeGeometry::Text(label) => SavedGeometry::Text {
                center: label.center,
                text: label.text.clone(),
                font_size: label.font_size,
                bold: label.bold,
                italic: label.italic,
                rotation_degrees: label.rotation_degrees,
            },
        };

        Self {
            id: shape.id.0,
            color: color_to_array(shape.color),
            stroke_width: shape.stroke_width,
            geometry,
        }
    }
}

impl From<SavedShape> for Shape {
    fn from(saved: SavedShape) -> Self {
        let geometry = match saved.geometry {
            SavedGeometry::Trendline { start, end } => ShapeGeometry::Trendline { start, end },
            SavedGeometry::HorizontalRay { anchor } => ShapeGeometry::HorizontalRay { anchor },
            SavedGeometry::Rectangle { start, end } => ShapeGeometry::Rectangle { start, end },
            SavedGeometry::Circle { center, edge } => ShapeGeometry::Circle { center, edge },
            SavedGeometry::Fibonacci { start, end, levels } => {
                ShapeGeometry::Fibonacci { start, end, levels }
            }
            SavedGeometry::Angle { start, end } => ShapeGeometry::Angle { start, end },
            SavedGeometry::Text {
                center,
                text,
                font_size,
                bold,
                italic,
                rotation_degrees,
            } => ShapeGeometry::Text(TextLabel {
                center,
                text,
                font_size,
                bold,
                italic,
                rotation_degrees,
            }),
        };

        Shape {
            id: ShapeId(saved.id),
            color: array_to_color(saved.color),
            stroke_width: saved.stroke_width,
            geometry,
        }
    }
}
