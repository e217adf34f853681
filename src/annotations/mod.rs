//! Annotation engine primitives: geometry, shapes and hit testing.
//!
//! Nothing in here touches the ECS world. The editor's [`Board`] owns the
//! shape collection and drives these functions from pointer input.
//!
//! ## Module Structure
//!
//! - [`geometry`] - Distance and containment tests in surface space
//! - [`shape`] - Shape model with one geometry variant per kind
//! - [`fibonacci`] - Retracement level sets
//! - [`draft`] - Creating and validating in-progress shapes
//! - [`text_metrics`] - Text width measurement for hit testing
//! - [`hit_testing`] - Resolving pointer positions to shapes and handles
//!
//! ## Coordinates
//!
//! Every point is in surface space: logical canvas pixels with the origin in
//! the top-left corner and y growing downward.
//!
//! [`Board`]: crate::editor::Board

pub mod draft;
pub mod fibonacci;
pub mod geometry;
pub mod hit_testing;
pub mod shape;
pub mod text_metrics;

pub use draft::{ToolSettings, create_draft, create_text, extend_draft, is_draft_valid};
pub use fibonacci::{FibLevel, FibLevels};
pub use hit_testing::{Handle, handle_at, resolve};
pub use shape::{
    Shape, ShapeGeometry, ShapeId, ShapeKind, TextLabel, angle_degrees, fibonacci_level_y,
};
pub use text_metrics::{ApproxTextMetrics, TextMetrics};
