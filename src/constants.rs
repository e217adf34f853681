//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Logical canvas width used when no background image is loaded
pub const DEFAULT_CANVAS_WIDTH: f32 = 1200.0;

/// Logical canvas height used when no background image is loaded
pub const DEFAULT_CANVAS_HEIGHT: f32 = 800.0;

/// Distance (surface units) within which the pointer counts as touching a shape
pub const HIT_TOLERANCE: f32 = 10.0;

/// Hit radius of resize and rotate handles. Smaller than [`HIT_TOLERANCE`]
/// because handles are drawn as small targets.
pub const HANDLE_RADIUS: f32 = 8.0;

/// Two-point drafts shorter than this are treated as accidental clicks
pub const MIN_DRAFT_DISTANCE: f32 = 5.0;

/// Extra gap between a text label's font box and its rotation handle
pub const ROTATION_HANDLE_GAP: f32 = 10.0;

/// Ratios of the default fibonacci retracement level set
pub const DEFAULT_FIBONACCI_RATIOS: [f32; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];
