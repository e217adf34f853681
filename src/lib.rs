//! Chart annotation editor.
//!
//! [`annotations`] holds the engine primitives (shapes, geometry, hit
//! testing). [`editor`] owns the board, its gestures and history, and the
//! Bevy systems that feed input into it and draw it. The remaining modules
//! are the desktop shell around them.

pub mod annotations;
pub mod common;
pub mod config;
pub mod constants;
pub mod editor;
pub mod export;
pub mod paths;
pub mod theme;
pub mod ui;
