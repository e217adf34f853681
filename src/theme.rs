//! Centralized color theme for the application.
//!
//! Colors used by the board renderer and the egui panels live here.

use bevy::color::Alpha;
use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Canvas Colors
// ============================================================================

/// Frame drawn around the canvas when no chart image is loaded
pub const PLACEHOLDER_FRAME: Color = Color::srgba(0.6, 0.6, 0.6, 0.8);

/// Faint cross-hatching inside the placeholder frame
pub const PLACEHOLDER_GRID: Color = Color::srgba(0.5, 0.5, 0.5, 0.15);

/// Spacing of the placeholder grid in surface units
pub const PLACEHOLDER_GRID_SPACING: f32 = 100.0;

// ============================================================================
// Selection Colors
// ============================================================================

/// Fill of control-point handles
pub const HANDLE_FILL: egui::Color32 = egui::Color32::WHITE;

/// Outline of control-point handles
pub const HANDLE_OUTLINE: egui::Color32 = egui::Color32::from_rgb(51, 153, 255);

/// Rotation handle and its connector line
pub const ROTATION_HANDLE: egui::Color32 = egui::Color32::from_rgb(255, 179, 51);

/// Opacity multiplier for the shape being drawn
pub const DRAFT_ALPHA: f32 = 0.7;

// ============================================================================
// Annotation Colors
// ============================================================================

/// Annotation color palette for the toolbar picker
pub fn annotation_colors() -> [(Color, &'static str); 8] {
    [
        (Color::srgb(0.16, 0.38, 1.0), "Blue"),
        (Color::srgb(0.94, 0.27, 0.27), "Red"),
        (Color::srgb(0.13, 0.77, 0.37), "Green"),
        (Color::srgb(0.98, 0.58, 0.09), "Orange"),
        (Color::srgb(0.66, 0.33, 0.97), "Purple"),
        (Color::srgb(0.98, 0.8, 0.08), "Yellow"),
        (Color::srgb(1.0, 1.0, 1.0), "White"),
        (Color::srgb(0.0, 0.0, 0.0), "Black"),
    ]
}

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Dark grey panel background (tool settings bar)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// White for selected swatch borders
    pub const SELECTED_BORDER: egui::Color32 = egui::Color32::WHITE;

    /// Dark grey for unselected swatch borders
    pub const UNSELECTED_BORDER: egui::Color32 = egui::Color32::DARK_GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Semi-transparent black overlay for modal dialogs
    pub const MODAL_OVERLAY: egui::Color32 = egui::Color32::from_black_alpha(100);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (preserving alpha)
pub fn bevy_to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0).round() as u8,
        (srgba.green * 255.0).round() as u8,
        (srgba.blue * 255.0).round() as u8,
        (srgba.alpha * 255.0).round() as u8,
    )
}

/// Convert an egui Color32 to Bevy Color
pub fn egui_to_bevy(color: egui::Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::srgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}

/// Bevy color with its alpha scaled by `factor`
pub fn fade(color: Color, factor: f32) -> Color {
    let alpha = color.alpha();
    color.with_alpha(alpha * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bevy_to_egui_opaque_colors() {
        assert_eq!(bevy_to_egui(Color::WHITE), egui::Color32::WHITE);
        assert_eq!(bevy_to_egui(Color::BLACK), egui::Color32::BLACK);
    }

    #[test]
    fn test_egui_to_bevy_round_trip() {
        let original = egui::Color32::from_rgb(40, 97, 255);
        assert_eq!(bevy_to_egui(egui_to_bevy(original)), original);
    }

    #[test]
    fn test_fade_scales_alpha() {
        let faded = fade(Color::srgba(1.0, 0.0, 0.0, 0.8), 0.5);
        assert!((faded.alpha() - 0.4).abs() < 1e-6);
    }
}
