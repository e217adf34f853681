//! SystemParam bundles shared by the editor's input systems.
//!
//! - [`CameraParams`]: camera and window access for cursor-to-world conversion
//! - [`is_cursor_over_ui`]: check if the cursor is over egui UI (for input gating)

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::background::Canvas;
use super::camera::EditorCamera;

/// Bundled camera and window queries for cursor-to-world calculations
#[derive(SystemParam)]
pub struct CameraParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub camera: Query<
        'w,
        's,
        (&'static Camera, &'static GlobalTransform, &'static Projection),
        With<EditorCamera>,
    >,
}

impl CameraParams<'_, '_> {
    /// Get the world position of the cursor, if available
    pub fn cursor_world_pos(&self) -> Option<Vec2> {
        let window = self.window.single().ok()?;
        let (camera, transform, _) = self.camera.single().ok()?;
        let cursor_pos = window.cursor_position()?;
        camera.viewport_to_world_2d(transform, cursor_pos).ok()
    }

    /// Cursor position in canvas surface coordinates.
    ///
    /// The camera projection already applies the display-to-logical scale.
    pub fn cursor_surface_pos(&self, canvas: &Canvas) -> Option<Vec2> {
        self.cursor_world_pos()
            .map(|world| canvas.world_to_surface(world))
    }

    /// Screen position of a surface point, for egui overlays
    pub fn surface_to_screen(&self, canvas: &Canvas, surface: Vec2) -> Option<Vec2> {
        let (camera, transform, _) = self.camera.single().ok()?;
        let world = canvas.surface_to_world(surface);
        camera.world_to_viewport(transform, world.extend(0.0)).ok()
    }

    /// Orthographic scale of the editor camera (world units per screen pixel)
    pub fn zoom_scale(&self) -> f32 {
        self.camera
            .single()
            .ok()
            .and_then(|(_, _, proj)| {
                if let Projection::Orthographic(ortho) = proj {
                    Some(ortho.scale)
                } else {
                    None
                }
            })
            .unwrap_or(1.0)
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
