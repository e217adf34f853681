//! Background chart image and the logical canvas it defines.
//!
//! The canvas is centered on the world origin. Shapes live in surface space
//! (origin top-left, y down), so every conversion between the two goes
//! through [`Canvas`].

use std::path::PathBuf;

use bevy::prelude::*;

use crate::config::UpdateLastBackgroundPathRequest;
use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

use super::paint::Background;

/// Logical drawing surface, sized by the background image
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Canvas {
    pub size: Vec2,
    pub image_path: Option<PathBuf>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            size: Vec2::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT),
            image_path: None,
        }
    }
}

impl Canvas {
    pub fn world_to_surface(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x + self.size.x / 2.0, self.size.y / 2.0 - world.y)
    }

    pub fn surface_to_world(&self, surface: Vec2) -> Vec2 {
        Vec2::new(surface.x - self.size.x / 2.0, self.size.y / 2.0 - surface.y)
    }

    /// Whether a surface point lies on the canvas (edges included)
    pub fn contains(&self, surface: Vec2) -> bool {
        surface.x >= 0.0 && surface.y >= 0.0 && surface.x <= self.size.x && surface.y <= self.size.y
    }

    pub fn background(&self) -> Background {
        Background {
            size: self.size,
            placeholder: self.image_path.is_none(),
        }
    }
}

/// Message to load a chart image as the background
#[derive(Message)]
pub struct LoadBackgroundRequest {
    pub path: PathBuf,
}

/// Resource holding the last background load failure
#[derive(Resource, Default)]
pub struct BackgroundLoadError {
    pub message: Option<String>,
}

/// Marker for the background sprite entity
#[derive(Component)]
pub struct BackgroundSprite;

/// Loads the requested image, resizes the canvas to its pixel dimensions and
/// swaps the background sprite.
pub fn load_background_system(
    mut commands: Commands,
    mut events: MessageReader<LoadBackgroundRequest>,
    asset_server: Res<AssetServer>,
    mut canvas: ResMut<Canvas>,
    mut load_error: ResMut<BackgroundLoadError>,
    existing: Query<Entity, With<BackgroundSprite>>,
    mut config_events: MessageWriter<UpdateLastBackgroundPathRequest>,
) {
    // Only the latest request matters
    let Some(event) = events.read().last() else {
        return;
    };
    let path = event.path.clone();

    let (width, height) = match image::image_dimensions(&path) {
        Ok(dimensions) => dimensions,
        Err(e) => {
            let message = format!("Could not open {}: {}", path.display(), e);
            error!("{}", message);
            load_error.message = Some(message);
            return;
        }
    };

    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let size = Vec2::new(width as f32, height as f32);
    let texture: Handle<Image> = asset_server.load(path.clone());
    commands.spawn((
        Sprite {
            image: texture,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(Vec3::ZERO),
        BackgroundSprite,
    ));

    canvas.size = size;
    canvas.image_path = Some(path.clone());
    load_error.message = None;
    info!("Loaded background {:?} ({}x{})", path, width, height);

    config_events.write(UpdateLastBackgroundPathRequest { path });
}
