use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::annotations::{FibLevels, ToolSettings};
use crate::editor::LoadBackgroundRequest;
use crate::export::{array_to_color, color_to_array};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Tool settings new shapes start with, restored on every launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolDefaults {
    /// sRGBA stroke and text color
    pub color: [f32; 4],
    pub stroke_width: f32,
    pub font_size: f32,
    pub text_bold: bool,
    pub text_italic: bool,
    pub fibonacci_levels: FibLevels,
}

impl Default for ToolDefaults {
    fn default() -> Self {
        Self::from(&ToolSettings::default())
    }
}

impl From<&ToolSettings> for ToolDefaults {
    fn from(settings: &ToolSettings) -> Self {
        Self {
            color: color_to_array(settings.color),
            stroke_width: settings.stroke_width,
            font_size: settings.font_size,
            text_bold: settings.text_bold,
            text_italic: settings.text_italic,
            fibonacci_levels: settings.fibonacci_levels.clone(),
        }
    }
}

impl From<&ToolDefaults> for ToolSettings {
    fn from(defaults: &ToolDefaults) -> Self {
        let fallback = ToolSettings::default();
        // Hand-edited files may carry nonsense sizes
        let positive = |value: f32, default: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                default
            }
        };
        Self {
            color: array_to_color(defaults.color),
            stroke_width: positive(defaults.stroke_width, fallback.stroke_width),
            font_size: positive(defaults.font_size, fallback.font_size),
            text_bold: defaults.text_bold,
            text_italic: defaults.text_italic,
            fibonacci_levels: defaults.fibonacci_levels.clone(),
        }
    }
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfigData {
    #[serde(default)]
    pub tool_defaults: ToolDefaults,

    /// Last chart image opened as background (reopened on startup if it still exists)
    #[serde(default)]
    pub last_background_path: Option<PathBuf>,

    /// Last annotations export target (used as the starting point of the export dialog)
    #[serde(default)]
    pub last_export_path: Option<PathBuf>,
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to update the last background path in config
#[derive(Message)]
pub struct UpdateLastBackgroundPathRequest {
    pub path: PathBuf,
}

/// Message to update the last export path in config
#[derive(Message)]
pub struct UpdateLastExportPathRequest {
    pub path: PathBuf,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Result of loading config from disk
struct LoadConfigResult {
    config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    reset_reason: Option<String>,
}

/// Load configuration from disk
fn load_config() -> LoadConfigResult {
    let config_path = get_config_path();

    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path,
            dirty: false,
        },
        reset_reason,
    }
}

/// Save configuration to disk
fn save_config(config: &AppConfig) {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
            } else {
                info!("Config saved to {:?}", config.config_path);
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let result = load_config();
    config.data = result.config.data;
    config.config_path = result.config.config_path;
    config.dirty = result.config.dirty;

    // Set notification if config was reset due to an error
    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// Startup system to seed the tool settings from the saved defaults
fn apply_tool_defaults(config: Res<AppConfig>, mut settings: ResMut<ToolSettings>) {
    *settings = ToolSettings::from(&config.data.tool_defaults);
}

/// Startup system to reopen the last background image
fn restore_last_background(
    config: Res<AppConfig>,
    mut background_events: MessageWriter<LoadBackgroundRequest>,
) {
    let Some(path) = &config.data.last_background_path else {
        return;
    };
    if path.exists() {
        background_events.write(LoadBackgroundRequest { path: path.clone() });
    } else {
        info!("Last background image no longer exists: {:?}", path);
    }
}

/// Mirror edits of the tool settings into the persisted defaults
fn sync_tool_defaults(settings: Res<ToolSettings>, mut config: ResMut<AppConfig>) {
    let defaults = ToolDefaults::from(&*settings);
    if defaults != config.data.tool_defaults {
        config.data.tool_defaults = defaults;
        config.dirty = true;
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            save_config(&config);
            config.dirty = false;
        }
    }
}

/// System to update last background path
fn update_last_background_path_system(
    mut events: MessageReader<UpdateLastBackgroundPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.last_background_path.as_ref() == Some(&event.path) {
            continue;
        }
        config.data.last_background_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update last export path
fn update_last_export_path_system(
    mut events: MessageReader<UpdateLastExportPathRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.last_export_path = Some(event.path.clone());
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<UpdateLastBackgroundPathRequest>()
            .add_message::<UpdateLastExportPathRequest>()
            .add_systems(
                Startup,
                (
                    load_config_system,
                    apply_tool_defaults,
                    restore_last_background,
                )
                    .chain()
                    .in_set(ConfigLoaded),
            )
            .add_systems(
                Update,
                (
                    sync_tool_defaults.run_if(resource_changed::<ToolSettings>),
                    update_last_background_path_system
                        .run_if(on_message::<UpdateLastBackgroundPathRequest>),
                    update_last_export_path_system
                        .run_if(on_message::<UpdateLastExportPathRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
