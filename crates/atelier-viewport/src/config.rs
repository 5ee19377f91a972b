//! Layered editor configuration
//!
//! Config is loaded with four layers of precedence (highest wins):
//! 1. Environment variables: `ATELIER_LIGHT_TEMP`, `ATELIER_LIGHT_INTENSITY`, `ATELIER_MODE`
//! 2. Project-local: `.atelier/config.toml`
//! 3. Global: `~/.atelier/config.toml`
//! 4. Built-in defaults
//!
//! File layers are merged table by table before deserializing, so a project
//! file that only sets `[camera] fov` keeps every other global setting.

use atelier_core::lighting::DisplayMode;
use atelier_core::{AtelierError, ObjectKind, PresentationSettings, Result};
use atelier_scene::BuiltinAssets;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const ENV_LIGHT_TEMP: &str = "ATELIER_LIGHT_TEMP";
pub const ENV_LIGHT_INTENSITY: &str = "ATELIER_LIGHT_INTENSITY";
pub const ENV_MODE: &str = "ATELIER_MODE";

/// Orbit camera settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
    /// Fraction of the pending orbit applied per frame
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Polar angles in radians, measured from straight up
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 42.0,
            near: 0.1,
            far: 100.0,
            position: [4.5, 2.2, 4.5],
            target: [0.0, 1.2, 0.0],
            damping: 0.08,
            min_distance: 2.5,
            max_distance: 12.0,
            min_polar_angle: std::f32::consts::PI / 6.0,
            max_polar_angle: std::f32::consts::PI / 2.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl CameraConfig {
    /// Reject limit pairs the orbit camera cannot clamp against
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.min_distance, self.max_distance);
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(AtelierError::ConfigError(format!(
                "camera.min_distance ({}) must be positive and at most camera.max_distance ({})",
                min, max
            )));
        }
        let (min, max) = (self.min_polar_angle, self.max_polar_angle);
        let range = 0.0..=std::f32::consts::PI;
        if !(range.contains(&min) && range.contains(&max) && min <= max) {
            return Err(AtelierError::ConfigError(format!(
                "camera.min_polar_angle ({}) and camera.max_polar_angle ({}) must be ordered within [0, pi]",
                min, max
            )));
        }
        Ok(())
    }
}

/// Gizmo sizing. Every factor scales with the camera's distance to the
/// gizmo, which keeps handles a constant size on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoConfig {
    /// Arrow length and ring radius per unit of camera distance
    pub size_factor: f32,
    /// Ray-to-arrow and ray-to-ring tolerance per unit of camera distance
    pub axis_pick_factor: f32,
    /// Ray-to-plane-handle tolerance per unit of camera distance
    pub plane_pick_factor: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self {
            size_factor: 0.12,
            axis_pick_factor: 0.015,
            plane_pick_factor: 0.02,
        }
    }
}

/// Initial viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Resolved editor configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub camera: CameraConfig,
    pub gizmo: GizmoConfig,
    pub viewport: ViewportConfig,
    pub presentation: PresentationSettings,
    /// Model path per object kind name, e.g. `lamp = "assets/lamp.glb"`
    pub models: BTreeMap<String, String>,
}

impl EditorConfig {
    /// Load config with layered precedence: defaults < global < project < env vars
    pub fn load() -> Result<Self> {
        let mut merged = toml::Table::new();

        // Layer 1: Global config (~/.atelier/config.toml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                merge_tables(&mut merged, Self::load_table(&global_path)?);
            }
        }

        // Layer 2: Project-local config (.atelier/config.toml)
        let local_path = PathBuf::from(".atelier/config.toml");
        if local_path.exists() {
            merge_tables(&mut merged, Self::load_table(&local_path)?);
        }

        let mut config = Self::from_table(merged)?;

        // Layer 3: Environment variable overrides
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load config from a specific file path only, plus environment overrides
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_table(Self::load_table(path)?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Serialize the resolved config back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Asset source honoring the `[models]` overrides
    pub fn assets(&self) -> BuiltinAssets {
        let mut assets = BuiltinAssets::new();
        for (name, path) in &self.models {
            match name.parse::<ObjectKind>() {
                Ok(kind) => assets = assets.with_model_path(kind, path.clone()),
                Err(_) => log::warn!("Ignoring model path for unknown kind '{}'", name),
            }
        }
        assets
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_LIGHT_TEMP) {
            let kelvin: f64 = raw.trim().parse().map_err(|_| {
                AtelierError::ConfigError(format!("{} must be a number, got '{}'", ENV_LIGHT_TEMP, raw))
            })?;
            self.presentation.set_light_temperature(kelvin);
        }
        if let Some(raw) = lookup(ENV_LIGHT_INTENSITY) {
            let intensity: f32 = raw.trim().parse().map_err(|_| {
                AtelierError::ConfigError(format!(
                    "{} must be a number, got '{}'",
                    ENV_LIGHT_INTENSITY, raw
                ))
            })?;
            self.presentation.set_light_intensity(intensity);
        }
        if let Some(raw) = lookup(ENV_MODE) {
            self.presentation.mode = match raw.trim() {
                "day" => DisplayMode::Day,
                "night" => DisplayMode::Night,
                other => {
                    return Err(AtelierError::InvalidEnumValue {
                        value: other.to_string(),
                        allowed: vec!["day".into(), "night".into()],
                    })
                }
            };
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".atelier").join("config.toml"))
    }

    fn load_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        content.parse::<toml::Table>().map_err(|e| {
            AtelierError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        let mut config: EditorConfig = toml::Value::Table(table).try_into()?;
        config.camera.validate()?;
        // Files may carry out-of-range light values; route them through the clamps
        let defaults = PresentationSettings::default();
        let presentation = &mut config.presentation;
        let (intensity, kelvin) = (presentation.light_intensity, presentation.light_temperature);
        presentation.light_intensity = defaults.light_intensity;
        presentation.light_temperature = defaults.light_temperature;
        presentation.set_light_intensity(intensity);
        presentation.set_light_temperature(kelvin);
        Ok(config)
    }
}

/// Recursively overlay `overlay` onto `base`; nested tables merge, everything else replaces
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
