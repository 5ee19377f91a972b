//! Presentation settings consumed by the viewport as render parameters.
//!
//! These values are owned by the surrounding UI; the editor core only reads
//! them when sampling a frame.

use crate::Color;
use serde::{Deserialize, Serialize};

pub const MIN_KELVIN: f64 = 2700.0;
pub const MAX_KELVIN: f64 = 6500.0;
pub const MAX_LIGHT_INTENSITY: f32 = 3.0;

const WARM: [f64; 3] = [255.0, 183.0, 107.0];
const COOL: [f64; 3] = [190.0, 220.0, 255.0];

/// Room extents in meters: width (x), depth (z), height (y)
pub const ROOM_WIDTH: f32 = 8.0;
pub const ROOM_DEPTH: f32 = 10.0;
pub const ROOM_HEIGHT: f32 = 4.0;

/// Wall colors offered by the settings panel
pub const WALL_SWATCHES: [Color; 8] = [
    Color::from_hex(0xf3f0e9),
    Color::from_hex(0xe8dfd0),
    Color::from_hex(0xd8cdb8),
    Color::from_hex(0xcbbba3),
    Color::from_hex(0xc2d4f5),
    Color::from_hex(0xd9c2f5),
    Color::from_hex(0xc2f5e6),
    Color::from_hex(0xf5c2d9),
];

/// Map a color temperature to an RGB tint.
///
/// Linear interpolation between a warm anchor at 2700K and a cool anchor at
/// 6500K; out-of-range temperatures clamp to the nearest anchor.
pub fn kelvin_to_color(kelvin: f64) -> Color {
    let t = (kelvin.clamp(MIN_KELVIN, MAX_KELVIN) - MIN_KELVIN) / (MAX_KELVIN - MIN_KELVIN);
    let channel = |i: usize| (WARM[i] + (COOL[i] - WARM[i]) * t).round() as u8;
    Color::new(channel(0), channel(1), channel(2))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Day,
    Night,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorPreset {
    #[default]
    Brown,
    Grey,
}

/// Texture set for the floor plane
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorTextures {
    pub color: &'static str,
    pub normal: &'static str,
    pub roughness: &'static str,
    /// UV repeat in both directions
    pub repeat: f32,
}

impl FloorPreset {
    pub fn textures(&self) -> FloorTextures {
        match self {
            FloorPreset::Brown => FloorTextures {
                color: "/textures/floor_brown/color.jpg",
                normal: "/textures/floor_brown/normal.jpg",
                roughness: "/textures/floor_brown/roughness.jpg",
                repeat: 2.2,
            },
            FloorPreset::Grey => FloorTextures {
                color: "/textures/floor_grey/color.jpg",
                normal: "/textures/floor_grey/normal.jpg",
                roughness: "/textures/floor_grey/roughness.jpg",
                repeat: 2.2,
            },
        }
    }
}

/// User-facing presentation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationSettings {
    pub mode: DisplayMode,
    pub wall_color: Color,
    pub floor: FloorPreset,
    /// Directional light intensity, 0..=3
    pub light_intensity: f32,
    /// Light color temperature in Kelvin, 2700..=6500
    pub light_temperature: f64,
}

impl Default for PresentationSettings {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Day,
            wall_color: WALL_SWATCHES[0],
            floor: FloorPreset::Brown,
            light_intensity: 1.2,
            light_temperature: 4500.0,
        }
    }
}

impl PresentationSettings {
    pub fn set_light_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.light_intensity = intensity.clamp(0.0, MAX_LIGHT_INTENSITY);
        }
    }

    pub fn set_light_temperature(&mut self, kelvin: f64) {
        if kelvin.is_finite() {
            self.light_temperature = kelvin.clamp(MIN_KELVIN, MAX_KELVIN);
        }
    }

    /// Derive the per-frame lighting parameters
    pub fn lighting(&self) -> LightingParams {
        let (background, ambient, hemisphere) = match self.mode {
            DisplayMode::Day => (Color::from_hex(0x111111), 0.45, 0.35),
            DisplayMode::Night => (Color::from_hex(0x0b0b0c), 0.2, 0.2),
        };

        LightingParams {
            background,
            ambient_intensity: ambient,
            hemisphere_intensity: hemisphere,
            hemisphere_ground: Color::from_hex(0x1b1b1b),
            directional_intensity: self.light_intensity.clamp(0.0, MAX_LIGHT_INTENSITY),
            light_color: kelvin_to_color(self.light_temperature),
            wall_color: self.wall_color,
            floor: self.floor.textures(),
        }
    }
}

/// Render parameters sampled once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightingParams {
    pub background: Color,
    pub ambient_intensity: f32,
    pub hemisphere_intensity: f32,
    pub hemisphere_ground: Color,
    pub directional_intensity: f32,
    pub light_color: Color,
    pub wall_color: Color,
    pub floor: FloorTextures,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelvin_anchors() {
        assert_eq!(kelvin_to_color(2700.0), Color::new(255, 183, 107));
        assert_eq!(kelvin_to_color(6500.0), Color::new(190, 220, 255));
    }

    #[test]
    fn test_kelvin_midpoint_rounds_half_up() {
        // t = 0.5: 222.5, 201.5, 181.0
        assert_eq!(kelvin_to_color(4600.0), Color::new(223, 202, 181));
    }

    #[test]
    fn test_kelvin_clamps_out_of_range() {
        assert_eq!(kelvin_to_color(1000.0), kelvin_to_color(2700.0));
        assert_eq!(kelvin_to_color(12000.0), kelvin_to_color(6500.0));
    }

    #[test]
    fn test_settings_clamp_inputs() {
        let mut settings = PresentationSettings::default();
        settings.set_light_intensity(7.0);
        assert_eq!(settings.light_intensity, 3.0);
        settings.set_light_intensity(f32::NAN);
        assert_eq!(settings.light_intensity, 3.0);
        settings.set_light_temperature(100.0);
        assert_eq!(settings.light_temperature, 2700.0);
    }

    #[test]
    fn test_night_mode_dims_fill_lights() {
        let settings = PresentationSettings {
            mode: DisplayMode::Night,
            ..Default::default()
        };
        let params = settings.lighting();
        assert_eq!(params.ambient_intensity, 0.2);
        assert_eq!(params.background.to_hex_string(), "#0b0b0c");
        assert_eq!(params.directional_intensity, 1.2);
    }

    #[test]
    fn test_settings_from_partial_toml() {
        let settings: PresentationSettings = toml::from_str(
            r##"
mode = "night"
wall_color = "#c2d4f5"
"##,
        )
        .unwrap();
        assert_eq!(settings.mode, DisplayMode::Night);
        assert_eq!(settings.wall_color, WALL_SWATCHES[4]);
        assert_eq!(settings.light_temperature, 4500.0);
        assert_eq!(settings.floor, FloorPreset::Brown);
    }
}
