//! Configuration system
//!
//! Tunables for the camera, lighting and the mini-game. Every section has a `Default`
//! matching the built-in behaviour, so a config file only needs the keys it changes.

pub use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Camera defaults and input sensitivity
    pub camera: CameraConfig,
    /// Lighting defaults
    pub lighting: LightingConfig,
    /// Whack-a-mole tuning
    pub game: GameConfig,
}

impl Config for EngineConfig {}

/// Camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Keyboard movement speed in world units per second
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse movement
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            move_speed: 5.0,
            mouse_sensitivity: 0.1,
        }
    }
}

/// Lighting configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Global ambient color
    pub ambient: [f32; 3],
    /// Flashlight color
    pub flashlight_color: [f32; 3],
    /// Flashlight inner cone half-angle in degrees
    pub flashlight_inner_degrees: f32,
    /// Flashlight outer cone half-angle in degrees
    pub flashlight_outer_degrees: f32,
    /// Whether the flashlight starts switched on
    pub flashlight_enabled: bool,
}

impl LightingConfig {
    /// Ambient color as a vector
    pub fn ambient_color(&self) -> Vec3 {
        Vec3::from(self.ambient)
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: [0.1, 0.1, 0.1],
            flashlight_color: [1.0, 1.0, 1.0],
            flashlight_inner_degrees: 12.5,
            flashlight_outer_degrees: 17.5,
            flashlight_enabled: false,
        }
    }
}

/// Whack-a-mole configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Score at which the game finishes
    pub win_score: i32,
    /// Path parameter advance per second
    pub target_speed: f32,
    /// Speed multiplier applied once a target has been hit
    pub hit_speed_multiplier: f32,
    /// Points for hitting a good target
    pub good_points: i32,
    /// Points for hitting a bad target (negative)
    pub bad_points: i32,
    /// Half extent of the square spawn field on the ground plane
    pub field_half_extent: f32,
    /// Depth below ground of the spawn and exit waypoints
    pub burrow_depth: f32,
    /// Height of the apex above ground
    pub apex_height: f32,
    /// Horizontal distance between spawn and exit waypoints
    pub exit_offset: f32,
    /// Spin in radians per second
    pub spin_speed: f32,
    /// Uniform scale of target meshes
    pub target_scale: f32,
    /// Seed for the spawn generator; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1.0,
            win_score: 100,
            target_speed: 0.5,
            hit_speed_multiplier: 5.0,
            good_points: 10,
            bad_points: -50,
            field_half_extent: 4.0,
            burrow_depth: 1.0,
            apex_height: 1.5,
            exit_offset: 1.0,
            spin_speed: 2.0,
            target_scale: 0.5,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EngineConfig = toml::from_str("[game]\nwin_score = 50\nseed = 7\n").unwrap();
        assert_eq!(config.game.win_score, 50);
        assert_eq!(config.game.seed, Some(7));
        assert_eq!(config.game.good_points, 10);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_ron_round_trip_through_file() {
        let path = std::env::temp_dir().join("scene_engine_config_test.ron");
        let path = path.to_string_lossy().to_string();

        let mut config = EngineConfig::default();
        config.lighting.flashlight_enabled = true;
        config.save_to_file(&path).unwrap();

        let loaded = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let err = EngineConfig::default().save_to_file("settings.ini").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
