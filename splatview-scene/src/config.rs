//! Viewer configuration, loadable from a JSON file.
//!
//! Every section is defaulted, so a config file only needs the fields it
//! overrides.

use crate::bounds::BoundingVolume;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("bounds are inverted on the {axis} axis: min {min} > max {max}")]
    InvertedBounds { axis: char, min: f32, max: f32 },

    #[error("bounds on the {axis} axis must be finite")]
    NonFiniteBounds { axis: char },

    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Splatview".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 2.0, 5.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Fraction of pending orbit motion applied per frame.
    pub damping_factor: f32,
    /// Keyboard translation per frame, in world units.
    pub move_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            move_step: 0.05,
            min_distance: 1.0,
            max_distance: 20.0,
            enable_pan: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            min: [-5.0, -1.0, -5.0],
            max: [5.0, 5.0, 5.0],
        }
    }
}

impl BoundsConfig {
    pub fn volume(&self) -> BoundingVolume {
        BoundingVolume::new(Vec3::from_array(self.min), Vec3::from_array(self.max))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub steps: u32,
    pub step_interval_ms: u64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            steps: 10,
            step_interval_ms: 100,
        }
    }
}

/// Top-level viewer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub asset_path: PathBuf,
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub bounds: BoundsConfig,
    pub loader: LoaderConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            asset_path: PathBuf::from("assets/scene.splat"),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
            bounds: BoundsConfig::default(),
            loader: LoaderConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, (min, max)) in ['x', 'y', 'z']
            .into_iter()
            .zip(self.bounds.min.into_iter().zip(self.bounds.max))
        {
            if !min.is_finite() || !max.is_finite() {
                return Err(ConfigError::NonFiniteBounds { axis });
            }
            if min > max {
                return Err(ConfigError::InvertedBounds { axis, min, max });
            }
        }

        let controls = &self.controls;
        if !(controls.damping_factor > 0.0 && controls.damping_factor <= 1.0) {
            return Err(invalid(
                "controls.damping_factor",
                format!("{} is outside (0, 1]", controls.damping_factor),
            ));
        }
        if !(controls.move_step > 0.0) {
            return Err(invalid(
                "controls.move_step",
                format!("{} must be positive", controls.move_step),
            ));
        }
        if controls.min_distance > controls.max_distance {
            return Err(invalid(
                "controls.min_distance",
                format!(
                    "{} exceeds max_distance {}",
                    controls.min_distance, controls.max_distance
                ),
            ));
        }

        let camera = &self.camera;
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(invalid(
                "camera.fov_degrees",
                format!("{} is outside (0, 180)", camera.fov_degrees),
            ));
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            return Err(invalid(
                "camera.near",
                format!("near {} must be positive and below far {}", camera.near, camera.far),
            ));
        }

        if self.loader.steps == 0 {
            return Err(invalid("loader.steps", "must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        ViewerConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(
            r#"{ "asset_path": "room.splat", "controls": { "move_step": 0.1 } }"#,
        )
        .unwrap();
        assert_eq!(config.asset_path, PathBuf::from("room.splat"));
        assert_eq!(config.controls.move_step, 0.1);
        assert_eq!(config.controls.damping_factor, 0.05);
        assert_eq!(config.bounds, BoundsConfig::default());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let err = ViewerConfig::from_json(r#"{ "bounds": { "min": [0, 6, 0], "max": [1, 5, 1] } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedBounds { axis: 'y', .. }
        ));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let mut config = ViewerConfig::default();
        config.bounds.max[2] = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteBounds { axis: 'z' })
        ));

        let mut config = ViewerConfig::default();
        config.bounds.min[0] = f32::NEG_INFINITY;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteBounds { axis: 'x' })
        ));
    }

    #[test]
    fn test_bad_damping_rejected() {
        let mut config = ViewerConfig::default();
        config.controls.damping_factor = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "controls.damping_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_distance_range_rejected() {
        let mut config = ViewerConfig::default();
        config.controls.min_distance = 30.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            ViewerConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ViewerConfig::from_path("no/such/config.json"),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_bounds_volume() {
        let volume = BoundsConfig::default().volume();
        assert_eq!(volume.min(), Vec3::new(-5.0, -1.0, -5.0));
        assert_eq!(volume.max(), Vec3::new(5.0, 5.0, 5.0));
    }
}
