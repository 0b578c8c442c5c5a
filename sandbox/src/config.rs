// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Sandbox settings, read from a RON file.

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tessera_core::math::{degrees_to_radians, Mat4, Vec3};
use tessera_lanes::ModelSettings;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.5, 4.0),
            target: Vec3::ZERO,
            fov_degrees: 45.0,
            aspect: 16.0 / 9.0,
            z_near: 0.1,
            z_far: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_zo(
            degrees_to_radians(self.fov_degrees),
            self.aspect,
            self.z_near,
            self.z_far,
        )
    }

    pub fn view(&self) -> Result<Mat4> {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
            .context("camera eye and target coincide, or the view direction is vertical")
    }
}

/// Placement of the model, and how far it turns around Y each frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub translation: Vec3,
    pub scale: f32,
    pub spin_degrees_per_frame: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: 1.0,
            spin_degrees_per_frame: 15.0,
        }
    }
}

impl TransformConfig {
    pub fn at_frame(&self, frame: u32) -> Mat4 {
        let angle = degrees_to_radians(self.spin_degrees_per_frame * frame as f32);
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_y(angle)
            * Mat4::from_scale(Vec3::new(self.scale, self.scale, self.scale))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Default `env_logger` filter; `RUST_LOG` wins when set.
    pub log_filter: String,
    pub settings: ModelSettings,
    pub frames: u32,
    pub camera: CameraConfig,
    pub transform: TransformConfig,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            settings: ModelSettings::default(),
            frames: 3,
            camera: CameraConfig::default(),
            transform: TransformConfig::default(),
        }
    }
}

impl SandboxConfig {
    /// Reads `path`, or returns the defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let bytes = fs::read(path)
                    .with_context(|| format!("failed to read config '{}'", path.display()))?;
                Self::from_ron_bytes(&bytes)
                    .with_context(|| format!("invalid config '{}'", path.display()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn from_ron_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(ron::de::from_bytes(bytes)?)
    }

    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        ensure!(camera.z_near > 0.0, "z_near must be positive, got {}", camera.z_near);
        ensure!(
            camera.z_far > camera.z_near,
            "z_far ({}) must be greater than z_near ({})",
            camera.z_far,
            camera.z_near
        );
        ensure!(
            camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0,
            "fov_degrees must be in (0, 180), got {}",
            camera.fov_degrees
        );
        ensure!(camera.aspect > 0.0, "aspect must be positive, got {}", camera.aspect);
        camera.view().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let config = SandboxConfig::load(None).unwrap();
        assert_eq!(config, SandboxConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sandbox.ron");
        fs::write(
            &path,
            "(frames: 1, settings: (diffuse_intensity: 1.0), camera: (eye: (x: 0.0, y: 0.0, z: 2.0)))",
        )
        .unwrap();

        let config = SandboxConfig::load(Some(&path)).unwrap();
        assert_eq!(config.frames, 1);
        assert_eq!(config.settings.diffuse_intensity, 1.0);
        assert_eq!(config.settings.ambient_intensity, 0.2);
        assert_eq!(config.camera.eye, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(config.camera.z_far, 100.0);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn inverted_depth_range_is_rejected() {
        let config = SandboxConfig {
            camera: CameraConfig {
                z_near: 10.0,
                z_far: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn camera_looking_at_itself_is_rejected() {
        let config = SandboxConfig {
            camera: CameraConfig {
                eye: Vec3::ONE,
                target: Vec3::ONE,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_ron_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(frames: \"many\")").unwrap();
        assert!(SandboxConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn bundled_demo_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../demos/sandbox.ron");
        let config = SandboxConfig::load(Some(&path)).unwrap();
        assert_eq!(config.frames, 4);
        assert_eq!(config.settings.specular_intensity, 0.4);
    }

    #[test]
    fn first_frame_has_no_spin() {
        let transform = TransformConfig {
            translation: Vec3::new(1.0, 2.0, 3.0),
            ..Default::default()
        };
        let p = transform.at_frame(0).transform_point(Vec3::ZERO);
        assert_eq!(p, Vec3::new(1.0, 2.0, 3.0));
    }
}
