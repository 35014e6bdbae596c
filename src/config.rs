//! Stage configuration, loaded from RON.
//!
//! Every section defaults to the stock scene, so an empty `()` document is a
//! valid configuration.

use std::{
    f32::consts::{FRAC_PI_2, TAU},
    path::Path,
};

use anyhow::{Context as _, bail};
use serde::{Deserialize, Serialize};

use crate::{
    figure::FigureOverrides,
    globe::GlobeConfig,
    scene::{DEFAULT_CAMERA_DISTANCE, DEFAULT_FAR, DEFAULT_FOV_DEG, DEFAULT_NEAR},
    tween::{ParamField, Repeat, Tween},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: DEFAULT_FOV_DEG,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            distance: DEFAULT_CAMERA_DISTANCE,
            width: 800,
            height: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub overrides: FigureOverrides,
    /// Applied once before the first tick.
    pub initial: Vec<(ParamField, f32)>,
    pub tweens: Vec<Tween>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            overrides: FigureOverrides::default(),
            initial: vec![(ParamField::Y, -1.5)],
            tweens: vec![
                Tween::to(vec![(ParamField::Ry, TAU)], 40.0).repeat(Repeat::Infinite),
                Tween::to(vec![(ParamField::Y, 0.0), (ParamField::ArmRotation, FRAC_PI_2)], 10.0)
                    .repeat(Repeat::Infinite)
                    .yoyo(true),
            ],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub camera: CameraConfig,
    pub globe: GlobeConfig,
    pub figure: FigureConfig,
}

impl StageConfig {
    pub fn from_ron_str(source: &str) -> anyhow::Result<Self> {
        let config: StageConfig =
            ron::from_str(source).context("stage configuration is not valid RON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = Self::from_ron_str(&source)
            .with_context(|| format!("failed to load {}", path.display()))?;
        log::info!("loaded stage configuration from {}", path.display());
        Ok(config)
    }

    pub fn to_ron_string(&self) -> anyhow::Result<String> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(4);
        ron::ser::to_string_pretty(self, pretty).context("failed to serialize stage configuration")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            bail!("camera fov must be within (0, 180) degrees, got {}", camera.fov);
        }
        if !(camera.near > 0.0 && camera.near < camera.far) {
            bail!(
                "camera planes must satisfy 0 < near < far, got near {} far {}",
                camera.near,
                camera.far
            );
        }
        for (index, tween) in self.figure.tweens.iter().enumerate() {
            if !(tween.duration >= 0.0) {
                bail!("tween {} has invalid duration {}", index, tween.duration);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_round_trip_through_ron() {
        let config = StageConfig::default();
        let text = config.to_ron_string().unwrap();
        assert!(text.contains("earthmap1k.jpg"));
        assert_eq!(StageConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn empty_document_uses_defaults() {
        assert_eq!(StageConfig::from_ron_str("()").unwrap(), StageConfig::default());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let source = "(camera: (width: 1024), figure: (overrides: (x: Some(0.5))))";
        let config = StageConfig::from_ron_str(source).unwrap();
        assert_eq!(config.camera.width, 1024);
        assert_eq!(config.camera.height, 600);
        assert_eq!(config.figure.overrides.x, Some(0.5));
        assert_eq!(config.figure.tweens.len(), 2);
    }

    #[test]
    fn rejects_invalid_camera_and_tweens() {
        assert!(StageConfig::from_ron_str("(camera: (fov: 0.0))").is_err());
        assert!(StageConfig::from_ron_str("(camera: (near: 10.0, far: 1.0))").is_err());
        let err = StageConfig::from_ron_str(
            "(figure: (tweens: [(targets: [(Y, 1.0)], duration: -2.0)]))",
        )
        .unwrap_err();
        assert!(err.to_string().contains("duration"));
        assert!(StageConfig::from_ron_str("(camera: (fov: \"wide\"))").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(globe: (spin: (earth: 0.01)))").unwrap();
        let config = StageConfig::load(file.path()).unwrap();
        assert_eq!(config.globe.spin.earth, 0.01);
        assert_eq!(config.globe.spin.stars, 0.002);
    }

    #[test]
    fn missing_file_names_path() {
        let err = StageConfig::load("/nonexistent/stage.ron").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/stage.ron"));
    }
}
