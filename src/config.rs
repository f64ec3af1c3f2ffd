use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::sketches::{LightingSettings, LineboisSettings, PlanetSettings};

pub const DEFAULT_SEED: u64 = 0x5EED;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Sketchbook".to_string(),
            width: 800,
            height: 600,
        }
    }
}

/// Everything a run can be tuned with. Every field has a default, so a
/// settings file only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub seed: Option<u64>,
    pub planet: PlanetSettings,
    pub linebois: LineboisSettings,
    pub lighting: LightingSettings,
}

impl Settings {
    /// Read and validate a JSON settings file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings = Self::from_json(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text).context("Failed to parse settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Reject values no sketch can render
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            bail!("window size must be non-zero, got {}x{}", self.window.width, self.window.height);
        }

        validate_camera("planet.camera", &self.planet.camera)?;
        validate_camera("lighting.camera", &self.lighting.camera)?;

        let p = &self.planet;
        if p.planet_subdivisions_axis == 0 || p.planet_subdivisions_height == 0 {
            bail!("planet subdivisions must be at least 1");
        }
        if p.asteroid_subdivisions_axis == 0 || p.asteroid_subdivisions_height == 0 {
            bail!("asteroid subdivisions must be at least 1");
        }
        if p.planet_radius <= 0.0 || p.asteroid_max_radius <= 0.0 {
            bail!("planet and asteroid radii must be positive");
        }

        if self.linebois.detail == 0 {
            bail!("linebois.detail must be at least 1");
        }

        let l = &self.lighting;
        if l.subdivisions_axis == 0 || l.subdivisions_height == 0 {
            bail!("lighting subdivisions must be at least 1");
        }
        if !(-360.0..=360.0).contains(&l.rotation_degrees) {
            bail!("lighting.rotation_degrees must be within -360..=360, got {}", l.rotation_degrees);
        }

        Ok(())
    }
}

fn validate_camera(section: &str, camera: &CameraState) -> Result<()> {
    if camera.near <= 0.0 || camera.far <= camera.near {
        bail!("{section}: expected 0 < near < far, got near={} far={}", camera.near, camera.far);
    }
    if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
        bail!("{section}: fov_degrees must be within (0, 180), got {}", camera.fov_degrees);
    }
    if camera.eye == camera.target {
        bail!("{section}: eye and target must differ");
    }
    Ok(())
}
