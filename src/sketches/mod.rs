mod lighting;
mod linebois;
mod planet;

pub use lighting::{LightingSettings, LightingSketch, LitSphere};
pub use linebois::{LineboisSettings, LineboisSketch, SpinningLoop};
pub use planet::{AsteroidOrbit, Planet, PlanetSettings, PlanetSketch};

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::config::Settings;
use crate::core::ClearState;
use crate::scene::SceneGraph;

/// A self-contained animation: its camera, clear state, and the drawables it creates at setup
pub trait Sketch {
    fn name(&self) -> &str;

    /// `None` for sketches that draw directly in clip space
    fn camera(&self) -> Option<CameraState>;

    fn clear_state(&self) -> ClearState;

    /// Create every drawable. All randomness comes from `rng`.
    fn build(&self, rng: &mut StdRng) -> SceneGraph;
}

/// The sketches this binary can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SketchKind {
    /// Lit planet with a ring of 1000 orbiting, tumbling asteroids
    #[default]
    Planet,
    /// 2D concentric line loops spinning at increasing rates
    Linebois,
    /// Directional-lighting tutorial: a rotated point-cloud sphere
    Lighting,
}

impl SketchKind {
    pub const ALL: [SketchKind; 3] = [SketchKind::Planet, SketchKind::Linebois, SketchKind::Lighting];

    pub fn name(self) -> &'static str {
        match self {
            SketchKind::Planet => "planet",
            SketchKind::Linebois => "linebois",
            SketchKind::Lighting => "lighting",
        }
    }

    /// Instantiate the sketch with its section of the settings
    pub fn create(self, settings: &Settings) -> Box<dyn Sketch> {
        match self {
            SketchKind::Planet => Box::new(PlanetSketch::new(settings.planet.clone())),
            SketchKind::Linebois => Box::new(LineboisSketch::new(settings.linebois.clone())),
            SketchKind::Lighting => Box::new(LightingSketch::new(settings.lighting.clone())),
        }
    }
}

impl std::fmt::Display for SketchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_names_round_trip_through_value_enum() {
        for kind in SketchKind::ALL {
            assert_eq!(SketchKind::from_str(kind.name(), true), Ok(kind));
        }
    }

    #[test]
    fn test_create_uses_matching_sketch() {
        let settings = Settings::default();
        for kind in SketchKind::ALL {
            assert_eq!(kind.create(&settings).name(), kind.name());
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let kind: SketchKind = serde_json::from_str("\"linebois\"").unwrap();
        assert_eq!(kind, SketchKind::Linebois);
    }
}
