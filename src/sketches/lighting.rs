use glam::{Mat4, Vec3, Vec4};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::core::ClearState;
use crate::geometry::Geometry;
use crate::math::{deg_to_rad, inverse_transpose, normalize, translate, y_rotate};
use crate::scene::{Animate, Drawable, FrameContext, SceneGraph};
use crate::uniforms::{
    Uniforms, U_COLOR, U_LIGHTING, U_MATRIX, U_REVERSE_LIGHT_DIRECTION, U_WORLD_INVERSE_TRANSPOSE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    pub camera: CameraState,
    pub sphere_radius: f32,
    pub subdivisions_axis: u32,
    pub subdivisions_height: u32,
    /// Rotation about Y, -360..=360
    pub rotation_degrees: f32,
    pub offset: [f32; 3],
    pub color: [f32; 4],
    pub light_direction: [f32; 3],
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            camera: CameraState::looking_at([0.0, 35.0, 0.0]),
            sphere_radius: 10.0,
            subdivisions_axis: 12,
            subdivisions_height: 24,
            rotation_degrees: 0.0,
            offset: [0.0, 0.0, 35.0],
            color: [0.2, 1.0, 0.2, 1.0],
            light_direction: [0.5, 0.7, 1.0],
        }
    }
}

/// Sphere swung around the Y axis and lit by a single directional light
#[derive(Debug, Clone)]
pub struct LitSphere {
    pub rotation: f32,
    pub offset: Vec3,
    pub color: Vec4,
    pub reverse_light_direction: Vec3,
}

impl LitSphere {
    pub fn world(&self) -> Mat4 {
        translate(y_rotate(Mat4::IDENTITY, self.rotation), self.offset)
    }
}

impl Animate for LitSphere {
    fn update(&self, _time: f32, frame: &FrameContext) -> Uniforms {
        let world = self.world();
        Uniforms::new()
            .with(U_MATRIX, frame.view_projection() * world)
            .with(U_WORLD_INVERSE_TRANSPOSE, inverse_transpose(world))
            .with(U_REVERSE_LIGHT_DIRECTION, self.reverse_light_direction)
            .with(U_COLOR, self.color)
            .with(U_LIGHTING, 1.0)
    }

    fn name(&self) -> &str {
        "lit sphere"
    }
}

pub struct LightingSketch {
    settings: LightingSettings,
}

impl LightingSketch {
    pub fn new(settings: LightingSettings) -> Self {
        Self { settings }
    }
}

impl super::Sketch for LightingSketch {
    fn name(&self) -> &str {
        "lighting"
    }

    fn camera(&self) -> Option<CameraState> {
        Some(self.settings.camera)
    }

    fn clear_state(&self) -> ClearState {
        ClearState::scene_3d()
    }

    fn build(&self, rng: &mut StdRng) -> SceneGraph {
        let s = &self.settings;
        let sphere = Drawable::new(
            Geometry::sphere_points(s.sphere_radius, s.subdivisions_axis, s.subdivisions_height, rng),
            LitSphere {
                rotation: deg_to_rad(s.rotation_degrees.clamp(-360.0, 360.0)),
                offset: Vec3::from_array(s.offset),
                color: Vec4::from_array(s.color),
                reverse_light_direction: normalize(Vec3::from_array(s.light_direction)),
            },
        );
        SceneGraph::new().with(sphere)
    }
}
