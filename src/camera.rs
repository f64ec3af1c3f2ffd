use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::{deg_to_rad, look_at, perspective};

/// Fixed camera configuration for a sketch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraState {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 2000.0,
            eye: [100.0, 150.0, 200.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraState {
    /// Default camera aimed at a different target
    pub fn looking_at(target: [f32; 3]) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::from_array(self.eye)
    }

    pub fn target(&self) -> Vec3 {
        Vec3::from_array(self.target)
    }

    pub fn up(&self) -> Vec3 {
        Vec3::from_array(self.up)
    }

    /// Derive this frame's matrices for the given viewport aspect ratio
    pub fn matrices(&self, aspect: f32) -> CameraMatrices {
        let projection = perspective(deg_to_rad(self.fov_degrees), aspect, self.near, self.far);
        let camera = look_at(self.eye(), self.target(), self.up());
        let view = camera.inverse();

        CameraMatrices {
            projection,
            camera,
            view,
            view_projection: projection * view,
        }
    }
}

/// Per-frame matrices derived from a [`CameraState`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    pub projection: Mat4,
    /// Camera pose in world space
    pub camera: Mat4,
    pub view: Mat4,
    pub view_projection: Mat4,
}

impl CameraMatrices {
    /// Full transform for a model placed with `world`
    pub fn world_view_projection(&self, world: Mat4) -> Mat4 {
        self.view_projection * world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let camera = CameraState::default();
        assert_eq!(camera.fov_degrees, 60.0);
        assert_eq!(camera.near, 1.0);
        assert_eq!(camera.far, 2000.0);
        assert_eq!(camera.eye, [100.0, 150.0, 200.0]);
        assert_eq!(camera.up, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_looking_at_keeps_other_constants() {
        let camera = CameraState::looking_at([0.0, -35.0, 0.0]);
        assert_eq!(camera.target, [0.0, -35.0, 0.0]);
        assert_eq!(camera.eye, CameraState::default().eye);
    }

    #[test]
    fn test_view_is_inverse_of_camera() {
        let m = CameraState::looking_at([0.0, 35.0, 0.0]).matrices(1.5);
        assert!((m.view * m.camera).abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = CameraState::looking_at([0.0, -35.0, 0.0]);
        let m = camera.matrices(16.0 / 9.0);
        let ndc = m.view_projection.project_point3(camera.target());
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let camera: CameraState = serde_json::from_str(r#"{ "target": [0.0, 35.0, 0.0] }"#).unwrap();
        assert_eq!(camera.target, [0.0, 35.0, 0.0]);
        assert_eq!(camera.fov_degrees, 60.0);
    }
}
