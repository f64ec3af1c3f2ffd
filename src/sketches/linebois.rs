use glam::{Mat4, Vec4};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::core::ClearState;
use crate::geometry::Geometry;
use crate::math::{map_range, z_rotate};
use crate::scene::{Animate, Drawable, FrameContext, SceneGraph};
use crate::uniforms::{Uniforms, U_COLOR_MULT, U_MATRIX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineboisSettings {
    pub shape_count: u32,
    /// Segments per loop; each loop has `detail + 1` vertices
    pub detail: u32,
    pub max_radius: f32,
    /// Spin units per second (10 == one unit per 100 ms)
    pub time_scale: f32,
    pub color: [f32; 4],
}

impl Default for LineboisSettings {
    fn default() -> Self {
        Self {
            shape_count: 30,
            detail: 6,
            max_radius: 2.5,
            time_scale: 10.0,
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// A line loop spinning in the XY plane at a rate proportional to its size
#[derive(Debug, Clone)]
pub struct SpinningLoop {
    /// 0 for the innermost loop, 1 for the outermost
    pub shape_norm: f32,
    pub time_scale: f32,
    pub color: Vec4,
}

impl SpinningLoop {
    pub fn angle(&self, time: f32) -> f32 {
        time * self.time_scale * self.shape_norm
    }
}

impl Animate for SpinningLoop {
    fn update(&self, time: f32, _frame: &FrameContext) -> Uniforms {
        Uniforms::new()
            .with(U_MATRIX, z_rotate(Mat4::IDENTITY, self.angle(time)))
            .with(U_COLOR_MULT, self.color)
    }

    fn name(&self) -> &str {
        "line loop"
    }
}

pub struct LineboisSketch {
    settings: LineboisSettings,
}

impl LineboisSketch {
    pub fn new(settings: LineboisSettings) -> Self {
        Self { settings }
    }
}

impl super::Sketch for LineboisSketch {
    fn name(&self) -> &str {
        "linebois"
    }

    fn camera(&self) -> Option<CameraState> {
        None
    }

    fn clear_state(&self) -> ClearState {
        ClearState::flat_2d()
    }

    fn build(&self, _rng: &mut StdRng) -> SceneGraph {
        let s = &self.settings;
        let last = s.shape_count.saturating_sub(1) as f32;

        (0..s.shape_count)
            .map(|index| {
                let shape_norm = map_range(index as f32, 0.0, last, 0.0, 1.0);
                Drawable::new(
                    Geometry::line_loop(shape_norm * s.max_radius, s.detail, s.color),
                    SpinningLoop {
                        shape_norm,
                        time_scale: s.time_scale,
                        color: Vec4::ONE,
                    },
                )
            })
            .fold(SceneGraph::new(), SceneGraph::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketches::Sketch;
    use glam::Vec3;
    use rand::SeedableRng;

    fn flat_context(time: f32) -> FrameContext {
        FrameContext {
            time,
            frame: 0,
            aspect: 1.0,
            camera: None,
        }
    }

    #[test]
    fn test_build_creates_shape_count_loops() {
        let scene = LineboisSketch::new(LineboisSettings::default()).build(&mut StdRng::seed_from_u64(0));
        assert_eq!(scene.len(), 30);
        assert!(scene.iter().all(|(_, d)| d.geometry().vertex_count() == 7));
    }

    #[test]
    fn test_innermost_loop_is_a_point_and_outermost_has_max_radius() {
        let scene = LineboisSketch::new(LineboisSettings::default()).build(&mut StdRng::seed_from_u64(0));
        let (_, inner) = scene.iter().next().unwrap();
        let (_, outer) = scene.iter().last().unwrap();
        assert_eq!(inner.geometry().vertices()[0].position().length(), 0.0);
        assert!((outer.geometry().vertices()[0].position().length() - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_reproduces_moving_vertices() {
        // Rotating the static loop gives r*cos(a + t*norm), r*sin(a + t*norm)
        let spin = SpinningLoop {
            shape_norm: 0.5,
            time_scale: 10.0,
            color: Vec4::ONE,
        };
        let time_ms = 1234.0;
        let t = time_ms * 0.01;
        let uniforms = spin.update(time_ms / 1000.0, &flat_context(time_ms / 1000.0));
        let m = uniforms.mat4(U_MATRIX).unwrap();

        let radius = 1.25;
        let base = std::f32::consts::PI * 2.0 / 6.0;
        let rotated = m.transform_point3(Vec3::new(radius * base.cos(), radius * base.sin(), 0.0));
        let expected = Vec3::new(radius * (base + t * 0.5).cos(), radius * (base + t * 0.5).sin(), 0.0);
        assert!(rotated.abs_diff_eq(expected, 1e-3));
    }

    #[test]
    fn test_innermost_loop_never_spins() {
        let spin = SpinningLoop {
            shape_norm: 0.0,
            time_scale: 10.0,
            color: Vec4::ONE,
        };
        assert_eq!(spin.angle(100.0), 0.0);
    }

    #[test]
    fn test_no_camera_and_flat_clear() {
        let sketch = LineboisSketch::new(LineboisSettings::default());
        assert!(sketch.camera().is_none());
        assert_eq!(sketch.clear_state(), ClearState::flat_2d());
    }
}
