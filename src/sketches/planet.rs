use glam::{Mat4, Vec3, Vec4};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::core::ClearState;
use crate::geometry::Geometry;
use crate::math::{gaussian, inverse_transpose, map_range, normalize, spread, translate, x_rotate};
use crate::scene::{Animate, Drawable, FrameContext, SceneGraph};
use crate::uniforms::{
    Uniforms, U_COLOR_MULT, U_LIGHTING, U_MATRIX, U_REVERSE_LIGHT_DIRECTION,
    U_WORLD_INVERSE_TRANSPOSE,
};

/// Asteroid radii are clamped below so a large negative sample never turns a sphere inside out
const MIN_ASTEROID_RADIUS: f32 = 0.05;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetSettings {
    pub camera: CameraState,
    pub planet_radius: f32,
    pub planet_subdivisions_axis: u32,
    pub planet_subdivisions_height: u32,
    pub planet_color_mult: [f32; 4],
    pub asteroid_count: u32,
    pub asteroid_subdivisions_axis: u32,
    pub asteroid_subdivisions_height: u32,
    pub asteroid_max_radius: f32,
    pub orbit_speed: f32,
    pub light_direction: [f32; 3],
}

impl Default for PlanetSettings {
    fn default() -> Self {
        Self {
            camera: CameraState::looking_at([0.0, -35.0, 0.0]),
            planet_radius: 30.0,
            planet_subdivisions_axis: 32,
            planet_subdivisions_height: 64,
            planet_color_mult: [1.0, 0.3, 0.3, 1.0],
            asteroid_count: 1000,
            asteroid_subdivisions_axis: 8,
            asteroid_subdivisions_height: 16,
            asteroid_max_radius: 10.0,
            orbit_speed: 0.2,
            light_direction: [0.7, 0.5, -1.0],
        }
    }
}

/// The central sphere; sits at the origin
#[derive(Debug, Clone)]
pub struct Planet {
    pub color_mult: Vec4,
    pub reverse_light_direction: Vec3,
}

impl Animate for Planet {
    fn update(&self, _time: f32, frame: &FrameContext) -> Uniforms {
        Uniforms::new()
            .with(U_MATRIX, frame.view_projection())
            .with(U_WORLD_INVERSE_TRANSPOSE, Mat4::IDENTITY)
            .with(U_COLOR_MULT, self.color_mult)
            .with(U_REVERSE_LIGHT_DIRECTION, self.reverse_light_direction)
            .with(U_LIGHTING, 1.0)
    }

    fn name(&self) -> &str {
        "planet"
    }
}

/// One asteroid on a circular orbit around the planet, tumbling about X
#[derive(Debug, Clone)]
pub struct AsteroidOrbit {
    pub planet_radius: f32,
    /// 0..1 factor widening the orbit beyond twice the planet radius
    pub orbit_factor: f32,
    pub offset: Vec3,
    pub phase: f32,
    pub speed: f32,
    pub color_mult: Vec4,
    pub reverse_light_direction: Vec3,
}

impl AsteroidOrbit {
    pub fn orbit_radius(&self) -> f32 {
        self.planet_radius * 2.0 + 100.0 * self.orbit_factor
    }

    /// World-space center at time `t`
    pub fn position(&self, t: f32) -> Vec3 {
        let angle = self.speed * t + self.phase;
        let radius = self.orbit_radius();
        Vec3::new(
            radius * angle.cos() + self.offset.x,
            self.offset.y,
            radius * angle.sin() + self.offset.z,
        )
    }

    pub fn world(&self, t: f32) -> Mat4 {
        x_rotate(translate(Mat4::IDENTITY, self.position(t)), t)
    }
}

impl Animate for AsteroidOrbit {
    fn update(&self, time: f32, frame: &FrameContext) -> Uniforms {
        let world = self.world(time);
        Uniforms::new()
            .with(U_MATRIX, frame.view_projection() * world)
            .with(U_WORLD_INVERSE_TRANSPOSE, inverse_transpose(world))
            .with(U_COLOR_MULT, self.color_mult)
            .with(U_REVERSE_LIGHT_DIRECTION, self.reverse_light_direction)
            .with(U_LIGHTING, 1.0)
    }

    fn name(&self) -> &str {
        "asteroid"
    }
}

pub struct PlanetSketch {
    settings: PlanetSettings,
}

impl PlanetSketch {
    pub fn new(settings: PlanetSettings) -> Self {
        Self { settings }
    }

    fn asteroid<R: rand::Rng + ?Sized>(&self, index: u32, rng: &mut R) -> Drawable {
        let s = &self.settings;
        let i_norm = map_range(index as f32, 0.0, (s.asteroid_count - 1) as f32, 0.0, 1.0);

        let radius = (0.3 + gaussian(rng))
            .min(s.asteroid_max_radius)
            .max(MIN_ASTEROID_RADIUS);
        let geometry = Geometry::sphere(
            radius,
            s.asteroid_subdivisions_axis,
            s.asteroid_subdivisions_height,
            rng,
        );

        let offset = Vec3::new(
            spread(rng, -25.0, 50.0),
            spread(rng, -20.0, 40.0),
            spread(rng, -25.0, 50.0),
        );
        let orbit_factor = spread(rng, 0.0, 1.0);

        Drawable::new(
            geometry,
            AsteroidOrbit {
                planet_radius: s.planet_radius,
                orbit_factor,
                offset,
                phase: i_norm * std::f32::consts::PI * 2.0,
                speed: s.orbit_speed,
                color_mult: Vec4::ONE,
                reverse_light_direction: normalize(Vec3::from_array(s.light_direction)),
            },
        )
        .with_uniforms(Uniforms::new().with(U_MATRIX, Mat4::IDENTITY))
    }
}

impl super::Sketch for PlanetSketch {
    fn name(&self) -> &str {
        "planet"
    }

    fn camera(&self) -> Option<CameraState> {
        Some(self.settings.camera)
    }

    fn clear_state(&self) -> ClearState {
        ClearState::scene_3d()
    }

    fn build(&self, rng: &mut StdRng) -> SceneGraph {
        let s = &self.settings;
        let mut scene = SceneGraph::new();

        let planet = Drawable::new(
            Geometry::sphere(
                s.planet_radius,
                s.planet_subdivisions_axis,
                s.planet_subdivisions_height,
                rng,
            ),
            Planet {
                color_mult: Vec4::from_array(s.planet_color_mult),
                reverse_light_direction: normalize(Vec3::from_array(s.light_direction)),
            },
        )
        .with_uniforms(Uniforms::new().with(U_MATRIX, Mat4::IDENTITY));
        scene.add(planet);

        for index in 0..s.asteroid_count {
            scene.add(self.asteroid(index, rng));
        }

        log::debug!("Planet scene: 1 planet, {} asteroids", s.asteroid_count);
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketches::Sketch;
    use rand::SeedableRng;

    fn orbit(phase: f32) -> AsteroidOrbit {
        AsteroidOrbit {
            planet_radius: 30.0,
            orbit_factor: 0.5,
            offset: Vec3::new(3.0, -4.0, 5.0),
            phase,
            speed: 0.2,
            color_mult: Vec4::ONE,
            reverse_light_direction: Vec3::Z,
        }
    }

    #[test]
    fn test_orbit_radius() {
        assert_eq!(orbit(0.0).orbit_radius(), 110.0);
    }

    #[test]
    fn test_position_at_time_zero() {
        let p = orbit(0.0).position(0.0);
        assert_eq!(p, Vec3::new(113.0, -4.0, 5.0));
    }

    #[test]
    fn test_position_follows_orbit_formula() {
        let a = orbit(1.0);
        let t: f32 = 3.5;
        let angle = 0.2 * t + 1.0;
        let expected = Vec3::new(110.0 * angle.cos() + 3.0, -4.0, 110.0 * angle.sin() + 5.0);
        assert!(a.position(t).abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_world_translates_then_tumbles() {
        let a = orbit(0.5);
        let t = 2.0;
        let expected = Mat4::from_translation(a.position(t)) * Mat4::from_rotation_x(t);
        assert!(a.world(t).abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_world_tumbles_about_x() {
        let a = orbit(0.0);
        let world = a.world(std::f32::consts::FRAC_PI_2);
        // Local +Y ends up along +Z after a quarter turn about X
        let tip = world.transform_vector3(Vec3::Y);
        assert!(tip.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_build_counts() {
        let settings = PlanetSettings {
            asteroid_count: 10,
            ..Default::default()
        };
        let scene = PlanetSketch::new(settings).build(&mut StdRng::seed_from_u64(1));
        assert_eq!(scene.len(), 11);
        let (_, planet) = scene.iter().next().unwrap();
        assert_eq!(planet.name(), "planet");
        assert_eq!(planet.geometry().vertex_count(), 32 * 64 * 6);
        assert!(scene.iter().skip(1).all(|(_, d)| d.name() == "asteroid"));
    }

    #[test]
    fn test_single_asteroid_builds() {
        let settings = PlanetSettings {
            asteroid_count: 1,
            ..Default::default()
        };
        let sketch = PlanetSketch::new(settings);
        let drawable = sketch.asteroid(0, &mut StdRng::seed_from_u64(5));
        assert_eq!(drawable.name(), "asteroid");
    }

    #[test]
    fn test_planet_uses_view_projection() {
        let camera = PlanetSettings::default().camera.matrices(1.0);
        let frame = FrameContext {
            time: 2.0,
            frame: 0,
            aspect: 1.0,
            camera: Some(camera),
        };
        let planet = Planet {
            color_mult: Vec4::new(1.0, 0.3, 0.3, 1.0),
            reverse_light_direction: Vec3::Z,
        };
        let uniforms = planet.update(2.0, &frame);
        assert_eq!(uniforms.mat4(U_MATRIX), Some(camera.view_projection));
        assert_eq!(uniforms.vec4(U_COLOR_MULT), Some(Vec4::new(1.0, 0.3, 0.3, 1.0)));
    }
}
