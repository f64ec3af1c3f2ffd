use glam::Vec3;
use rand::Rng;

use crate::types::Vertex;

/// Number of consecutive vertices sharing one random color (two triangles)
const VERTS_PER_COLOR: usize = 6;

/// Indexed UV sphere
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

/// Build an indexed UV sphere.
///
/// Latitude runs 0..PI over `subdivisions_height` rows and longitude runs
/// 0..2PI over `subdivisions_axis` columns, with a duplicated seam column.
pub fn sphere_vertices(radius: f32, subdivisions_axis: u32, subdivisions_height: u32) -> SphereMesh {
    let axis = subdivisions_axis.max(1);
    let height = subdivisions_height.max(1);

    let vertex_count = ((axis + 1) * (height + 1)) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);

    for y in 0..=height {
        for x in 0..=axis {
            let u = x as f32 / axis as f32;
            let v = y as f32 / height as f32;
            let theta = std::f32::consts::TAU * u;
            let phi = std::f32::consts::PI * v;

            let unit = Vec3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
            positions.push(unit * radius);
            normals.push(unit);
        }
    }

    let verts_around = axis + 1;
    let mut indices = Vec::with_capacity((axis * height * 6) as usize);
    for x in 0..axis {
        for y in 0..height {
            indices.extend_from_slice(&[
                y * verts_around + x,
                y * verts_around + x + 1,
                (y + 1) * verts_around + x,
            ]);
            indices.extend_from_slice(&[
                (y + 1) * verts_around + x,
                y * verts_around + x + 1,
                (y + 1) * verts_around + x + 1,
            ]);
        }
    }

    SphereMesh { positions, normals, indices }
}

impl SphereMesh {
    /// Expand the index list into a flat triangle list, painting every
    /// group of six vertices with one random light color.
    pub fn flatten_with_random_colors<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vertex> {
        let mut color = [1.0; 4];
        self.indices
            .iter()
            .enumerate()
            .map(|(n, &index)| {
                if n % VERTS_PER_COLOR == 0 {
                    color = random_light_color(rng);
                }
                let i = index as usize;
                Vertex::new(self.positions[i].to_array(), self.normals[i].to_array(), color)
            })
            .collect()
    }
}

/// Opaque color with each channel in [128, 255] / 255
fn random_light_color<R: Rng + ?Sized>(rng: &mut R) -> [f32; 4] {
    let mut channel = || rng.gen_range(128u32..256) as f32 / 255.0;
    [channel(), channel(), channel(), 1.0]
}
