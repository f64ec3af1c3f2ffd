mod line_loop;
mod sphere;

pub use line_loop::line_loop_vertices;
pub use sphere::{sphere_vertices, SphereMesh};

use crate::types::Vertex;

/// How the vertex list is assembled into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Points,
    /// Closed outline; the last vertex repeats the first
    LineLoop,
}

impl Topology {
    pub fn primitive(self) -> wgpu::PrimitiveTopology {
        match self {
            Topology::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Topology::Points => wgpu::PrimitiveTopology::PointList,
            Topology::LineLoop => wgpu::PrimitiveTopology::LineStrip,
        }
    }
}

/// CPU-side geometry for one drawable, uploaded once at setup
#[derive(Debug, Clone)]
pub struct Geometry {
    vertices: Vec<Vertex>,
    topology: Topology,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, topology: Topology) -> Self {
        Self { vertices, topology }
    }

    /// Non-indexed triangle sphere with one random color per quad
    pub fn sphere<R: rand::Rng + ?Sized>(
        radius: f32,
        subdivisions_axis: u32,
        subdivisions_height: u32,
        rng: &mut R,
    ) -> Self {
        let mesh = sphere_vertices(radius, subdivisions_axis, subdivisions_height);
        Self::new(mesh.flatten_with_random_colors(rng), Topology::Triangles)
    }

    /// Same vertices as [`Geometry::sphere`], drawn as a point cloud
    pub fn sphere_points<R: rand::Rng + ?Sized>(
        radius: f32,
        subdivisions_axis: u32,
        subdivisions_height: u32,
        rng: &mut R,
    ) -> Self {
        let mesh = sphere_vertices(radius, subdivisions_axis, subdivisions_height);
        Self::new(mesh.flatten_with_random_colors(rng), Topology::Points)
    }

    pub fn line_loop(radius: f32, detail: u32, color: [f32; 4]) -> Self {
        Self::new(line_loop_vertices(radius, detail, color), Topology::LineLoop)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sphere_vertex_count() {
        let mut rng = StdRng::seed_from_u64(0);
        let geometry = Geometry::sphere(30.0, 32, 64, &mut rng);
        assert_eq!(geometry.vertex_count(), 32 * 64 * 6);
        assert_eq!(geometry.topology(), Topology::Triangles);
    }

    #[test]
    fn test_sphere_points_topology() {
        let mut rng = StdRng::seed_from_u64(0);
        let geometry = Geometry::sphere_points(10.0, 12, 24, &mut rng);
        assert_eq!(geometry.topology(), Topology::Points);
        assert_eq!(geometry.vertex_count(), 12 * 24 * 6);
    }

    #[test]
    fn test_topology_maps_to_wgpu() {
        assert_eq!(Topology::Triangles.primitive(), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(Topology::Points.primitive(), wgpu::PrimitiveTopology::PointList);
        assert_eq!(Topology::LineLoop.primitive(), wgpu::PrimitiveTopology::LineStrip);
    }
}
