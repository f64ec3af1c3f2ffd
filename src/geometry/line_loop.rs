use crate::math::map_range;
use crate::types::Vertex;

/// Regular polygon outline of `detail` segments.
///
/// Produces `detail + 1` vertices: the last one lands back on the first so
/// the outline closes when drawn as a strip.
pub fn line_loop_vertices(radius: f32, detail: u32, color: [f32; 4]) -> Vec<Vertex> {
    (0..=detail)
        .map(|i| {
            let i_norm = map_range(i as f32, 0.0, detail as f32, 0.0, 1.0);
            let angle = i_norm * std::f32::consts::PI * 2.0;
            Vertex::flat(radius * angle.cos(), radius * angle.sin(), color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_six_has_seven_vertices() {
        assert_eq!(line_loop_vertices(1.0, 6, [1.0; 4]).len(), 7);
    }

    #[test]
    fn test_loop_closes() {
        let vertices = line_loop_vertices(2.5, 6, [1.0; 4]);
        let first = vertices[0].position();
        let last = vertices[vertices.len() - 1].position();
        assert!(first.abs_diff_eq(last, 1e-5));
    }

    #[test]
    fn test_vertices_on_circle() {
        for v in line_loop_vertices(2.5, 6, [1.0; 4]) {
            assert!((v.position().length() - 2.5).abs() < 1e-5);
            assert_eq!(v.position[2], 0.0);
        }
    }

    #[test]
    fn test_zero_radius_collapses_to_origin() {
        for v in line_loop_vertices(0.0, 6, [1.0; 4]) {
            assert_eq!(v.position().length(), 0.0);
        }
    }
}
