use glam::{Mat4, Vec3};

pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Right-handed perspective projection with a 0..1 depth range (wgpu clip space)
pub fn perspective(field_of_view: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(field_of_view, aspect, near, far)
}

/// Camera pose matrix placing the camera at `eye` looking toward `target`.
///
/// This is the camera's world transform, not the view matrix. Invert it to
/// get the view matrix.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let z_axis = normalize(eye - target);
    let x_axis = normalize(up.cross(z_axis));
    let y_axis = normalize(z_axis.cross(x_axis));

    Mat4::from_cols(
        x_axis.extend(0.0),
        y_axis.extend(0.0),
        z_axis.extend(0.0),
        eye.extend(1.0),
    )
}

/// Post-multiplies `m` by a translation
pub fn translate(m: Mat4, offset: Vec3) -> Mat4 {
    m * Mat4::from_translation(offset)
}

/// Post-multiplies `m` by a rotation about the X axis
pub fn x_rotate(m: Mat4, angle: f32) -> Mat4 {
    m * Mat4::from_rotation_x(angle)
}

/// Post-multiplies `m` by a rotation about the Y axis
pub fn y_rotate(m: Mat4, angle: f32) -> Mat4 {
    m * Mat4::from_rotation_y(angle)
}

/// Post-multiplies `m` by a rotation about the Z axis
pub fn z_rotate(m: Mat4, angle: f32) -> Mat4 {
    m * Mat4::from_rotation_z(angle)
}

/// Matrix used to carry normals from model space into world space
pub fn inverse_transpose(m: Mat4) -> Mat4 {
    m.inverse().transpose()
}

/// Unit vector in the direction of `v`, or zero for degenerate input
pub fn normalize(v: Vec3) -> Vec3 {
    if v.length() > 0.00001 {
        v.normalize()
    } else {
        Vec3::ZERO
    }
}

/// Re-maps `value` from the range `[start1, stop1]` into `[start2, stop2]`.
/// An empty source range maps everything onto `start2`.
pub fn map_range(value: f32, start1: f32, stop1: f32, start2: f32, stop2: f32) -> f32 {
    let span = stop1 - start1;
    if span == 0.0 {
        return start2;
    }
    start2 + (stop2 - start2) * ((value - start1) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_to_rad() {
        assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((deg_to_rad(60.0) - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_places_camera_at_eye() {
        let eye = Vec3::new(100.0, 150.0, 200.0);
        let camera = look_at(eye, Vec3::new(0.0, -35.0, 0.0), Vec3::Y);
        let origin = camera.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(eye, 1e-4));
    }

    #[test]
    fn test_look_at_faces_target() {
        let eye = Vec3::new(0.0, 0.0, 10.0);
        let camera = look_at(eye, Vec3::ZERO, Vec3::Y);
        let view = camera.inverse();
        // Target sits straight down the view's -Z axis
        let target_in_view = view.transform_point3(Vec3::ZERO);
        assert!(target_in_view.abs_diff_eq(Vec3::new(0.0, 0.0, -10.0), 1e-4));
    }

    #[test]
    fn test_look_at_matches_glam_view() {
        let eye = Vec3::new(100.0, 150.0, 200.0);
        let target = Vec3::new(0.0, 35.0, 0.0);
        let view = look_at(eye, target, Vec3::Y).inverse();
        assert!(view.abs_diff_eq(Mat4::look_at_rh(eye, target, Vec3::Y), 1e-4));
    }

    #[test]
    fn test_translate_post_multiplies() {
        let base = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let m = translate(base, Vec3::new(0.0, 0.0, 35.0));
        // Translation happens in the rotated frame
        let p = m.transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(35.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_rotate_helpers_compose_in_call_order() {
        let m = x_rotate(translate(Mat4::IDENTITY, Vec3::new(10.0, 0.0, 0.0)), 0.5);
        let expected = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)) * Mat4::from_rotation_x(0.5);
        assert!(m.abs_diff_eq(expected, 1e-6));

        let spun = z_rotate(Mat4::IDENTITY, std::f32::consts::FRAC_PI_2);
        assert!(spun.transform_point3(Vec3::X).abs_diff_eq(Vec3::Y, 1e-6));

        let turned = y_rotate(Mat4::IDENTITY, std::f32::consts::FRAC_PI_2);
        assert!(turned.transform_point3(Vec3::Z).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_inverse_transpose_of_rotation_is_rotation() {
        let r = Mat4::from_rotation_x(0.7);
        assert!(inverse_transpose(r).abs_diff_eq(r, 1e-5));
    }

    #[test]
    fn test_normalize_degenerate_is_zero() {
        assert_eq!(normalize(Vec3::ZERO), Vec3::ZERO);
        let n = normalize(Vec3::new(0.7, 0.5, -1.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_map_range() {
        assert_eq!(map_range(0.0, 0.0, 29.0, 0.0, 1.0), 0.0);
        assert_eq!(map_range(29.0, 0.0, 29.0, 0.0, 1.0), 1.0);
        assert_eq!(map_range(3.0, 0.0, 6.0, 0.0, 1.0), 0.5);
        assert_eq!(map_range(5.0, 0.0, 10.0, 10.0, 20.0), 15.0);
    }

    #[test]
    fn test_map_range_empty_source() {
        assert_eq!(map_range(0.0, 0.0, 0.0, 0.0, 1.0), 0.0);
    }
}
