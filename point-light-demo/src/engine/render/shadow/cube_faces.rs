use bevy::math::{Mat4, Vec3};
use constants::render_settings::{SHADOW_FAR, SHADOW_FOV_DEGREES, SHADOW_NEAR};

/// Look direction and up vector for each cube layer, in layer order
/// +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_FACES: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Y),
    (Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::Y, Vec3::Z),
    (Vec3::NEG_Y, Vec3::NEG_Z),
    (Vec3::Z, Vec3::NEG_Y),
    (Vec3::NEG_Z, Vec3::NEG_Y),
];

/// Square 90 degree projection covering one cube face.
///
/// Rows of a cube layer are addressed top-down, so clip-space y is flipped
/// to keep the layer contents where cube sampling expects them. This
/// reverses winding, which is why the depth pass draws without culling.
pub fn cube_face_projection() -> Mat4 {
    let flip_y = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));
    flip_y * Mat4::perspective_rh(SHADOW_FOV_DEGREES.to_radians(), 1.0, SHADOW_NEAR, SHADOW_FAR)
}

/// View-projection matrices for the six faces around a light, in layer order.
pub fn cube_face_view_projections(light_position: Vec3) -> [Mat4; 6] {
    let projection = cube_face_projection();
    CUBE_FACES.map(|(direction, up)| {
        projection * Mat4::look_at_rh(light_position, light_position + direction, up)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unproject_centre(view_projection: &Mat4) -> Vec3 {
        view_projection.inverse().project_point3(Vec3::new(0.0, 0.0, 0.5))
    }

    #[test]
    fn each_face_looks_down_one_axis() {
        let light = Vec3::new(0.7, 2.2, 2.0);
        let matrices = cube_face_view_projections(light);

        for (matrix, (direction, _)) in matrices.iter().zip(CUBE_FACES) {
            let looked_at = (unproject_centre(matrix) - light).normalize();
            assert!(
                looked_at.abs_diff_eq(direction, 1e-4),
                "expected {direction}, got {looked_at}"
            );
        }
    }

    #[test]
    fn faces_cover_all_six_axes_once() {
        let matrices = cube_face_view_projections(Vec3::ZERO);
        let directions: Vec<Vec3> = matrices
            .iter()
            .map(|m| unproject_centre(m).normalize())
            .collect();

        for axis in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            let hits = directions
                .iter()
                .filter(|d| d.abs_diff_eq(axis, 1e-4))
                .count();
            assert_eq!(hits, 1, "axis {axis}");
        }
    }

    #[test]
    fn up_vectors_are_never_parallel_to_the_look_direction() {
        for (direction, up) in CUBE_FACES {
            assert_eq!(direction.dot(up), 0.0);
        }
    }

    #[test]
    fn vertical_faces_use_z_up_and_others_negative_y() {
        assert_eq!(CUBE_FACES[2].1, Vec3::Z);
        assert_eq!(CUBE_FACES[3].1, Vec3::NEG_Z);
        for face in [0, 1, 4, 5] {
            assert_eq!(CUBE_FACES[face].1, Vec3::NEG_Y);
        }
    }

    #[test]
    fn far_plane_maps_to_depth_one() {
        let projection = cube_face_projection();

        let far = projection.project_point3(Vec3::new(0.0, 0.0, -SHADOW_FAR));
        let near = projection.project_point3(Vec3::new(0.0, 0.0, -SHADOW_NEAR));

        assert!((far.z - 1.0).abs() < 1e-4);
        assert!(near.z.abs() < 1e-4);
    }
}
