//! Procedural stand-ins for the demo's model files.
use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;

use crate::engine::simulation::animation::KeyframeAnimation;

/// Unit cube spanning [-1, 1] on every axis; scene transforms assume this extent.
pub fn unit_cube() -> Mesh {
    Cuboid::from_length(2.0).into()
}

/// Cube with tangents for normal and parallax mapping. Falls back to the
/// plain cube if tangent generation fails.
pub fn tangent_cube() -> Mesh {
    match unit_cube().with_generated_tangents() {
        Ok(mesh) => mesh,
        Err(err) => {
            warn!("Tangent generation failed ({err}), parallax cube will be flat");
            unit_cube()
        }
    }
}

/// Dense sphere used as the static high-poly model.
pub fn high_poly_mesh() -> Mesh {
    match Sphere::new(1.0).mesh().ico(5) {
        Ok(mesh) => mesh,
        Err(err) => {
            warn!("Icosphere generation failed ({err}), using UV sphere");
            Sphere::new(1.0).mesh().uv(64, 32)
        }
    }
}

const KEYFRAME_COUNT: usize = 6;
const KEYFRAME_WOBBLE: f32 = 0.15;

/// Base mesh for the keyframe-animated model and its keyframes. Each frame
/// ripples the sphere along its height by a phase-shifted wave.
pub fn keyframe_mesh(frames_per_second: f32) -> (Mesh, KeyframeAnimation) {
    let mesh: Mesh = Sphere::new(1.0).mesh().uv(32, 16);

    let base = match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) => {
            positions.iter().copied().map(Vec3::from).collect()
        }
        _ => Vec::new(),
    };

    let frames = keyframes(&base, KEYFRAME_COUNT);
    (mesh, KeyframeAnimation::new(frames, frames_per_second))
}

fn keyframes(base: &[Vec3], count: usize) -> Vec<Vec<Vec3>> {
    (0..count)
        .map(|frame| {
            let phase = frame as f32 / count as f32 * std::f32::consts::TAU;
            base.iter()
                .map(|p| *p * (1.0 + KEYFRAME_WOBBLE * (phase + p.y * 3.0).sin()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_cube_spans_minus_one_to_one() {
        let mesh = unit_cube();
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("cube has no positions");
        };

        let max = positions
            .iter()
            .flatten()
            .fold(f32::MIN, |acc, v| acc.max(*v));
        assert_eq!(max, 1.0);
    }

    #[test]
    fn tangent_cube_has_tangents() {
        assert!(tangent_cube().attribute(Mesh::ATTRIBUTE_TANGENT).is_some());
    }

    #[test]
    fn keyframes_match_the_mesh_vertex_count() {
        let (mesh, animation) = keyframe_mesh(8.0);

        assert_eq!(animation.frame_count(), KEYFRAME_COUNT);
        assert_eq!(animation.interpolated().len(), mesh.count_vertices());
    }

    #[test]
    fn keyframes_differ_from_each_other() {
        let base = vec![Vec3::X, Vec3::Y, Vec3::Z];

        let frames = keyframes(&base, 4);

        assert_ne!(frames[0], frames[1]);
        assert_eq!(frames[0].len(), base.len());
    }
}
