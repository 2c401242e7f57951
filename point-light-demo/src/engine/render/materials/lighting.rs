use bevy::{prelude::*, render::render_resource::ShaderType};
use constants::render_settings::{
    LIGHT_AMBIENT, LIGHT_CONSTANT, LIGHT_DIFFUSE, LIGHT_LINEAR, LIGHT_QUADRATIC, LIGHT_SPECULAR,
    MATERIAL_SHININESS, POINT_LIGHT_COUNT, SHADOW_BIAS, SHADOW_FAR,
};

use crate::engine::core::frame::FrameState;
use crate::engine::simulation::lights::LightTable;

/// Point-light block shared by every lit material.
#[derive(Debug, Clone, Copy, ShaderType)]
pub struct LightingUniform {
    pub view_position: Vec3,
    pub active_lights: u32,
    pub light_positions: [Vec4; POINT_LIGHT_COUNT],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub far_plane: f32,
    pub shadow_bias: f32,
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, &LightTable::default())
    }
}

impl LightingUniform {
    pub fn new(view_position: Vec3, lights: &LightTable) -> Self {
        Self {
            view_position,
            active_lights: lights.active_count() as u32,
            light_positions: lights.positions().map(|p| p.extend(1.0)),
            ambient: LIGHT_AMBIENT,
            diffuse: LIGHT_DIFFUSE,
            specular: LIGHT_SPECULAR,
            shininess: MATERIAL_SHININESS,
            constant: LIGHT_CONSTANT,
            linear: LIGHT_LINEAR,
            quadratic: LIGHT_QUADRATIC,
            far_plane: SHADOW_FAR,
            shadow_bias: SHADOW_BIAS,
        }
    }
}

/// Materials that carry a `LightingUniform`.
pub trait LitMaterial: Asset {
    fn lighting_mut(&mut self) -> &mut LightingUniform;
}

/// Rewrites the lighting block of every `M` from this frame's light table.
pub fn update_lighting<M: LitMaterial>(
    frame: Res<FrameState>,
    lights: Res<LightTable>,
    mut materials: ResMut<Assets<M>>,
) {
    let lighting = LightingUniform::new(frame.camera.eye, &lights);
    for (_, material) in materials.iter_mut() {
        *material.lighting_mut() = lighting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn lighting_tracks_the_active_count() {
        let mut lights = LightTable::default();
        lights.publish(&[Vec3::ONE, Vec3::X]);

        let lighting = LightingUniform::new(Vec3::new(1.0, 2.0, 3.0), &lights);

        assert_eq!(lighting.active_lights, 2);
        assert_eq!(lighting.light_positions[0], Vec4::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(lighting.view_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(lighting.far_plane, SHADOW_FAR);
    }

    #[test]
    fn update_writes_every_material() {
        #[derive(Asset, TypePath, Default)]
        struct Probe(LightingUniform);

        impl LitMaterial for Probe {
            fn lighting_mut(&mut self) -> &mut LightingUniform {
                &mut self.0
            }
        }

        let mut world = World::new();
        let mut frame = FrameState::new();
        frame.camera.eye = Vec3::splat(4.0);
        world.insert_resource(frame);
        let mut lights = LightTable::default();
        lights.publish(&[Vec3::Y]);
        world.insert_resource(lights);
        let mut probes = Assets::<Probe>::default();
        let handle = probes.add(Probe::default());
        world.insert_resource(probes);

        world.run_system_once(update_lighting::<Probe>).unwrap();

        let probe = world.resource::<Assets<Probe>>().get(&handle).unwrap();
        assert_eq!(probe.0.view_position, Vec3::splat(4.0));
        assert_eq!(probe.0.active_lights, 1);
    }
}
