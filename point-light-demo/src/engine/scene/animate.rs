use bevy::prelude::*;
use constants::simulation::PARTICLE_ALPHA;

use crate::engine::core::config::DemoConfig;
use crate::engine::core::frame::{FrameState, LightMode};
use crate::engine::scene::setup::{
    AnimatedMesh, Billboard, LightMarker, MovingCube, ParticleBillboard, ProjectileBillboard,
    Skybox, SpinningCube,
};
use crate::engine::simulation::lights::LightTable;
use crate::engine::simulation::particles::ParticleSystem;
use crate::engine::simulation::projectiles::ProjectileMagazine;

/// Translation of the moving cube for a given oscillation offset.
pub fn moving_cube_position(offset: f32) -> Vec3 {
    Vec3::new(-7.0 + offset, 4.0, -2.0 + offset)
}

pub fn animate_scene_objects(
    frame: Res<FrameState>,
    mut spinning: Query<&mut Transform, (With<SpinningCube>, Without<MovingCube>)>,
    mut moving: Query<&mut Transform, (With<MovingCube>, Without<SpinningCube>)>,
) {
    for mut transform in &mut spinning {
        transform.rotation = frame.animation.rotation();
    }
    for mut transform in &mut moving {
        transform.translation = moving_cube_position(frame.animation.offset());
    }
}

/// Keeps the sky cube centred on the eye so it never clips.
pub fn follow_camera_with_skybox(
    frame: Res<FrameState>,
    mut skyboxes: Query<&mut Transform, With<Skybox>>,
) {
    for mut transform in &mut skyboxes {
        transform.translation = frame.camera.eye;
    }
}

fn shown(visible: bool) -> Visibility {
    if visible {
        Visibility::Visible
    } else {
        Visibility::Hidden
    }
}

/// Billboard tint for a particle's colour intensity.
pub fn particle_tint(colour: f32) -> LinearRgba {
    LinearRgba::new(colour, colour, colour, PARTICLE_ALPHA)
}

pub fn update_particle_billboards(
    frame: Res<FrameState>,
    particles: Res<ParticleSystem>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut billboards: Query<(
        &ParticleBillboard,
        &MeshMaterial3d<StandardMaterial>,
        &mut Transform,
        &mut Visibility,
    )>,
) {
    let active = frame.mode == LightMode::Particles;
    for (billboard, material, mut transform, mut visibility) in &mut billboards {
        let position = particles.positions().get(billboard.0);
        let colour = particles.colours().get(billboard.0);
        match (position, colour) {
            (Some(position), Some(colour)) if active => {
                transform.translation = *position;
                *visibility = Visibility::Visible;

                let tint = Color::LinearRgba(particle_tint(*colour));
                // Only touch the asset when the colour moved, so it is not re-uploaded every frame.
                let stale = materials
                    .get(&material.0)
                    .is_some_and(|current| current.base_color != tint);
                if stale {
                    if let Some(current) = materials.get_mut(&material.0) {
                        current.base_color = tint;
                    }
                }
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

pub fn update_projectile_billboards(
    frame: Res<FrameState>,
    projectiles: Res<ProjectileMagazine>,
    mut billboards: Query<(&ProjectileBillboard, &mut Transform, &mut Visibility)>,
) {
    let active = frame.mode == LightMode::Gun;
    for (billboard, mut transform, mut visibility) in &mut billboards {
        match projectiles.iter().nth(billboard.0) {
            Some(projectile) if active => {
                transform.translation = projectile.position();
                transform.scale = projectile.scale();
                *visibility = Visibility::Visible;
            }
            _ => *visibility = Visibility::Hidden,
        }
    }
}

/// Turns every billboard quad towards the viewer.
pub fn face_billboards_to_camera(
    frame: Res<FrameState>,
    mut billboards: Query<&mut Transform, With<Billboard>>,
) {
    let rotation = frame.camera.transform().rotation;
    for mut transform in &mut billboards {
        transform.rotation = rotation;
    }
}

pub fn update_light_markers(
    frame: Res<FrameState>,
    lights: Res<LightTable>,
    mut markers: Query<(&LightMarker, &mut Transform, &mut Visibility)>,
) {
    let gun = frame.mode == LightMode::Gun;
    for (marker, mut transform, mut visibility) in &mut markers {
        let position = (marker.0 < lights.active_count())
            .then(|| lights.get(marker.0))
            .flatten();
        if let Some(position) = position {
            transform.translation = position;
        }
        *visibility = shown(gun && position.is_some());
    }
}

/// Morphs keyframed meshes between frames when enabled in the config.
pub fn animate_keyframe_meshes(
    time: Res<Time>,
    config: Res<DemoConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut animated: Query<(&Mesh3d, &mut AnimatedMesh)>,
) {
    if !config.animate_keyframe_mesh {
        return;
    }
    for (mesh_handle, mut animated_mesh) in &mut animated {
        animated_mesh.0.advance(time.delta_secs());
        let positions: Vec<[f32; 3]> = animated_mesh
            .0
            .interpolated()
            .iter()
            .map(|position| position.to_array())
            .collect();
        if positions.is_empty() {
            continue;
        }
        if let Some(mesh) = meshes.get_mut(&mesh_handle.0) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
            mesh.compute_normals();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;
    use constants::render_settings::POINT_LIGHT_COUNT;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn billboard_tints(world: &mut World) -> Vec<Color> {
        let mut handles: Vec<(usize, Handle<StandardMaterial>)> = world
            .query::<(&ParticleBillboard, &MeshMaterial3d<StandardMaterial>)>()
            .iter(world)
            .map(|(billboard, material)| (billboard.0, material.0.clone()))
            .collect();
        handles.sort_by_key(|(index, _)| *index);
        let materials = world.resource::<Assets<StandardMaterial>>();
        handles
            .iter()
            .map(|(_, handle)| materials.get(handle).unwrap().base_color)
            .collect()
    }

    #[test]
    fn particle_billboards_take_each_particles_colour_and_follow_a_reset() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut world = World::new();
        world.insert_resource(FrameState::new());
        world.insert_resource(ParticleSystem::new(POINT_LIGHT_COUNT, &mut rng));
        let mut materials = Assets::<StandardMaterial>::default();
        for index in 0..POINT_LIGHT_COUNT {
            let handle = materials.add(StandardMaterial::default());
            world.spawn((
                ParticleBillboard(index),
                MeshMaterial3d(handle),
                Transform::default(),
                Visibility::Hidden,
            ));
        }
        world.insert_resource(materials);

        world
            .run_system_once(update_particle_billboards)
            .expect("system runs");
        let before = billboard_tints(&mut world);
        let expected: Vec<Color> = world
            .resource::<ParticleSystem>()
            .colours()
            .iter()
            .map(|colour| Color::LinearRgba(particle_tint(*colour)))
            .collect();
        assert_eq!(before, expected);

        world
            .resource_mut::<ParticleSystem>()
            .advance(0.1, true, &mut rng);
        world
            .run_system_once(update_particle_billboards)
            .expect("system runs");

        assert_ne!(billboard_tints(&mut world), before);
    }

    #[test]
    fn moving_cube_tracks_the_offset_diagonally() {
        assert_eq!(moving_cube_position(0.0), Vec3::new(-7.0, 4.0, -2.0));
        assert_eq!(moving_cube_position(1.5), Vec3::new(-5.5, 4.0, -0.5));
    }

    #[test]
    fn light_markers_only_show_in_gun_mode() {
        let mut world = World::new();
        let mut frame = FrameState::new();
        frame.mode = LightMode::Gun;
        let mut lights = LightTable::default();
        lights.publish(&[Vec3::new(1.0, 2.0, 3.0)]);
        world.insert_resource(frame);
        world.insert_resource(lights);
        let first = world
            .spawn((LightMarker(0), Transform::default(), Visibility::Hidden))
            .id();
        let second = world
            .spawn((LightMarker(1), Transform::default(), Visibility::Hidden))
            .id();

        world
            .run_system_once(update_light_markers)
            .expect("system runs");

        assert_eq!(*world.get::<Visibility>(first).unwrap(), Visibility::Visible);
        assert_eq!(
            world.get::<Transform>(first).unwrap().translation,
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(*world.get::<Visibility>(second).unwrap(), Visibility::Hidden);

        world.resource_mut::<FrameState>().mode = LightMode::Particles;
        world
            .run_system_once(update_light_markers)
            .expect("system runs");

        assert_eq!(*world.get::<Visibility>(first).unwrap(), Visibility::Hidden);
    }

    #[test]
    fn skybox_recentres_on_the_eye() {
        let mut world = World::new();
        let frame = FrameState::new();
        let eye = frame.camera.eye;
        world.insert_resource(frame);
        let skybox = world.spawn((Skybox, Transform::default())).id();

        world
            .run_system_once(follow_camera_with_skybox)
            .expect("system runs");

        assert_eq!(world.get::<Transform>(skybox).unwrap().translation, eye);
    }
}
