use bevy::prelude::*;
use bevy::render::camera::{PerspectiveProjection, Projection};
use constants::render_settings::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CLEAR_COLOUR, POINT_LIGHT_COUNT,
    SKYBOX_HALF_EXTENT,
};

use crate::engine::camera::fps_camera::MainCamera;
use crate::engine::core::config::DemoConfig;
use crate::engine::core::frame::FrameState;
use crate::engine::loading::environment_cubemap::EnvironmentCubemap;
use crate::engine::loading::texture_files::SceneTextures;
use crate::engine::render::materials::parallax_material::ParallaxMaterial;
use crate::engine::render::materials::scene_material::SceneMaterial;
use crate::engine::render::materials::skybox_material::{SkyboxMaterial, SkyboxSettings};
use crate::engine::render::shadow::depth_cubemaps::DepthCubemaps;
use crate::engine::render::shadow::depth_pass::ShadowCaster;
use crate::engine::scene::animate::particle_tint;
use crate::engine::scene::meshes::{high_poly_mesh, keyframe_mesh, tangent_cube, unit_cube};
use crate::engine::simulation::animation::KeyframeAnimation;

#[derive(Component)]
pub struct SpinningCube;

#[derive(Component)]
pub struct MovingCube;

#[derive(Component)]
pub struct Skybox;

/// Camera-facing quad.
#[derive(Component)]
pub struct Billboard;

#[derive(Component)]
pub struct ParticleBillboard(pub usize);

#[derive(Component)]
pub struct ProjectileBillboard(pub usize);

/// Small cube drawn at a light's position in gun mode.
#[derive(Component)]
pub struct LightMarker(pub usize);

#[derive(Component)]
pub struct AnimatedMesh(pub KeyframeAnimation);

pub const TALL_CUBE_COUNT: usize = 5;

/// Height scale of tall cube `b`; integer division steps it every three cubes.
pub fn tall_cube_height(b: usize) -> f32 {
    1.0 + (b / 3) as f32
}

pub fn spawn_camera(mut commands: Commands, frame: Res<FrameState>) {
    commands.insert_resource(ClearColor(Color::srgb(
        CLEAR_COLOUR[0],
        CLEAR_COLOUR[1],
        CLEAR_COLOUR[2],
    )));
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        frame.camera.transform(),
        MainCamera,
    ));
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_scene(
    mut commands: Commands,
    config: Res<DemoConfig>,
    textures: Res<SceneTextures>,
    cubemaps: Res<DepthCubemaps>,
    environment: Res<EnvironmentCubemap>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut scene_materials: ResMut<Assets<SceneMaterial>>,
    mut parallax_materials: ResMut<Assets<ParallaxMaterial>>,
    mut skybox_materials: ResMut<Assets<SkyboxMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
) {
    println!("=== SHADOWED POINT LIGHT DEMO ===");

    let cube = meshes.add(unit_cube());
    let scene_surface = scene_materials.add(SceneMaterial::new(textures.scene.clone(), &cubemaps));
    let metal_surface = scene_materials.add(SceneMaterial::new(textures.metal.clone(), &cubemaps));
    let fabric_surface =
        scene_materials.add(SceneMaterial::new(textures.fabric.clone(), &cubemaps));
    let creature_surface =
        scene_materials.add(SceneMaterial::new(textures.creature.clone(), &cubemaps));

    // Ground
    commands.spawn((
        Mesh3d(cube.clone()),
        MeshMaterial3d(scene_surface.clone()),
        Transform::from_xyz(-10.0, -0.1, -10.0).with_scale(Vec3::new(20.0, 0.1, 20.0)),
        ShadowCaster,
    ));

    commands.spawn((
        Mesh3d(cube.clone()),
        MeshMaterial3d(scene_surface.clone()),
        Transform::from_xyz(-6.0, 1.0, -3.0).with_scale(Vec3::splat(0.5)),
        SpinningCube,
        ShadowCaster,
    ));

    for b in 0..TALL_CUBE_COUNT {
        let step = 2.0 * b as f32;
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(scene_surface.clone()),
            Transform::from_xyz(-10.0 + step, 2.0, -12.0 + step)
                .with_scale(Vec3::new(0.5, tall_cube_height(b), 0.5)),
            ShadowCaster,
        ));
    }

    commands.spawn((
        Mesh3d(cube.clone()),
        MeshMaterial3d(metal_surface),
        Transform::from_xyz(-7.0, 4.0, -2.0).with_scale(Vec3::new(0.3, 0.5, 0.6)),
        MovingCube,
        ShadowCaster,
    ));

    commands.spawn((
        Mesh3d(meshes.add(high_poly_mesh())),
        MeshMaterial3d(fabric_surface),
        Transform::from_xyz(-7.0, 0.5, -2.0).with_scale(Vec3::splat(0.5)),
        ShadowCaster,
    ));

    let (creature_mesh, animation) = keyframe_mesh(config.keyframe_fps);
    commands.spawn((
        Mesh3d(meshes.add(creature_mesh)),
        MeshMaterial3d(creature_surface),
        Transform::from_xyz(-8.0, 1.2, -6.0).with_scale(Vec3::splat(0.6)),
        AnimatedMesh(animation),
        ShadowCaster,
    ));

    commands.spawn((
        Mesh3d(meshes.add(tangent_cube())),
        MeshMaterial3d(parallax_materials.add(ParallaxMaterial::new(
            textures.parallax_diffuse.clone(),
            textures.parallax_height.clone(),
            textures.parallax_normal.clone(),
            &cubemaps,
        ))),
        Transform::from_xyz(1.0, 2.0, -5.0),
        ShadowCaster,
    ));

    commands.spawn((
        Mesh3d(cube.clone()),
        MeshMaterial3d(skybox_materials.add(SkyboxMaterial {
            settings: SkyboxSettings::default(),
            environment: environment.0.clone(),
            depth_map: cubemaps.handles[0].clone(),
        })),
        Transform::from_scale(Vec3::splat(SKYBOX_HALF_EXTENT)),
        Skybox,
    ));

    spawn_light_markers(&mut commands, &cube, &mut standard_materials);
    spawn_billboards(
        &mut commands,
        &mut meshes,
        &mut standard_materials,
        &textures,
        &config,
    );
}

fn spawn_light_markers(
    commands: &mut Commands,
    cube: &Handle<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });
    for light in 0..POINT_LIGHT_COUNT {
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(marker_material.clone()),
            Transform::from_scale(Vec3::splat(0.05)),
            Visibility::Hidden,
            LightMarker(light),
        ));
    }
}

fn billboard_material(texture: Handle<Image>, tint: LinearRgba) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::LinearRgba(tint),
        base_color_texture: Some(texture),
        alpha_mode: AlphaMode::Add,
        unlit: true,
        cull_mode: None,
        ..default()
    }
}

fn spawn_billboards(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    textures: &SceneTextures,
    config: &DemoConfig,
) {
    let quad = meshes.add(Rectangle::new(1.0, 1.0));

    for index in 0..POINT_LIGHT_COUNT {
        commands.spawn((
            Mesh3d(quad.clone()),
            MeshMaterial3d(materials.add(billboard_material(
                textures.particle.clone(),
                particle_tint(1.0),
            ))),
            Transform::from_scale(Vec3::splat(config.particle_billboard_size)),
            Billboard,
            ParticleBillboard(index),
        ));
    }

    let projectile_material = materials.add(billboard_material(
        textures.projectile.clone(),
        LinearRgba::WHITE,
    ));
    for index in 0..POINT_LIGHT_COUNT {
        commands.spawn((
            Mesh3d(quad.clone()),
            MeshMaterial3d(projectile_material.clone()),
            Transform::default(),
            Visibility::Hidden,
            Billboard,
            ProjectileBillboard(index),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tall_cubes_step_up_every_three() {
        let heights: Vec<f32> = (0..TALL_CUBE_COUNT).map(tall_cube_height).collect();

        assert_eq!(heights, vec![1.0, 1.0, 1.0, 2.0, 2.0]);
    }
}
