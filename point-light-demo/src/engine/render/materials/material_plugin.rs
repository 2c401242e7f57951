use bevy::prelude::*;

use crate::engine::core::app_state::AppState;
use crate::engine::core::frame::FrameState;
use crate::engine::render::materials::lighting::update_lighting;
use crate::engine::render::materials::parallax_material::ParallaxMaterial;
use crate::engine::render::materials::scene_material::SceneMaterial;
use crate::engine::render::materials::skybox_material::SkyboxMaterial;
use crate::engine::render::shadow::depth_cubemaps::DepthCubemaps;

const LIGHTING_SHADER_LIBRARY_PATH: &str = "shaders/lighting.wgsl";

/// Holds the shared lighting import alive so the material shaders resolve it.
#[derive(Resource)]
struct LightingShaderLibrary {
    _handle: Handle<Shader>,
}

pub struct LitMaterialsPlugin;

impl Plugin for LitMaterialsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            MaterialPlugin::<SceneMaterial>::default(),
            MaterialPlugin::<ParallaxMaterial>::default(),
            MaterialPlugin::<SkyboxMaterial>::default(),
        ))
        .add_systems(Startup, load_lighting_library)
        .add_systems(
            PostUpdate,
            (
                update_lighting::<SceneMaterial>,
                update_lighting::<ParallaxMaterial>,
                update_parallax_toggle,
                update_skybox_view,
            )
                .run_if(in_state(AppState::Running)),
        );
    }
}

fn load_lighting_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(LightingShaderLibrary {
        _handle: asset_server.load(LIGHTING_SHADER_LIBRARY_PATH),
    });
}

fn update_parallax_toggle(frame: Res<FrameState>, mut materials: ResMut<Assets<ParallaxMaterial>>) {
    let enabled = u32::from(frame.parallax);
    for (_, material) in materials.iter_mut() {
        material.parallax.enabled = enabled;
    }
}

fn update_skybox_view(
    frame: Res<FrameState>,
    cubemaps: Res<DepthCubemaps>,
    mut materials: ResMut<Assets<SkyboxMaterial>>,
) {
    if !frame.is_changed() {
        return;
    }
    let Some(depth_map) = cubemaps.get(frame.selected_light) else {
        return;
    };
    for (_, material) in materials.iter_mut() {
        material.set_view(frame.sky_view, depth_map.clone());
    }
}
