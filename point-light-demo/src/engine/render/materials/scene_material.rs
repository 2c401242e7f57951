use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef},
};

use crate::engine::render::materials::lighting::{LightingUniform, LitMaterial};
use crate::engine::render::shadow::depth_cubemaps::DepthCubemaps;

const SCENE_SHADER_PATH: &str = "shaders/scene.wgsl";

/// Textured Blinn-Phong surface lit by the point lights, with a cube shadow
/// lookup per light.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SceneMaterial {
    #[uniform(0)]
    pub lighting: LightingUniform,

    #[texture(1)]
    #[sampler(2)]
    pub diffuse: Handle<Image>,

    #[texture(3, dimension = "cube", filterable = false)]
    #[sampler(4, sampler_type = "non_filtering")]
    pub shadow_map_0: Handle<Image>,

    #[texture(5, dimension = "cube", filterable = false)]
    pub shadow_map_1: Handle<Image>,

    #[texture(6, dimension = "cube", filterable = false)]
    pub shadow_map_2: Handle<Image>,

    #[texture(7, dimension = "cube", filterable = false)]
    pub shadow_map_3: Handle<Image>,
}

impl SceneMaterial {
    pub fn new(diffuse: Handle<Image>, cubemaps: &DepthCubemaps) -> Self {
        let [shadow_map_0, shadow_map_1, shadow_map_2, shadow_map_3] = cubemaps.handles.clone();
        Self {
            lighting: LightingUniform::default(),
            diffuse,
            shadow_map_0,
            shadow_map_1,
            shadow_map_2,
            shadow_map_3,
        }
    }
}

impl LitMaterial for SceneMaterial {
    fn lighting_mut(&mut self) -> &mut LightingUniform {
        &mut self.lighting
    }
}

impl Material for SceneMaterial {
    fn fragment_shader() -> ShaderRef {
        SCENE_SHADER_PATH.into()
    }
}
