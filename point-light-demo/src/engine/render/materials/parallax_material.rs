use bevy::{
    prelude::*,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderRef, ShaderType},
};
use constants::render_settings::PARALLAX_HEIGHT_SCALE;

use crate::engine::render::materials::lighting::{LightingUniform, LitMaterial};
use crate::engine::render::shadow::depth_cubemaps::DepthCubemaps;

const PARALLAX_SHADER_PATH: &str = "shaders/parallax.wgsl";

#[derive(Debug, Clone, Copy, ShaderType)]
pub struct ParallaxSettings {
    pub height_scale: f32,
    /// Non-zero to offset texture coordinates by the height map.
    pub enabled: u32,
}

impl Default for ParallaxSettings {
    fn default() -> Self {
        Self {
            height_scale: PARALLAX_HEIGHT_SCALE,
            enabled: 1,
        }
    }
}

/// Normal-mapped surface whose texture lookups are shifted along the
/// tangent-space view direction by a height map. Meshes need tangents.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct ParallaxMaterial {
    #[uniform(0)]
    pub lighting: LightingUniform,

    #[uniform(1)]
    pub parallax: ParallaxSettings,

    #[texture(2)]
    #[sampler(3)]
    pub diffuse: Handle<Image>,

    #[texture(4)]
    pub height_map: Handle<Image>,

    #[texture(5)]
    pub normal_map: Handle<Image>,

    #[texture(6, dimension = "cube", filterable = false)]
    #[sampler(7, sampler_type = "non_filtering")]
    pub shadow_map_0: Handle<Image>,

    #[texture(8, dimension = "cube", filterable = false)]
    pub shadow_map_1: Handle<Image>,

    #[texture(9, dimension = "cube", filterable = false)]
    pub shadow_map_2: Handle<Image>,

    #[texture(10, dimension = "cube", filterable = false)]
    pub shadow_map_3: Handle<Image>,
}

impl ParallaxMaterial {
    pub fn new(
        diffuse: Handle<Image>,
        height_map: Handle<Image>,
        normal_map: Handle<Image>,
        cubemaps: &DepthCubemaps,
    ) -> Self {
        let [shadow_map_0, shadow_map_1, shadow_map_2, shadow_map_3] = cubemaps.handles.clone();
        Self {
            lighting: LightingUniform::default(),
            parallax: ParallaxSettings::default(),
            diffuse,
            height_map,
            normal_map,
            shadow_map_0,
            shadow_map_1,
            shadow_map_2,
            shadow_map_3,
        }
    }
}

impl LitMaterial for ParallaxMaterial {
    fn lighting_mut(&mut self) -> &mut LightingUniform {
        &mut self.lighting
    }
}

impl Material for ParallaxMaterial {
    fn fragment_shader() -> ShaderRef {
        PARALLAX_SHADER_PATH.into()
    }
}
