use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    reflect::TypePath,
    render::{
        mesh::MeshVertexBufferLayoutRef,
        render_resource::{
            AsBindGroup, Face, RenderPipelineDescriptor, ShaderRef, ShaderType,
            SpecializedMeshPipelineError,
        },
    },
};

use crate::engine::core::frame::SkyView;

const SKYBOX_SHADER_PATH: &str = "shaders/skybox.wgsl";

#[derive(Debug, Clone, Copy, Default, ShaderType)]
pub struct SkyboxSettings {
    /// Non-zero to show the selected light's distance cubemap.
    pub show_depth_map: u32,
}

/// Inside-out cube around the camera. Samples either the environment or a
/// light's distance cubemap.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct SkyboxMaterial {
    #[uniform(0)]
    pub settings: SkyboxSettings,

    #[texture(1, dimension = "cube")]
    #[sampler(2)]
    pub environment: Handle<Image>,

    #[texture(3, dimension = "cube", filterable = false)]
    #[sampler(4, sampler_type = "non_filtering")]
    pub depth_map: Handle<Image>,
}

impl SkyboxMaterial {
    pub fn set_view(&mut self, view: SkyView, depth_map: Handle<Image>) {
        self.settings.show_depth_map = u32::from(view == SkyView::DepthMap);
        self.depth_map = depth_map;
    }
}

impl Material for SkyboxMaterial {
    fn fragment_shader() -> ShaderRef {
        SKYBOX_SHADER_PATH.into()
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Seen from inside, so keep the back faces.
        descriptor.primitive.cull_mode = Some(Face::Front);
        if let Some(depth_stencil) = descriptor.depth_stencil.as_mut() {
            depth_stencil.depth_write_enabled = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_view_swaps_in_the_selected_cubemap() {
        let mut material = SkyboxMaterial {
            settings: SkyboxSettings::default(),
            environment: Handle::default(),
            depth_map: Handle::default(),
        };
        let selected = Handle::<Image>::weak_from_u128(42);

        material.set_view(SkyView::DepthMap, selected.clone());
        assert_eq!(material.settings.show_depth_map, 1);
        assert_eq!(material.depth_map, selected);

        material.set_view(SkyView::Environment, selected);
        assert_eq!(material.settings.show_depth_map, 0);
    }
}
