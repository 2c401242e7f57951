use bevy::{
    asset::RenderAssetUsages,
    image::ImageSampler,
    prelude::*,
    render::{
        extract_resource::ExtractResource,
        render_resource::{
            Extent3d, TextureDimension, TextureFormat, TextureUsages, TextureViewDescriptor,
            TextureViewDimension,
        },
    },
};
use constants::render_settings::{POINT_LIGHT_COUNT, SHADOW_MAP_SIZE};

/// Distance-from-light is stored as a single float per texel.
pub const DEPTH_CUBEMAP_FORMAT: TextureFormat = TextureFormat::R32Float;

/// One distance cubemap per point light, rewritten every frame by the depth
/// pass and sampled by the scene materials.
#[derive(Resource, ExtractResource, Clone, Debug)]
pub struct DepthCubemaps {
    pub handles: [Handle<Image>; POINT_LIGHT_COUNT],
}

impl DepthCubemaps {
    pub fn get(&self, light: usize) -> Option<&Handle<Image>> {
        self.handles.get(light)
    }
}

impl FromWorld for DepthCubemaps {
    fn from_world(world: &mut World) -> Self {
        let mut images = world.resource_mut::<Assets<Image>>();
        let handles = std::array::from_fn(|_| images.add(create_depth_cubemap(SHADOW_MAP_SIZE)));
        info!("Created {} depth cubemaps at {}px", POINT_LIGHT_COUNT, SHADOW_MAP_SIZE);
        Self { handles }
    }
}

/// Six-layer render target viewed as a cube. Contents are left uninitialised;
/// the depth pass clears every face before drawing.
pub fn create_depth_cubemap(size: u32) -> Image {
    let mut image = Image::new_uninit(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        DEPTH_CUBEMAP_FORMAT,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.texture_descriptor.usage = TextureUsages::RENDER_ATTACHMENT
        | TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST;
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    // R32Float is not filterable on every backend.
    image.sampler = ImageSampler::nearest();
    image
}
