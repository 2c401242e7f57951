use bevy::asset::{LoadState, RenderAssetUsages};
use bevy::image::ImageLoaderSettings;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_files::*;

fn load_texture(asset_server: &AssetServer, path: &'static str, kind: TextureKind) -> Handle<Image> {
    match kind {
        // Height and normal maps hold data, not colour.
        TextureKind::Height | TextureKind::Normal => asset_server
            .load_with_settings(path, |settings: &mut ImageLoaderSettings| {
                settings.is_srgb = false;
            }),
        TextureKind::Colour | TextureKind::Sky => asset_server.load(path),
    }
}

pub fn start_texture_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    println!("Loading scene textures");
    let textures = SceneTextures {
        scene: load_texture(&asset_server, SCENE_TEXTURE_PATH, TextureKind::Colour),
        fabric: load_texture(&asset_server, FABRIC_TEXTURE_PATH, TextureKind::Colour),
        creature: load_texture(&asset_server, CREATURE_TEXTURE_PATH, TextureKind::Colour),
        metal: load_texture(&asset_server, METAL_TEXTURE_PATH, TextureKind::Colour),
        parallax_diffuse: load_texture(&asset_server, PARALLAX_DIFFUSE_PATH, TextureKind::Colour),
        parallax_height: load_texture(&asset_server, PARALLAX_HEIGHT_PATH, TextureKind::Height),
        parallax_normal: load_texture(&asset_server, PARALLAX_NORMAL_PATH, TextureKind::Normal),
        particle: load_texture(&asset_server, PARTICLE_TEXTURE_PATH, TextureKind::Colour),
        projectile: load_texture(&asset_server, PROJECTILE_TEXTURE_PATH, TextureKind::Colour),
        skybox_faces: SKYBOX_FACE_PATHS.map(|path| load_texture(&asset_server, path, TextureKind::Sky)),
    };
    commands.insert_resource(textures);
}

/// Waits for every texture to settle. A texture that fails to load is
/// swapped for a generated placeholder so the scene still renders.
pub fn check_texture_loading(
    mut loading_progress: ResMut<LoadingProgress>,
    mut textures: ResMut<SceneTextures>,
    mut images: ResMut<Assets<Image>>,
    asset_server: Res<AssetServer>,
) {
    if loading_progress.textures_loaded {
        return;
    }

    let mut pending = 0;
    for (slot, kind) in textures.slots_mut() {
        if images.contains(&*slot) {
            continue;
        }
        match asset_server.get_load_state(&*slot) {
            Some(LoadState::Failed(err)) => {
                let path = slot.path().map(|p| p.to_string()).unwrap_or_default();
                warn!("Texture {path} failed to load ({err}), using placeholder");
                *slot = images.add(placeholder_image(kind));
            }
            _ => pending += 1,
        }
    }

    if pending == 0 {
        println!("✓ All scene textures resolved");
        loading_progress.textures_loaded = true;
    }
}

/// A 2x2 stand-in whose contents suit the texture's role.
pub fn placeholder_image(kind: TextureKind) -> Image {
    let (pixel, format) = match kind {
        TextureKind::Colour => ([200, 0, 200, 255], TextureFormat::Rgba8UnormSrgb),
        TextureKind::Sky => ([120, 160, 210, 255], TextureFormat::Rgba8UnormSrgb),
        TextureKind::Height => ([0, 0, 0, 255], TextureFormat::Rgba8Unorm),
        // Flat tangent-space normal.
        TextureKind::Normal => ([128, 128, 255, 255], TextureFormat::Rgba8Unorm),
    };
    Image::new_fill(
        Extent3d {
            width: 2,
            height: 2,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &pixel,
        format,
        // Kept CPU-side so sky faces can still be stacked into a cube later.
        RenderAssetUsages::default(),
    )
}
