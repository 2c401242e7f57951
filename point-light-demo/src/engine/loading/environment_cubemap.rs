use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
};
use thiserror::Error;

use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::texture_files::{SceneTextures, TextureKind};
use crate::engine::loading::texture_loader::placeholder_image;

#[derive(Debug, Error, PartialEq)]
pub enum CubemapError {
    #[error("a cubemap needs 6 faces, got {0}")]
    FaceCount(usize),
    #[error("face {face} is {width}x{height}, faces must be square")]
    NotSquare { face: usize, width: u32, height: u32 },
    #[error("face {face} is {found}px, expected {expected}px")]
    SizeMismatch {
        face: usize,
        expected: u32,
        found: u32,
    },
    #[error("face {face} is {found:?}, expected {expected:?}")]
    FormatMismatch {
        face: usize,
        expected: TextureFormat,
        found: TextureFormat,
    },
    #[error("face {0} has no pixel data")]
    MissingData(usize),
}

/// The skybox's environment cube.
#[derive(Resource, Debug, Clone)]
pub struct EnvironmentCubemap(pub Handle<Image>);

/// Stack six square, same-sized, same-format faces into one cube image.
pub fn assemble_cubemap(faces: &[&Image]) -> Result<Image, CubemapError> {
    let [first, ..] = faces else {
        return Err(CubemapError::FaceCount(0));
    };
    if faces.len() != 6 {
        return Err(CubemapError::FaceCount(faces.len()));
    }

    let size = first.width();
    let format = first.texture_descriptor.format;
    let mut data = Vec::new();

    for (face, image) in faces.iter().enumerate() {
        if image.width() != image.height() {
            return Err(CubemapError::NotSquare {
                face,
                width: image.width(),
                height: image.height(),
            });
        }
        if image.width() != size {
            return Err(CubemapError::SizeMismatch {
                face,
                expected: size,
                found: image.width(),
            });
        }
        if image.texture_descriptor.format != format {
            return Err(CubemapError::FormatMismatch {
                face,
                expected: format,
                found: image.texture_descriptor.format,
            });
        }
        let Some(pixels) = image.data.as_ref() else {
            return Err(CubemapError::MissingData(face));
        };
        data.extend_from_slice(pixels);
    }

    let mut cubemap = Image::new(
        Extent3d {
            width: size,
            height: size,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        data,
        format,
        RenderAssetUsages::RENDER_WORLD,
    );
    cubemap.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Ok(cubemap)
}

fn placeholder_cubemap() -> Result<Image, CubemapError> {
    let face = placeholder_image(TextureKind::Sky);
    assemble_cubemap(&[&face; 6])
}

/// Builds the environment cube once every skybox face has resolved.
pub fn build_environment_cubemap(
    mut commands: Commands,
    mut loading_progress: ResMut<LoadingProgress>,
    textures: Res<SceneTextures>,
    mut images: ResMut<Assets<Image>>,
) {
    if !loading_progress.textures_loaded || loading_progress.environment_ready {
        return;
    }

    let faces: Option<Vec<&Image>> = textures
        .skybox_faces
        .iter()
        .map(|handle| images.get(handle))
        .collect();
    let Some(faces) = faces else {
        return;
    };

    let cubemap = match assemble_cubemap(&faces) {
        Ok(cubemap) => cubemap,
        Err(err) => {
            warn!("Skybox faces unusable ({err}), using placeholder sky");
            match placeholder_cubemap() {
                Ok(cubemap) => cubemap,
                Err(err) => {
                    error!("Placeholder sky failed: {err}");
                    return;
                }
            }
        }
    };

    commands.insert_resource(EnvironmentCubemap(images.add(cubemap)));
    loading_progress.environment_ready = true;
    println!("✓ Environment cubemap ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(size: u32, value: u8, format: TextureFormat) -> Image {
        Image::new_fill(
            Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            &[value, value, value, 255],
            format,
            RenderAssetUsages::all(),
        )
    }

    #[test]
    fn six_matching_faces_stack_in_order() {
        let faces: Vec<Image> = (0..6)
            .map(|i| face(4, i as u8 * 10, TextureFormat::Rgba8UnormSrgb))
            .collect();
        let refs: Vec<&Image> = faces.iter().collect();

        let cubemap = assemble_cubemap(&refs).unwrap();

        let size = cubemap.texture_descriptor.size;
        assert_eq!((size.width, size.height, size.depth_or_array_layers), (4, 4, 6));
        let data = cubemap.data.as_ref().unwrap();
        let face_bytes = 4 * 4 * 4;
        assert_eq!(data.len(), 6 * face_bytes);
        assert_eq!(data[2 * face_bytes], 20);
        assert_eq!(
            cubemap.texture_view_descriptor.as_ref().unwrap().dimension,
            Some(TextureViewDimension::Cube)
        );
    }

    #[test]
    fn mismatched_size_is_rejected() {
        let faces: Vec<Image> = (0..6)
            .map(|i| face(if i == 3 { 8 } else { 4 }, 0, TextureFormat::Rgba8UnormSrgb))
            .collect();
        let refs: Vec<&Image> = faces.iter().collect();

        assert_eq!(
            assemble_cubemap(&refs).unwrap_err(),
            CubemapError::SizeMismatch {
                face: 3,
                expected: 4,
                found: 8
            }
        );
    }

    #[test]
    fn mismatched_format_is_rejected() {
        let mut faces: Vec<Image> = (0..6)
            .map(|_| face(4, 0, TextureFormat::Rgba8UnormSrgb))
            .collect();
        faces[5] = face(4, 0, TextureFormat::Rgba8Unorm);
        let refs: Vec<&Image> = faces.iter().collect();

        assert!(matches!(
            assemble_cubemap(&refs),
            Err(CubemapError::FormatMismatch { face: 5, .. })
        ));
    }

    #[test]
    fn wrong_face_count_is_rejected() {
        let only = face(4, 0, TextureFormat::Rgba8UnormSrgb);

        assert_eq!(assemble_cubemap(&[&only; 5]).unwrap_err(), CubemapError::FaceCount(5));
        assert_eq!(assemble_cubemap(&[]).unwrap_err(), CubemapError::FaceCount(0));
    }

    #[test]
    fn placeholder_sky_is_a_valid_cube() {
        let cubemap = placeholder_cubemap().unwrap();

        assert_eq!(cubemap.texture_descriptor.size.depth_or_array_layers, 6);
    }
}
