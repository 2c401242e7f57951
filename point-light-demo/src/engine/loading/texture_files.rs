use bevy::prelude::*;

/// How a texture is sampled, which decides its colour space and its
/// placeholder if the file is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    Colour,
    Height,
    Normal,
    Sky,
}

pub const SCENE_TEXTURE_PATH: &str = "textures/tex3.bmp";
pub const FABRIC_TEXTURE_PATH: &str = "textures/fabric.bmp";
pub const CREATURE_TEXTURE_PATH: &str = "textures/hobgoblin2.bmp";
pub const METAL_TEXTURE_PATH: &str = "textures/studdedmetal.bmp";
pub const PARALLAX_DIFFUSE_PATH: &str = "textures/diffuseMap.bmp";
pub const PARALLAX_HEIGHT_PATH: &str = "textures/heightMap.bmp";
pub const PARALLAX_NORMAL_PATH: &str = "textures/normalMap.bmp";
pub const PARTICLE_TEXTURE_PATH: &str = "textures/particle08.bmp";
pub const PROJECTILE_TEXTURE_PATH: &str = "textures/spotLight.bmp";

/// Skybox faces in cube layer order +X, -X, +Y, -Y, +Z, -Z.
pub const SKYBOX_FACE_PATHS: [&str; 6] = [
    "textures/skybox/rt.bmp",
    "textures/skybox/lf.bmp",
    "textures/skybox/up.bmp",
    "textures/skybox/dn.bmp",
    "textures/skybox/bk.bmp",
    "textures/skybox/ft.bmp",
];

/// Every image the scene samples.
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneTextures {
    pub scene: Handle<Image>,
    pub fabric: Handle<Image>,
    pub creature: Handle<Image>,
    pub metal: Handle<Image>,
    pub parallax_diffuse: Handle<Image>,
    pub parallax_height: Handle<Image>,
    pub parallax_normal: Handle<Image>,
    pub particle: Handle<Image>,
    pub projectile: Handle<Image>,
    pub skybox_faces: [Handle<Image>; 6],
}

impl SceneTextures {
    pub fn slots_mut(&mut self) -> Vec<(&mut Handle<Image>, TextureKind)> {
        let mut slots = vec![
            (&mut self.scene, TextureKind::Colour),
            (&mut self.fabric, TextureKind::Colour),
            (&mut self.creature, TextureKind::Colour),
            (&mut self.metal, TextureKind::Colour),
            (&mut self.parallax_diffuse, TextureKind::Colour),
            (&mut self.parallax_height, TextureKind::Height),
            (&mut self.parallax_normal, TextureKind::Normal),
            (&mut self.particle, TextureKind::Colour),
            (&mut self.projectile, TextureKind::Colour),
        ];
        slots.extend(
            self.skybox_faces
                .iter_mut()
                .map(|face| (face, TextureKind::Sky)),
        );
        slots
    }
}
