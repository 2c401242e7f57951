//! Colour-pass materials. All lit materials share `LightingUniform` and bind
//! the four distance cubemaps for shadowing.

pub mod lighting;
pub mod parallax_material;
pub mod scene_material;
pub mod skybox_material;
pub mod material_plugin;
