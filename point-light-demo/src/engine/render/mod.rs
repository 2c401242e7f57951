//! Rendering: the per-light shadow depth pass and the colour-pass materials.

/// Lit, parallax and skybox materials drawn by bevy's main 3D pass.
pub mod materials;

/// Distance cubemaps rendered ahead of every camera.
///
/// One render pass per light and cube face, fed by extracted `ShadowCaster`
/// meshes and the frame's light table.
pub mod shadow;
