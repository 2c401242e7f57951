use bevy::math::Vec3;

/// Number of shadow-casting point lights. Also the particle count and the
/// projectile capacity, since both simulators feed the same light slots.
pub const POINT_LIGHT_COUNT: usize = 4;

/// Edge length in texels of every depth cubemap face.
pub const SHADOW_MAP_SIZE: u32 = 1024;

pub const SHADOW_NEAR: f32 = 0.01;

/// Far plane of the cube shadow projection. The colour pass rescales sampled
/// distances by the same value, so both passes must read this constant.
pub const SHADOW_FAR: f32 = 25.0;

pub const SHADOW_FOV_DEGREES: f32 = 90.0;

/// Bias subtracted from the fragment distance before the shadow comparison.
pub const SHADOW_BIAS: f32 = 0.05;

/// Light positions before any simulator has published.
pub const INITIAL_LIGHT_POSITIONS: [Vec3; POINT_LIGHT_COUNT] = [
    Vec3::new(0.7, 2.2, 2.0),
    Vec3::new(2.3, 5.3, -4.0),
    Vec3::new(-4.0, 2.0, -12.0),
    Vec3::new(-9.0, 6.0, -6.0),
];

pub const LIGHT_AMBIENT: f32 = 0.05;
pub const LIGHT_DIFFUSE: f32 = 0.8;
pub const LIGHT_SPECULAR: f32 = 1.0;

// Attenuation = 1 / (constant + linear * d + quadratic * d^2)
pub const LIGHT_CONSTANT: f32 = 1.0;
pub const LIGHT_LINEAR: f32 = 0.09;
pub const LIGHT_QUADRATIC: f32 = 0.032;

pub const MATERIAL_SHININESS: f32 = 32.0;

/// Main camera projection.
pub const CAMERA_FOV_DEGREES: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 150.0;

/// Half-extent of the camera-centred skybox cube. Must stay inside `CAMERA_FAR`.
pub const SKYBOX_HALF_EXTENT: f32 = 60.0;

/// Height-map displacement applied by the parallax-mapped cube.
pub const PARALLAX_HEIGHT_SCALE: f32 = 0.1;

pub const CLEAR_COLOUR: [f32; 3] = [0.5, 0.5, 0.5];
