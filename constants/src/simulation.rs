use bevy::math::Vec3;

/// Per-frame simulation steps are expressed against this rate.
/// Everything below that says "per frame" is scaled by `dt * REFERENCE_FPS`.
pub const REFERENCE_FPS: f32 = 60.0;

// Particles
pub const PARTICLE_RESET_LIFE: f32 = 3.0;
pub const PARTICLE_FADE: f32 = 0.01;
/// Horizontal velocity is drawn from `[-HALF_RANGE, HALF_RANGE)` tenths.
pub const PARTICLE_VELOCITY_HALF_RANGE: i32 = 50;
pub const PARTICLE_VELOCITY_SCALE: f32 = 10.0;
pub const PARTICLE_UPWARD_VELOCITY: f32 = 1.0;
/// Billboard alpha; above 1 saturates under additive blending.
pub const PARTICLE_ALPHA: f32 = 3.0;

// Projectiles
pub const PROJECTILE_SPAWN_OFFSET: f32 = 0.5;
pub const PROJECTILE_SCALE: f32 = 0.5;
pub const PROJECTILE_STEP_PER_FRAME: f32 = 0.05;
pub const GUN_COOLDOWN_SECS: f32 = 1.0;

// Camera
pub const CAMERA_START_EYE: Vec3 = Vec3::new(-2.0, 1.0, 8.0);
pub const CAMERA_START_TARGET: Vec3 = Vec3::new(0.0, 1.0, -1.0);
pub const CAMERA_PITCH_LIMIT: f32 = 70.0;
pub const CAMERA_MOVE_STEP: f32 = 0.1;
pub const CAMERA_YAW_STEP: f32 = 1.0;
pub const LIGHT_NUDGE_STEP: f32 = 0.1;

// Scene animation
pub const ROTATION_DEGREES_PER_FRAME: f32 = 2.0;
pub const OSCILLATION_BOUND: f32 = 3.0;
pub const OSCILLATION_STEP_PER_FRAME: f32 = 0.02;

/// Degrees of yaw per pixel of horizontal mouse motion.
pub const MOUSE_YAW_PER_PIXEL: f32 = 0.1;
/// Pitch units per pixel of vertical mouse motion.
pub const MOUSE_PITCH_PER_PIXEL: f32 = 0.01;
