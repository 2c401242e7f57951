pub mod animation;
pub mod lights;
pub mod particles;
pub mod projectiles;
