use bevy::prelude::*;
use constants::render_settings::POINT_LIGHT_COUNT;
use constants::simulation::{
    PROJECTILE_SCALE, PROJECTILE_SPAWN_OFFSET, PROJECTILE_STEP_PER_FRAME, REFERENCE_FPS,
};
use thiserror::Error;

use crate::engine::camera::fps_camera::forward_on_ground;

/// One live projectile slot per point light.
pub const MAX_PROJECTILES: usize = POINT_LIGHT_COUNT;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FireError {
    #[error("no more ammo: all {capacity} projectile slots are live")]
    CapacityReached { capacity: usize },
}

/// Index of a projectile slot; slot `i` drives light `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectileHandle(pub usize);

/// A "light bullet". The yaw and pitch captured at fire time are private and
/// only readable, so the trajectory never follows later camera movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    position: Vec3,
    scale: Vec3,
    yaw_degrees: f32,
    pitch: f32,
}

impl Projectile {
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_degrees
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn step(&mut self, distance: f32) {
        let yaw = self.yaw_degrees.to_radians();
        self.position += Vec3::new(
            distance * yaw.sin(),
            -distance * self.pitch.atan().sin(),
            -distance * yaw.cos(),
        );
    }
}

/// Fixed-capacity store of live projectiles.
#[derive(Resource, Debug, Default, Clone)]
pub struct ProjectileMagazine {
    projectiles: Vec<Projectile>,
}

impl ProjectileMagazine {
    pub fn new() -> Self {
        Self {
            projectiles: Vec::with_capacity(MAX_PROJECTILES),
        }
    }

    /// Spawn a projectile slightly in front of `eye` along `yaw_degrees`.
    /// Cooldown gating is the caller's job.
    pub fn fire(
        &mut self,
        eye: Vec3,
        yaw_degrees: f32,
        pitch: f32,
    ) -> Result<ProjectileHandle, FireError> {
        if self.is_full() {
            return Err(FireError::CapacityReached {
                capacity: MAX_PROJECTILES,
            });
        }

        let handle = ProjectileHandle(self.projectiles.len());
        self.projectiles.push(Projectile {
            position: forward_on_ground(eye, yaw_degrees, PROJECTILE_SPAWN_OFFSET),
            scale: Vec3::splat(PROJECTILE_SCALE),
            yaw_degrees,
            pitch,
        });
        Ok(handle)
    }

    /// Move every live projectile along its shot-time heading.
    pub fn advance(&mut self, dt: f32) {
        let distance = PROJECTILE_STEP_PER_FRAME * dt * REFERENCE_FPS;
        for projectile in &mut self.projectiles {
            projectile.step(distance);
        }
    }

    pub fn reset(&mut self) {
        self.projectiles.clear();
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.projectiles.get(handle.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.projectiles.iter().map(Projectile::position).collect()
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.projectiles.len() >= MAX_PROJECTILES
    }

    pub fn capacity(&self) -> usize {
        MAX_PROJECTILES
    }
}

/// Minimum delay between successful shots, counted down by frame time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GunCooldown {
    remaining: f32,
}

impl Default for GunCooldown {
    fn default() -> Self {
        Self {
            remaining: constants::simulation::GUN_COOLDOWN_SECS,
        }
    }
}

impl GunCooldown {
    pub fn tick(&mut self, dt: f32) {
        self.remaining -= dt;
    }

    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn rearm(&mut self, secs: f32) {
        self.remaining = secs;
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
