use bevy::prelude::*;
use constants::simulation::{
    PARTICLE_FADE, PARTICLE_RESET_LIFE, PARTICLE_UPWARD_VELOCITY, PARTICLE_VELOCITY_HALF_RANGE,
    PARTICLE_VELOCITY_SCALE,
};
use rand::Rng;

/// Particle emitter whose positions drive the point lights in particle mode.
///
/// Each attribute lives in its own contiguous buffer; index `i` across all
/// buffers is one particle, and particle `i` feeds light slot `i`.
#[derive(Resource, Debug, Default, Clone)]
pub struct ParticleSystem {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    life: Vec<f32>,
    fade: Vec<f32>,
    colours: Vec<f32>,
}

impl ParticleSystem {
    /// Spawn `count` particles at the origin. A zero count gives an empty
    /// emitter: every accessor returns an empty slice and `advance` does nothing.
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let mut system = Self {
            positions: vec![Vec3::ZERO; count],
            velocities: Vec::with_capacity(count),
            life: vec![PARTICLE_RESET_LIFE; count],
            fade: vec![PARTICLE_FADE; count],
            colours: Vec::with_capacity(count),
        };

        for _ in 0..count {
            system.velocities.push(random_velocity(rng));
            system.colours.push(random_colour(rng));
        }

        system
    }

    /// Integrate every particle forward by `dt`. With `reset` set, every
    /// particle is re-spawned at the origin after integration.
    ///
    /// Life is decremented but never despawns a particle on its own.
    pub fn advance(&mut self, dt: f32, reset: bool, rng: &mut impl Rng) {
        for i in 0..self.positions.len() {
            self.positions[i] += self.velocities[i] * dt;
            self.life[i] -= dt;

            if reset {
                self.velocities[i] = random_velocity(rng);
                self.life[i] = PARTICLE_RESET_LIFE;
                self.positions[i] = Vec3::ZERO;
                self.colours[i] = random_colour(rng);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn life(&self) -> &[f32] {
        &self.life
    }

    pub fn fade(&self) -> &[f32] {
        &self.fade
    }

    /// Scalar colour intensity per particle in `[0, 1)`.
    pub fn colours(&self) -> &[f32] {
        &self.colours
    }
}

/// Horizontal components in tenths over a symmetric range, vertical fixed upward.
fn random_velocity(rng: &mut impl Rng) -> Vec3 {
    let half = PARTICLE_VELOCITY_HALF_RANGE;
    Vec3::new(
        rng.random_range(-half..half) as f32 / PARTICLE_VELOCITY_SCALE,
        PARTICLE_UPWARD_VELOCITY,
        rng.random_range(-half..half) as f32 / PARTICLE_VELOCITY_SCALE,
    )
}

fn random_colour(rng: &mut impl Rng) -> f32 {
    rng.random_range(0..100) as f32 / 100.0
}
