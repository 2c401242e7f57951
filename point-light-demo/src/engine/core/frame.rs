//! Per-frame orchestration: one simulator step, one light publish, then the
//! depth passes for every light followed by the colour pass.

use bevy::prelude::*;
use constants::render_settings::POINT_LIGHT_COUNT;
use rand::Rng;

use crate::engine::camera::fps_camera::CameraState;
use crate::engine::simulation::animation::SceneAnimation;
use crate::engine::simulation::lights::{LightSource, LightTable};
use crate::engine::simulation::particles::ParticleSystem;
use crate::engine::simulation::projectiles::{
    FireError, GunCooldown, ProjectileHandle, ProjectileMagazine,
};

/// Render phase within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FramePhase {
    DepthPass { light: usize },
    ColorPass,
}

impl FramePhase {
    pub const FIRST: Self = FramePhase::DepthPass { light: 0 };

    /// The phase after `self`. `ColorPass` wraps to the next frame's first
    /// depth pass.
    pub fn next(self, light_count: usize) -> Self {
        match self {
            FramePhase::DepthPass { light } if light + 1 < light_count => {
                FramePhase::DepthPass { light: light + 1 }
            }
            FramePhase::DepthPass { .. } => FramePhase::ColorPass,
            FramePhase::ColorPass => Self::FIRST,
        }
    }

    /// Every phase of one frame, in order.
    pub fn sequence(light_count: usize) -> Vec<FramePhase> {
        (0..light_count)
            .map(|light| FramePhase::DepthPass { light })
            .chain(std::iter::once(FramePhase::ColorPass))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightMode {
    #[default]
    Particles,
    Gun,
}

impl LightMode {
    pub fn source(self) -> LightSource {
        match self {
            LightMode::Particles => LightSource::Particles,
            LightMode::Gun => LightSource::Projectiles,
        }
    }
}

/// What the skybox shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SkyView {
    #[default]
    Environment,
    DepthMap,
}

/// Everything the controls mutate and the renderers read, other than the
/// simulators and the light table which are resources of their own.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameState {
    pub camera: CameraState,
    pub mode: LightMode,
    pub sky_view: SkyView,
    pub selected_light: usize,
    pub parallax: bool,
    pub wireframe: bool,
    pub reset_particles: bool,
    pub cooldown: GunCooldown,
    pub animation: SceneAnimation,
}

impl FrameState {
    pub fn new() -> Self {
        let mut state = Self {
            parallax: true,
            ..default()
        };
        state.camera.refresh_target();
        state
    }

    /// Switch the light source. Leaving gun mode frees every projectile slot.
    pub fn set_mode(&mut self, mode: LightMode, projectiles: &mut ProjectileMagazine) {
        if mode == LightMode::Particles {
            projectiles.reset();
        }
        if self.mode != mode {
            info!("Light mode: {:?}", mode);
            self.mode = mode;
        }
    }

    /// Fire from the camera if the gun is in use and cooled down.
    ///
    /// `Ok(None)` means no shot this frame (wrong mode or cooling down).
    pub fn try_fire(
        &mut self,
        projectiles: &mut ProjectileMagazine,
        cooldown_secs: f32,
    ) -> Result<Option<ProjectileHandle>, FireError> {
        if self.mode != LightMode::Gun {
            return Ok(None);
        }
        if projectiles.is_full() {
            return Err(FireError::CapacityReached {
                capacity: projectiles.capacity(),
            });
        }
        if !self.cooldown.is_ready() {
            return Ok(None);
        }

        let handle = projectiles.fire(self.camera.eye, self.camera.yaw, self.camera.pitch)?;
        self.cooldown.rearm(cooldown_secs);
        Ok(Some(handle))
    }

    pub fn select_next_light(&mut self) {
        self.selected_light = (self.selected_light + 1) % POINT_LIGHT_COUNT;
    }
}

/// Advance the scene and the active simulator by `dt`, then publish that
/// simulator's positions as the light table. Only one simulator writes the
/// table per frame.
pub fn advance_frame(
    state: &mut FrameState,
    particles: &mut ParticleSystem,
    projectiles: &mut ProjectileMagazine,
    lights: &mut LightTable,
    dt: f32,
    rng: &mut impl Rng,
) {
    state.animation.advance(dt);

    match state.mode.source() {
        LightSource::Particles => {
            let reset = std::mem::take(&mut state.reset_particles);
            particles.advance(dt, reset, rng);
            lights.publish(particles.positions());
        }
        LightSource::Projectiles => {
            // The gun only cools down while it is in use.
            state.cooldown.tick(dt);
            projectiles.advance(dt);
            lights.publish(&projectiles.positions());
        }
    }

    state.camera.refresh_target();
}
