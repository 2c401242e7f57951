use bevy::input::mouse::MouseMotion;
use bevy::pbr::wireframe::WireframeConfig;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::engine::core::config::DemoConfig;
use crate::engine::core::frame::{FrameState, LightMode, advance_frame};
use crate::engine::simulation::lights::LightTable;
use crate::engine::simulation::particles::ParticleSystem;
use crate::engine::simulation::projectiles::ProjectileMagazine;
use crate::engine::systems::controls::{ControlSignals, apply_controls};

/// Input, simulation and camera sync, in that order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameUpdateSet;

#[allow(clippy::too_many_arguments)]
pub fn handle_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    time: Res<Time>,
    config: Res<DemoConfig>,
    mut frame: ResMut<FrameState>,
    mut projectiles: ResMut<ProjectileMagazine>,
    mut lights: ResMut<LightTable>,
    mut wireframe: ResMut<WireframeConfig>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut exit: EventWriter<AppExit>,
) {
    let look: Vec2 = mouse_motion.read().map(|motion| motion.delta).sum();
    let signals = ControlSignals::read(&keyboard, &mouse_buttons, look);

    if signals.quit {
        println!("Escape pressed, exiting");
        exit.write(AppExit::Success);
        return;
    }

    let previous_mode = frame.mode;
    if let Some(handle) = apply_controls(
        &signals,
        &mut frame,
        &mut projectiles,
        &mut lights,
        &config,
        time.delta_secs(),
    ) {
        info!("Fired projectile {}", handle.0);
    }

    wireframe.global = frame.wireframe;

    if frame.mode != previous_mode {
        let Ok(mut window) = windows.single_mut() else {
            return;
        };
        let gun = frame.mode == LightMode::Gun;
        window.cursor_options.grab_mode = if gun {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        window.cursor_options.visible = !gun;
    }
}

pub fn run_frame(
    time: Res<Time>,
    mut frame: ResMut<FrameState>,
    mut particles: ResMut<ParticleSystem>,
    mut projectiles: ResMut<ProjectileMagazine>,
    mut lights: ResMut<LightTable>,
) {
    advance_frame(
        &mut frame,
        &mut particles,
        &mut projectiles,
        &mut lights,
        time.delta_secs(),
        &mut rand::rng(),
    );
}
