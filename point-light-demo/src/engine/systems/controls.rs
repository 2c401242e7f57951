use bevy::prelude::*;
use constants::simulation::{
    CAMERA_YAW_STEP, LIGHT_NUDGE_STEP, MOUSE_PITCH_PER_PIXEL, MOUSE_YAW_PER_PIXEL, REFERENCE_FPS,
};

use crate::engine::core::config::DemoConfig;
use crate::engine::core::frame::{FrameState, LightMode, SkyView};
use crate::engine::simulation::lights::LightTable;
use crate::engine::simulation::projectiles::{ProjectileHandle, ProjectileMagazine};

/// One frame of user intent, decoupled from the input devices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlSignals {
    /// +1 forward, -1 back.
    pub forward: f32,
    /// +1 right, -1 left.
    pub right: f32,
    pub vertical: f32,
    /// Keyboard yaw direction.
    pub yaw: f32,
    /// Mouse motion in pixels; only used while the gun is active.
    pub look: Vec2,
    pub fire_held: bool,
    pub fire_pressed: bool,
    pub mode: Option<LightMode>,
    pub sky_view: Option<SkyView>,
    pub parallax: Option<bool>,
    pub wireframe: Option<bool>,
    pub cycle_light: bool,
    /// Unit steps per axis for the selected light.
    pub light_nudge: Vec3,
    pub reset_particles: bool,
    pub quit: bool,
}

fn axis(keys: &ButtonInput<KeyCode>, positive: KeyCode, negative: KeyCode) -> f32 {
    if keys.pressed(positive) {
        1.0
    } else if keys.pressed(negative) {
        -1.0
    } else {
        0.0
    }
}

impl ControlSignals {
    pub fn read(
        keys: &ButtonInput<KeyCode>,
        mouse: &ButtonInput<MouseButton>,
        look: Vec2,
    ) -> Self {
        let mode = if keys.just_pressed(KeyCode::KeyZ) {
            Some(LightMode::Gun)
        } else if keys.just_pressed(KeyCode::KeyX) {
            Some(LightMode::Particles)
        } else {
            None
        };
        let sky_view = if keys.just_pressed(KeyCode::Digit3) {
            Some(SkyView::Environment)
        } else if keys.just_pressed(KeyCode::Digit4) {
            Some(SkyView::DepthMap)
        } else {
            None
        };
        let parallax = if keys.just_pressed(KeyCode::KeyN) {
            Some(false)
        } else if keys.just_pressed(KeyCode::KeyM) {
            Some(true)
        } else {
            None
        };
        let wireframe = if keys.just_pressed(KeyCode::Digit1) {
            Some(true)
        } else if keys.just_pressed(KeyCode::Digit2) {
            Some(false)
        } else {
            None
        };

        Self {
            forward: axis(keys, KeyCode::KeyW, KeyCode::KeyS),
            right: axis(keys, KeyCode::KeyD, KeyCode::KeyA),
            vertical: axis(keys, KeyCode::KeyR, KeyCode::KeyF),
            yaw: axis(keys, KeyCode::Period, KeyCode::Comma),
            look,
            fire_held: mouse.pressed(MouseButton::Left),
            fire_pressed: mouse.just_pressed(MouseButton::Left),
            mode,
            sky_view,
            parallax,
            wireframe,
            cycle_light: keys.just_pressed(KeyCode::Numpad0),
            light_nudge: Vec3::new(
                axis(keys, KeyCode::Numpad6, KeyCode::Numpad4),
                axis(keys, KeyCode::Numpad9, KeyCode::Numpad3),
                axis(keys, KeyCode::Numpad5, KeyCode::Numpad8),
            ),
            reset_particles: keys.just_pressed(KeyCode::KeyP),
            quit: keys.just_pressed(KeyCode::Escape),
        }
    }
}

/// Apply one frame of controls. Returns the projectile fired this frame, if any.
pub fn apply_controls(
    signals: &ControlSignals,
    state: &mut FrameState,
    projectiles: &mut ProjectileMagazine,
    lights: &mut LightTable,
    config: &DemoConfig,
    dt: f32,
) -> Option<ProjectileHandle> {
    let frames = dt * REFERENCE_FPS;
    let step = config.move_speed * frames;

    state.camera.move_forward(signals.forward * step);
    state.camera.move_right(signals.right * step);
    state.camera.move_vertical(signals.vertical * step);
    state.camera.add_yaw(signals.yaw * CAMERA_YAW_STEP * frames);

    if let Some(mode) = signals.mode {
        state.set_mode(mode, projectiles);
    }
    if state.mode == LightMode::Gun {
        state.camera.add_look(
            signals.look.x * MOUSE_YAW_PER_PIXEL * config.mouse_sensitivity,
            signals.look.y * MOUSE_PITCH_PER_PIXEL * config.mouse_sensitivity,
        );
    }

    if let Some(view) = signals.sky_view {
        state.sky_view = view;
    }
    if let Some(parallax) = signals.parallax {
        state.parallax = parallax;
    }
    if let Some(wireframe) = signals.wireframe {
        state.wireframe = wireframe;
    }
    if signals.cycle_light {
        state.select_next_light();
        info!("Selected light {}", state.selected_light);
    }
    if signals.light_nudge != Vec3::ZERO {
        lights.nudge(
            state.selected_light,
            signals.light_nudge * LIGHT_NUDGE_STEP * frames,
        );
    }
    if signals.reset_particles {
        state.reset_particles = true;
    }

    if !signals.fire_held {
        return None;
    }
    match state.try_fire(projectiles, config.gun_cooldown_secs) {
        Ok(fired) => fired,
        Err(err) => {
            // Held fire would log every frame otherwise.
            if signals.fire_pressed {
                warn!("{err}");
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constants::render_settings::INITIAL_LIGHT_POSITIONS;

    const FRAME: f32 = 1.0 / REFERENCE_FPS;

    fn keys(pressed: &[KeyCode]) -> ButtonInput<KeyCode> {
        let mut input = ButtonInput::default();
        for key in pressed {
            input.press(*key);
        }
        input
    }

    #[test]
    fn keys_map_to_signals() {
        let signals = ControlSignals::read(
            &keys(&[KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyZ, KeyCode::Numpad8]),
            &ButtonInput::default(),
            Vec2::ZERO,
        );

        assert_eq!(signals.forward, 1.0);
        assert_eq!(signals.right, -1.0);
        assert_eq!(signals.mode, Some(LightMode::Gun));
        assert_eq!(signals.light_nudge, Vec3::new(0.0, 0.0, -1.0));
        assert!(!signals.fire_held);
    }

    #[test]
    fn idle_input_is_the_empty_signal() {
        let signals =
            ControlSignals::read(&ButtonInput::default(), &ButtonInput::default(), Vec2::ZERO);

        assert_eq!(signals, ControlSignals::default());
    }

    #[test]
    fn movement_follows_move_speed() {
        let mut state = FrameState::new();
        let start = state.camera.eye;
        let signals = ControlSignals {
            forward: 1.0,
            vertical: -1.0,
            ..default()
        };

        apply_controls(
            &signals,
            &mut state,
            &mut ProjectileMagazine::new(),
            &mut LightTable::default(),
            &DemoConfig::default(),
            FRAME,
        );

        let moved = state.camera.eye - start;
        assert!((moved - Vec3::new(0.0, -0.1, -0.1)).length() < 1e-5);
    }

    #[test]
    fn mouse_look_only_applies_in_gun_mode() {
        let mut state = FrameState::new();
        let mut projectiles = ProjectileMagazine::new();
        let mut lights = LightTable::default();
        let config = DemoConfig::default();
        let signals = ControlSignals {
            look: Vec2::new(100.0, 50.0),
            ..default()
        };

        apply_controls(&signals, &mut state, &mut projectiles, &mut lights, &config, FRAME);
        assert_eq!(state.camera.yaw, 0.0);

        state.set_mode(LightMode::Gun, &mut projectiles);
        apply_controls(&signals, &mut state, &mut projectiles, &mut lights, &config, FRAME);
        assert!((state.camera.yaw - 10.0).abs() < 1e-4);
        assert!((state.camera.pitch - 0.5).abs() < 1e-5);
    }

    #[test]
    fn nudge_moves_only_the_selected_light() {
        let mut state = FrameState::new();
        state.select_next_light();
        let mut lights = LightTable::default();
        let signals = ControlSignals {
            light_nudge: Vec3::X,
            ..default()
        };

        apply_controls(
            &signals,
            &mut state,
            &mut ProjectileMagazine::new(),
            &mut lights,
            &DemoConfig::default(),
            FRAME,
        );

        let moved = lights.get(1).unwrap() - INITIAL_LIGHT_POSITIONS[1];
        assert!((moved - Vec3::new(LIGHT_NUDGE_STEP, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(lights.get(0), Some(INITIAL_LIGHT_POSITIONS[0]));
    }

    #[test]
    fn held_fire_respects_cooldown_and_capacity() {
        let mut state = FrameState::new();
        let mut projectiles = ProjectileMagazine::new();
        let mut lights = LightTable::default();
        let config = DemoConfig::default();
        state.set_mode(LightMode::Gun, &mut projectiles);
        state.cooldown.rearm(0.0);
        let fire = ControlSignals {
            fire_held: true,
            ..default()
        };

        let first = apply_controls(&fire, &mut state, &mut projectiles, &mut lights, &config, FRAME);
        let second = apply_controls(&fire, &mut state, &mut projectiles, &mut lights, &config, FRAME);

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(projectiles.len(), 1);
    }

    #[test]
    fn switching_to_particles_clears_projectiles() {
        let mut state = FrameState::new();
        let mut projectiles = ProjectileMagazine::new();
        state.set_mode(LightMode::Gun, &mut projectiles);
        projectiles.fire(Vec3::ZERO, 0.0, 0.0).unwrap();
        let signals = ControlSignals {
            mode: Some(LightMode::Particles),
            ..default()
        };

        apply_controls(
            &signals,
            &mut state,
            &mut projectiles,
            &mut LightTable::default(),
            &DemoConfig::default(),
            FRAME,
        );

        assert_eq!(state.mode, LightMode::Particles);
        assert!(projectiles.is_empty());
    }
}
