use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};

use crate::engine::core::config::DemoConfig;

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

/// The window opens before the runtime config loads, so its title comes from
/// the config defaults.
pub fn create_window_config(title: &str) -> Window {
    Window {
        title: title.to_string(),
        resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
        present_mode: PresentMode::AutoVsync,
        ..default()
    }
}

/// Retitles the primary window once the runtime config is known.
pub fn apply_window_title(
    config: Res<DemoConfig>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    for mut window in &mut windows {
        if window.title != config.window_title {
            window.title = config.window_title.clone();
        }
    }
}
