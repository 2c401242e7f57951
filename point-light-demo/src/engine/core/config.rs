use bevy::prelude::*;
use constants::simulation::{CAMERA_MOVE_STEP, GUN_COOLDOWN_SECS};
use serde::Deserialize;

/// Runtime tunables read from `assets/config/demo.json`.
///
/// Every field has a default, so a partial file is valid and a missing or
/// malformed one leaves the demo on `DemoConfig::default()`.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Update the keyframe-animated mesh every frame. Off by default since it
    /// re-uploads the mesh for every frame of animation.
    pub animate_keyframe_mesh: bool,
    pub keyframe_fps: f32,
    pub gun_cooldown_secs: f32,
    /// Multiplier on the per-pixel mouse look rates.
    pub mouse_sensitivity: f32,
    /// Camera movement per reference frame.
    pub move_speed: f32,
    pub particle_billboard_size: f32,
    pub window_title: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            animate_keyframe_mesh: false,
            keyframe_fps: 8.0,
            gun_cooldown_secs: GUN_COOLDOWN_SECS,
            mouse_sensitivity: 1.0,
            move_speed: CAMERA_MOVE_STEP,
            particle_billboard_size: 0.5,
            window_title: "Point Light Shadows".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: DemoConfig =
            serde_json::from_str(r#"{ "animate_keyframe_mesh": true }"#).unwrap();

        assert!(config.animate_keyframe_mesh);
        assert_eq!(config.gun_cooldown_secs, GUN_COOLDOWN_SECS);
        assert_eq!(config.move_speed, CAMERA_MOVE_STEP);
    }

    #[test]
    fn empty_object_is_the_default_config() {
        let config: DemoConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(serde_json::from_str::<DemoConfig>(r#"{ "keyframe_fps": "fast" }"#).is_err());
    }

    #[test]
    fn keyframe_animation_is_off_unless_enabled() {
        assert!(!DemoConfig::default().animate_keyframe_mesh);
    }
}
