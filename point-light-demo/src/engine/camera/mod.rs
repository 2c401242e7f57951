//! First-person camera state and its sync onto the bevy camera.

pub mod fps_camera;
