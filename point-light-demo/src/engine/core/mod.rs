//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, state transitions,
//! runtime configuration and the per-frame orchestration.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the shadow and material render plugins, asset
/// loading systems and the frame systems.
pub mod app_setup;

/// Application state machine and loading progress transitions.
pub mod app_state;

/// Runtime configuration loaded from JSON.
pub mod config;

pub mod frame;

/// Window size, title and vsync.
pub mod window_config;
