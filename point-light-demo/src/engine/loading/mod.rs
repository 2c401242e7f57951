//! Asset loading ahead of the first simulated frame.
//!
//! Loads the runtime config and every texture, substitutes placeholders for
//! anything that fails, then assembles the skybox cube.

/// `DemoConfig` JSON loading with fallback to defaults.
pub mod config_loader;

/// Skybox face stacking into a cube image.
pub mod environment_cubemap;

/// Loading progress tracking resource for state transitions.
pub mod progress;

/// Texture paths and the resource holding their handles.
pub mod texture_files;

/// Texture load monitoring and placeholder substitution.
pub mod texture_loader;
