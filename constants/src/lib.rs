//! Compile-time settings shared by the point-light demo.
//!
//! Render settings cover the shadow pipeline and light model; simulation
//! settings cover particles, projectiles, camera motion and scene animation.

pub mod render_settings;
pub mod simulation;
