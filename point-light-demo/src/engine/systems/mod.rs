//! Per-frame runtime systems.

/// Keyboard and mouse mapping onto frame state.
pub mod controls;

/// FPS and mode overlays.
pub mod fps_tracking;

/// Input handling and the simulation step, scheduled as `FrameUpdateSet`.
pub mod frame_update;
