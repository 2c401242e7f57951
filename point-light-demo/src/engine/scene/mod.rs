//! Scene content: procedural meshes, spawned objects and their per-frame animation.

/// Per-frame transforms for animated objects, billboards and light markers.
pub mod animate;

/// Procedural cube, sphere and keyframed meshes.
pub mod meshes;

/// Spawns the shadow casters, sky cube, billboards and camera.
pub mod setup;
