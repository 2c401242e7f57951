//! Point-light shadows: cube face matrices, the per-light distance cubemaps
//! and the render-graph node that fills them.

pub mod cube_faces;
pub mod depth_cubemaps;
pub mod depth_pass;
