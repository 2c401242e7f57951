use bevy::prelude::*;
use constants::simulation::{
    OSCILLATION_BOUND, OSCILLATION_STEP_PER_FRAME, REFERENCE_FPS, ROTATION_DEGREES_PER_FRAME,
};

/// Drives the spinning cube and the oscillating cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneAnimation {
    rotation_degrees: f32,
    offset: f32,
    rising: bool,
}

impl Default for SceneAnimation {
    fn default() -> Self {
        Self {
            rotation_degrees: 0.0,
            offset: 0.0,
            rising: false,
        }
    }
}

impl SceneAnimation {
    pub fn advance(&mut self, dt: f32) {
        let frames = dt * REFERENCE_FPS;
        self.rotation_degrees =
            (self.rotation_degrees + ROTATION_DEGREES_PER_FRAME * frames).rem_euclid(360.0);

        if self.offset >= OSCILLATION_BOUND {
            self.rising = false;
        }
        if self.offset <= -OSCILLATION_BOUND {
            self.rising = true;
        }

        let step = OSCILLATION_STEP_PER_FRAME * frames;
        self.offset += if self.rising { step } else { -step };
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    /// Rotation about the normalised (1, 1, 1) axis.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(Vec3::ONE.normalize(), self.rotation_degrees.to_radians())
    }

    /// Offset along the moving cube's diagonal path.
    pub fn offset(&self) -> f32 {
        self.offset
    }
}

/// Vertex-position keyframes blended linearly between consecutive frames.
#[derive(Debug, Clone, Default)]
pub struct KeyframeAnimation {
    frames: Vec<Vec<Vec3>>,
    current: usize,
    t: f32,
    frames_per_second: f32,
}

impl KeyframeAnimation {
    pub fn new(frames: Vec<Vec<Vec3>>, frames_per_second: f32) -> Self {
        Self {
            frames,
            current: 0,
            t: 0.0,
            frames_per_second,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    pub fn interpolation(&self) -> f32 {
        self.t
    }

    pub fn advance(&mut self, dt: f32) {
        if self.frames.is_empty() {
            return;
        }

        self.t += dt * self.frames_per_second;
        while self.t >= 1.0 {
            self.t -= 1.0;
            self.current = (self.current + 1) % self.frames.len();
        }
    }

    /// Positions blended between the current and the next keyframe.
    pub fn interpolated(&self) -> Vec<Vec3> {
        let Some(current) = self.frames.get(self.current) else {
            return Vec::new();
        };
        let next = &self.frames[(self.current + 1) % self.frames.len()];

        current
            .iter()
            .zip(next)
            .map(|(a, b)| a.lerp(*b, self.t))
            .collect()
    }
}
