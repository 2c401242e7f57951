use bevy::prelude::*;
use constants::simulation::{CAMERA_PITCH_LIMIT, CAMERA_START_EYE, CAMERA_START_TARGET};

use crate::engine::core::frame::FrameState;

/// Marks the camera whose transform follows `CameraState`.
#[derive(Component)]
pub struct MainCamera;

/// Position `distance` units ahead of `position` along `yaw_degrees`,
/// staying at the same height. Yaw 0 faces -Z.
pub fn forward_on_ground(position: Vec3, yaw_degrees: f32, distance: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(
        position.x + distance * yaw.sin(),
        position.y,
        position.z - distance * yaw.cos(),
    )
}

/// Position `distance` units to the right of `position` for `yaw_degrees`.
pub fn right_on_ground(position: Vec3, yaw_degrees: f32, distance: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(
        position.x + distance * yaw.cos(),
        position.y,
        position.z + distance * yaw.sin(),
    )
}

/// First-person camera driven by yaw (degrees) and a pitch offset applied to
/// the look-at height.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            eye: CAMERA_START_EYE,
            target: CAMERA_START_TARGET,
            up: Vec3::Y,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
        }
    }
}

impl CameraState {
    pub fn move_forward(&mut self, distance: f32) {
        self.eye = forward_on_ground(self.eye, self.yaw, distance);
    }

    pub fn move_right(&mut self, distance: f32) {
        self.eye = right_on_ground(self.eye, self.yaw, distance);
    }

    pub fn move_vertical(&mut self, distance: f32) {
        self.eye.y += distance;
    }

    pub fn add_yaw(&mut self, degrees: f32) {
        self.yaw += degrees;
        self.lock();
    }

    pub fn add_look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch += pitch_delta;
        self.lock();
    }

    /// Clamp pitch and wrap yaw into `[0, 360)`.
    pub fn lock(&mut self) {
        self.pitch = self.pitch.clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);
        self.yaw = self.yaw.rem_euclid(360.0);
        // rem_euclid can round up to the modulus for tiny negative inputs
        if self.yaw >= 360.0 {
            self.yaw = 0.0;
        }
    }

    pub fn refresh_target(&mut self) {
        self.target = forward_on_ground(self.eye, self.yaw, 1.0);
        self.target.y -= self.pitch;
    }

    /// `up` turned by `roll` degrees about the view direction.
    fn rolled_up(&self) -> Vec3 {
        let forward = (self.target - self.eye).normalize_or_zero();
        if forward == Vec3::ZERO {
            return self.up;
        }
        Quat::from_axis_angle(forward, -self.roll.to_radians()) * self.up
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.rolled_up())
    }

    /// World transform of the camera; the inverse of `view_matrix`.
    pub fn transform(&self) -> Transform {
        Transform::from_matrix(self.view_matrix().inverse())
    }
}

/// Copies the frame's camera state onto the rendering camera.
pub fn sync_camera_transform(
    frame: Res<FrameState>,
    mut cameras: Query<&mut Transform, With<MainCamera>>,
) {
    for mut transform in &mut cameras {
        *transform = frame.camera.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_at_zero_yaw_faces_negative_z() {
        let moved = forward_on_ground(Vec3::ZERO, 0.0, 2.0);

        assert!((moved - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-6);
    }

    #[test]
    fn right_at_zero_yaw_is_positive_x() {
        let moved = right_on_ground(Vec3::new(0.0, 3.0, 0.0), 0.0, 1.5);

        assert!((moved - Vec3::new(1.5, 3.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn lock_clamps_pitch_and_wraps_yaw() {
        let mut camera = CameraState::default();

        camera.add_look(-30.0, 500.0);
        assert_eq!(camera.pitch, CAMERA_PITCH_LIMIT);
        assert!((camera.yaw - 330.0).abs() < 1e-4);

        camera.add_look(45.0, -1000.0);
        assert_eq!(camera.pitch, -CAMERA_PITCH_LIMIT);
        assert!((camera.yaw - 15.0).abs() < 1e-4);
    }

    #[test]
    fn yaw_never_reaches_full_turn() {
        let mut camera = CameraState::default();

        for _ in 0..1000 {
            camera.add_yaw(-0.37);
            assert!((0.0..360.0).contains(&camera.yaw));
        }
    }

    #[test]
    fn target_sits_one_unit_ahead_and_drops_with_pitch() {
        let mut camera = CameraState::default();
        camera.pitch = 0.25;

        camera.refresh_target();

        assert!((camera.target - Vec3::new(-2.0, 0.75, 7.0)).length() < 1e-6);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let mut camera = CameraState::default();
        camera.refresh_target();

        let eye_in_view = camera.view_matrix().transform_point3(camera.eye);

        assert!(eye_in_view.length() < 1e-5);
    }

    #[test]
    fn transform_is_the_inverse_view() {
        let mut camera = CameraState::default();
        camera.add_look(37.0, 0.4);
        camera.refresh_target();

        let world = camera.transform().compute_matrix();

        assert!(world.abs_diff_eq(camera.view_matrix().inverse(), 1e-4));
        assert!((camera.transform().translation - camera.eye).length() < 1e-4);
    }

    #[test]
    fn roll_tilts_the_camera_up_vector() {
        let mut camera = CameraState::default();
        camera.refresh_target();
        camera.roll = 90.0;

        let up = camera.transform().up();

        assert!(up.y.abs() < 1e-4);
        assert!((up.length() - 1.0).abs() < 1e-4);
    }
}
