//! Camera controls driven by input intents
//!
//! The window layer translates key and mouse events into calls on
//! [`CameraController`]; the controller applies speed, sensitivity and clamping rules
//! to a [`Camera`].

use crate::config::CameraConfig;
use crate::foundation::math::utils;
use crate::render::Camera;

/// Pitch limit (degrees) applied when `constrain_pitch` is set
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;
/// Smallest field of view (degrees) reachable by zooming
pub const MIN_FOV_DEGREES: f32 = 1.0;
/// Largest field of view (degrees) reachable by zooming
pub const MAX_FOV_DEGREES: f32 = 90.0;

/// Direction of keyboard movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along the view direction
    Forward,
    /// Against the view direction
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
}

/// Applies movement, look and zoom input to a camera
#[derive(Debug, Clone, PartialEq)]
pub struct CameraController {
    /// World units per second for polled movement
    pub move_speed: f32,
    /// Degrees of rotation per unit of mouse offset
    pub mouse_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl CameraController {
    /// Controller with speed and sensitivity from configuration
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            move_speed: config.move_speed,
            mouse_sensitivity: config.mouse_sensitivity,
        }
    }

    /// Move the camera by `velocity` world units in a direction
    pub fn process_keyboard(&self, camera: &mut Camera, direction: CameraMovement, velocity: f32) {
        let offset = match direction {
            CameraMovement::Forward => camera.front() * velocity,
            CameraMovement::Backward => -camera.front() * velocity,
            CameraMovement::Left => -camera.right() * velocity,
            CameraMovement::Right => camera.right() * velocity,
        };
        camera.set_position(camera.position() + offset);
    }

    /// Apply every held movement key for one frame
    pub fn process_polled_movement(&self, camera: &mut Camera, held: &[CameraMovement], delta_time: f32) {
        let velocity = self.move_speed * delta_time;
        for direction in held {
            self.process_keyboard(camera, *direction, velocity);
        }
    }

    /// Rotate the camera from a mouse offset in pixels
    ///
    /// Screen Y grows downwards, so a positive `y_offset` pitches the camera down.
    pub fn process_mouse(&self, camera: &mut Camera, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        let yaw = camera.yaw() + utils::deg_to_rad(x_offset * self.mouse_sensitivity);
        let mut pitch = camera.pitch() + utils::deg_to_rad(-y_offset * self.mouse_sensitivity);

        if constrain_pitch {
            let limit = utils::deg_to_rad(PITCH_LIMIT_DEGREES);
            pitch = pitch.clamp(-limit, limit);
        }

        camera.set_yaw(yaw);
        camera.set_pitch(pitch);
    }

    /// Zoom by narrowing or widening the field of view
    pub fn process_scroll(&self, camera: &mut Camera, y_offset: f32) {
        let fov = (camera.fov() - utils::deg_to_rad(y_offset)).clamp(
            utils::deg_to_rad(MIN_FOV_DEGREES),
            utils::deg_to_rad(MAX_FOV_DEGREES),
        );
        camera.set_fov(fov);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn test_polled_movement_scales_with_delta_time() {
        let controller = CameraController::default();
        let mut camera = Camera::new(Vec3::zeros());
        controller.process_polled_movement(&mut camera, &[CameraMovement::Forward], 0.5);
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, -2.5), epsilon = EPSILON);

        controller.process_polled_movement(&mut camera, &[CameraMovement::Right], 0.2);
        assert_relative_eq!(camera.position(), Vec3::new(1.0, 0.0, -2.5), epsilon = EPSILON);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let controller = CameraController::default();
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        controller.process_polled_movement(
            &mut camera,
            &[CameraMovement::Left, CameraMovement::Right, CameraMovement::Forward, CameraMovement::Backward],
            0.1,
        );
        assert_relative_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        controller.process_mouse(&mut camera, 0.0, -5000.0, true);
        assert_relative_eq!(camera.pitch(), utils::deg_to_rad(89.0), epsilon = EPSILON);

        controller.process_mouse(&mut camera, 0.0, 5000.0, false);
        assert!(camera.pitch() < utils::deg_to_rad(-89.0));
    }

    #[test]
    fn test_mouse_yaw_uses_sensitivity() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        controller.process_mouse(&mut camera, 100.0, 0.0, true);
        assert_relative_eq!(camera.yaw(), utils::deg_to_rad(-80.0), epsilon = EPSILON);
    }

    #[test]
    fn test_scroll_clamps_fov() {
        let controller = CameraController::default();
        let mut camera = Camera::default();
        controller.process_scroll(&mut camera, 10.0);
        assert_relative_eq!(camera.fov(), utils::deg_to_rad(35.0), epsilon = EPSILON);
        controller.process_scroll(&mut camera, 500.0);
        assert_relative_eq!(camera.fov(), utils::deg_to_rad(1.0), epsilon = EPSILON);
        controller.process_scroll(&mut camera, -500.0);
        assert_relative_eq!(camera.fov(), utils::deg_to_rad(90.0), epsilon = EPSILON);
    }
}
