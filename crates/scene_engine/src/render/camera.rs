//! # Fly Camera
//!
//! Yaw/pitch perspective camera producing OpenGL-convention view and projection
//! matrices.
//!
//! ## Orientation
//! The viewing direction is derived from two angles:
//! - `yaw` (fi) rotates around world Y, measured from +X towards +Z. The default of
//!   -90 degrees looks down -Z.
//! - `pitch` (alpha) tilts towards world Y.
//!
//! `front = normalize(cos(yaw)·cos(pitch), sin(pitch), sin(yaw)·cos(pitch))`
//!
//! ## Change tracking
//! Every mutation recomputes the derived vectors and matrices and bumps
//! [`Camera::revision`]. Consumers compare revisions (or rely on the scene's dirty
//! flags) to decide whether camera uniforms must be re-sent.

use crate::config::CameraConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Aspect-ratio updates with a height at or below this are ignored (minimized window)
pub const MIN_VIEWPORT_HEIGHT: f32 = 0.001;

/// Perspective camera driven by yaw and pitch angles
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
    world_up: Vec3,

    front: Vec3,
    view: Mat4,
    projection: Mat4,
    revision: u64,
}

impl Camera {
    /// Create a camera at `position` looking down -Z with a 45 degree field of view
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            yaw: utils::deg_to_rad(-90.0),
            pitch: 0.0,
            fov: utils::deg_to_rad(45.0),
            near: 0.1,
            far: 100.0,
            aspect: 4.0 / 3.0,
            world_up: Vec3::y(),
            front: -Vec3::z(),
            view: Mat4::identity(),
            projection: Mat4::identity(),
            revision: 0,
        };
        camera.update_matrices();
        camera
    }

    /// Create a camera using field of view and clip planes from configuration
    pub fn from_config(position: Vec3, config: &CameraConfig) -> Self {
        let mut camera = Self::new(position);
        camera.fov = utils::deg_to_rad(config.fov_degrees);
        camera.near = config.near;
        camera.far = config.far;
        camera.update_matrices();
        camera
    }

    /// Recompute front vector, view and projection, and bump the revision
    pub fn update_matrices(&mut self) {
        let front = Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        );
        self.front = front.normalize();
        self.view = Mat4::look_at(&self.position, &(self.position + self.front), &self.world_up);
        self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Move the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
        self.update_matrices();
    }

    /// Set yaw in radians
    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update_matrices();
    }

    /// Set pitch in radians (unclamped; see the controller for clamped input)
    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        self.update_matrices();
    }

    /// Set vertical field of view in radians
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
        log::trace!("Camera fov updated to: {:.1} degrees", utils::rad_to_deg(fov));
        self.update_matrices();
    }

    /// Set near and far clip planes
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.update_matrices();
    }

    /// Update the aspect ratio from a viewport size
    ///
    /// Heights at or below [`MIN_VIEWPORT_HEIGHT`] are ignored so that minimizing a
    /// window never produces an infinite or NaN projection.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > MIN_VIEWPORT_HEIGHT {
            self.aspect = width / height;
            log::info!("Camera aspect ratio set to {:.3}", self.aspect);
            self.update_matrices();
        }
    }

    /// Position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in radians
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in radians
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// Near clip plane
    pub fn near(&self) -> f32 {
        self.near
    }

    /// Far clip plane
    pub fn far(&self) -> f32 {
        self.far
    }

    /// Width / height
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    /// Unit viewing direction
    pub fn front(&self) -> Vec3 {
        self.front
    }

    /// Unit vector to the camera's right, perpendicular to front and world up
    pub fn right(&self) -> Vec3 {
        self.front.cross(&self.world_up).normalize()
    }

    /// Camera-space up vector
    pub fn up(&self) -> Vec3 {
        self.right().cross(&self.front).normalize()
    }

    /// View matrix
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view
    }

    /// Projection matrix
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// Projection multiplied by view
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Counter bumped on every matrix recomputation
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = Camera::default();
        assert_relative_eq!(camera.front(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(camera.up(), Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_view_moves_eye_to_origin() {
        let camera = Camera::new(Vec3::new(2.0, 3.0, 4.0));
        let eye = camera.view_matrix().transform_point(&Point3::new(2.0, 3.0, 4.0));
        assert_relative_eq!(eye, Point3::origin(), epsilon = EPSILON);

        // A point straight ahead lands on the -Z axis in view space
        let ahead = camera.view_matrix().transform_point(&Point3::new(2.0, 3.0, 0.0));
        assert_relative_eq!(ahead, Point3::new(0.0, 0.0, -4.0), epsilon = EPSILON);
    }

    #[test]
    fn test_pitch_up_tilts_front() {
        let mut camera = Camera::default();
        camera.set_pitch(utils::deg_to_rad(90.0));
        assert_relative_eq!(camera.front().y, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_aspect_is_ignored() {
        let mut camera = Camera::default();
        let before = camera.revision();
        camera.set_aspect_ratio(800.0, 0.0);
        assert_relative_eq!(camera.aspect_ratio(), 4.0 / 3.0);
        assert_eq!(camera.revision(), before);

        camera.set_aspect_ratio(1600.0, 900.0);
        assert_relative_eq!(camera.aspect_ratio(), 16.0 / 9.0);
        assert!(camera.revision() > before);
    }

    #[test]
    fn test_projection_matches_gl_convention() {
        let camera = Camera::default();
        let proj = camera.projection_matrix();
        // OpenGL projection has -1 in the w row
        assert_relative_eq!(proj[(3, 2)], -1.0);
        // Near plane maps to NDC depth -1
        let near_point = proj.transform_point(&Point3::new(0.0, 0.0, -camera.near()));
        assert_relative_eq!(near_point.z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_from_config() {
        let config = CameraConfig {
            fov_degrees: 60.0,
            far: 250.0,
            ..CameraConfig::default()
        };
        let camera = Camera::from_config(Vec3::zeros(), &config);
        assert_relative_eq!(camera.fov(), utils::deg_to_rad(60.0));
        assert_relative_eq!(camera.far(), 250.0);
    }
}
