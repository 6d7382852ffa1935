//! Math utilities and types
//!
//! Provides the fundamental math types shared by transforms, lighting and the camera.
//! Matrices follow the OpenGL convention: right-handed view space, clip-space depth
//! in [-1, 1], column vectors multiplied on the right.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix3, Matrix4,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation between two vectors
    pub fn lerp_vec3(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Rotation of `angle` radians about an arbitrary axis (normalized internally)
    fn rotation_about(angle: f32, axis: &Vec3) -> Mat4;

    /// OpenGL-style perspective projection (`fov_y` in radians)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4;

    /// Inverse-transpose of the upper 3x3 block, used to transform normals.
    /// Falls back to identity for singular matrices.
    fn normal_matrix(&self) -> Mat3;
}

impl Mat4Ext for Mat4 {
    fn rotation_about(angle: f32, axis: &Vec3) -> Mat4 {
        // Zero-length axes produce NaN, matching the behaviour of normalizing in place.
        let axis = Unit::new_unchecked(axis.normalize());
        Mat4::from_axis_angle(&axis, angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(*eye), &Point3::from(*target), up)
    }

    fn normal_matrix(&self) -> Mat3 {
        let upper: Mat3 = self.fixed_view::<3, 3>(0, 0).into_owned();
        upper
            .try_inverse()
            .map_or_else(Mat3::identity, |inverse| inverse.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_lerp_endpoints() {
        assert_relative_eq!(utils::lerp(2.0, 6.0, 0.0), 2.0);
        assert_relative_eq!(utils::lerp(2.0, 6.0, 1.0), 6.0);
        assert_relative_eq!(utils::lerp(2.0, 6.0, 0.25), 3.0);
    }

    #[test]
    fn test_rotation_about_normalizes_axis() {
        let a = Mat4::rotation_about(1.0, &Vec3::new(0.0, 5.0, 0.0));
        let b = Mat4::from_axis_angle(&Vec3::y_axis(), 1.0);
        assert_relative_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::new(1.0, 2.0, 3.0);
        let view = Mat4::look_at(&eye, &Vec3::new(1.0, 2.0, 2.0), &Vec3::y());
        let p = view.transform_point(&Point3::from(eye));
        assert_relative_eq!(p, Point3::origin(), epsilon = EPSILON);
    }

    #[test]
    fn test_normal_matrix_of_uniform_scale() {
        let m = Mat4::new_scaling(2.0);
        assert_relative_eq!(m.normal_matrix(), Mat3::identity() * 0.5, epsilon = EPSILON);
    }
}
