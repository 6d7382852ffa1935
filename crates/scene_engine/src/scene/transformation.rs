//! Composite transformation
//!
//! A model matrix described as an ordered list of rotate/translate/scale operations.
//! The matrix is rebuilt from the list on every request by post-multiplying each
//! operation onto the identity, so `translate(t).scale(s)` places an object scaled
//! about its own origin at `t`, while `scale(s).translate(t)` also scales the offset.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// A single geometric operation in a [`Transformation`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// Rotation by `angle` radians about `axis`
    Rotate {
        /// Angle in radians
        angle: f32,
        /// Rotation axis, normalized when the matrix is built
        axis: Vec3,
    },
    /// Translation by a vector
    Translate(Vec3),
    /// Non-uniform scale
    Scale(Vec3),
}

impl TransformOp {
    /// Matrix for this operation alone
    pub fn matrix(&self) -> Mat4 {
        match self {
            Self::Rotate { angle, axis } => Mat4::rotation_about(*angle, axis),
            Self::Translate(offset) => Mat4::new_translation(offset),
            Self::Scale(factors) => Mat4::new_nonuniform_scaling(factors),
        }
    }
}

/// Ordered sequence of operations producing a model matrix
///
/// # Example
/// ```
/// use scene_engine::foundation::math::Vec3;
/// use scene_engine::scene::Transformation;
///
/// let mut transform = Transformation::new();
/// transform
///     .translate(Vec3::new(0.0, 1.0, 0.0))
///     .rotate(std::f32::consts::FRAC_PI_2, Vec3::y())
///     .scale(Vec3::repeat(0.5));
/// assert_eq!(transform.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transformation {
    ops: Vec<TransformOp>,
}

impl Transformation {
    /// Create an empty (identity) transformation
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rotation of `angle` radians about `axis`
    pub fn rotate(&mut self, angle: f32, axis: Vec3) -> &mut Self {
        self.ops.push(TransformOp::Rotate { angle, axis });
        self
    }

    /// Append a translation
    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.ops.push(TransformOp::Translate(offset));
        self
    }

    /// Append a scale
    pub fn scale(&mut self, factors: Vec3) -> &mut Self {
        self.ops.push(TransformOp::Scale(factors));
        self
    }

    /// Append an arbitrary operation
    pub fn push(&mut self, op: TransformOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    /// Remove every operation
    pub fn reset(&mut self) -> &mut Self {
        self.ops.clear();
        self
    }

    /// Fold the operations over the identity in insertion order
    pub fn matrix(&self) -> Mat4 {
        self.ops
            .iter()
            .fold(Mat4::identity(), |acc, op| acc * op.matrix())
    }

    /// Operations in insertion order
    pub fn ops(&self) -> &[TransformOp] {
        &self.ops
    }

    /// Number of operations
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether no operations have been added
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_empty_is_identity() {
        assert_eq!(Transformation::new().matrix(), Mat4::identity());
    }

    #[test]
    fn test_matrix_is_pure() {
        let mut t = Transformation::new();
        t.rotate(0.7, Vec3::new(1.0, 1.0, 0.0))
            .translate(Vec3::new(3.0, -2.0, 1.0))
            .scale(Vec3::new(2.0, 0.5, 1.5));

        let first = t.matrix();
        let second = t.matrix();
        assert_eq!(first, second);
    }

    #[test]
    fn test_order_matters() {
        let s = Vec3::new(2.0, 2.0, 2.0);
        let offset = Vec3::new(1.0, 0.0, 0.0);

        let mut scale_first = Transformation::new();
        scale_first.scale(s).translate(offset);
        let mut translate_first = Transformation::new();
        translate_first.translate(offset).scale(s);

        assert_ne!(scale_first.matrix(), translate_first.matrix());

        // Post-multiplication: the scale also applies to the later translation
        let origin = Point3::origin();
        assert_relative_eq!(
            scale_first.matrix().transform_point(&origin),
            Point3::new(2.0, 0.0, 0.0),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            translate_first.matrix().transform_point(&origin),
            Point3::new(1.0, 0.0, 0.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_reset_returns_identity_and_is_idempotent() {
        let mut t = Transformation::new();
        t.translate(Vec3::new(5.0, 5.0, 5.0)).rotate(1.0, Vec3::z());
        t.reset();
        assert!(t.is_empty());
        assert_eq!(t.matrix(), Mat4::identity());
        t.reset();
        assert_eq!(t.matrix(), Mat4::identity());
    }

    #[test]
    fn test_rotate_then_translate_orbits() {
        // Orbit pattern used by the solar system: R(angle) * T(distance)
        let mut t = Transformation::new();
        t.rotate(FRAC_PI_2, Vec3::y()).translate(Vec3::new(8.0, 0.0, 0.0));
        let p = t.matrix().transform_point(&Point3::origin());
        assert_relative_eq!(p, Point3::new(0.0, 0.0, -8.0), epsilon = 1e-4);
    }

    #[test]
    fn test_nan_propagates() {
        let mut t = Transformation::new();
        t.translate(Vec3::new(f32::NAN, 0.0, 0.0));
        assert!(t.matrix()[(0, 3)].is_nan());
    }
}
