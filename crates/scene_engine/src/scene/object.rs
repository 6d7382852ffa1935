//! Drawable objects and their picking ids

use std::fmt;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::foundation::collections::MaterialKey;
use crate::foundation::math::{Mat4, Mat4Ext, Vec4};
use crate::render::shader::{names, ShaderBinding};
use crate::render::{DrawCall, DrawTarget, Material, Mesh};

use super::transformation::Transformation;

static NEXT_OBJECT_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique, non-zero object identifier written to the stencil buffer
///
/// Stencil value 0 is the cleared background and never names an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(NonZeroU32);

impl ObjectId {
    fn next() -> Self {
        let raw = NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed);
        // The counter only wraps after four billion objects; skip the reserved 0.
        Self(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MIN))
    }

    /// Interpret a stencil read-back; 0 is the background
    pub fn from_stencil(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    /// Raw value as written to the stencil buffer
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mesh placed in the scene
#[derive(Debug, Clone)]
pub struct DrawableObject {
    id: ObjectId,
    mesh: Mesh,
    transformation: Transformation,
    material: MaterialKey,
    color: Vec4,
    unlit: bool,
}

impl DrawableObject {
    /// Create an object with the next free id, identity transform and white tint
    pub fn new(mesh: Mesh, material: MaterialKey) -> Self {
        let id = ObjectId::next();
        log::trace!("Created object {} (mesh {})", id, mesh.handle());
        Self {
            id,
            mesh,
            transformation: Transformation::new(),
            material,
            color: Vec4::repeat(1.0),
            unlit: false,
        }
    }

    /// Builder-style tint
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Builder-style unlit flag
    pub fn with_unlit(mut self, unlit: bool) -> Self {
        self.unlit = unlit;
        self
    }

    /// Picking id
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Geometry
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Placement
    pub fn transformation(&self) -> &Transformation {
        &self.transformation
    }

    /// Placement, for appending or resetting operations
    pub fn transformation_mut(&mut self) -> &mut Transformation {
        &mut self.transformation
    }

    /// Shared material
    pub fn material(&self) -> MaterialKey {
        self.material
    }

    /// Switch to another shared material
    pub fn set_material(&mut self, material: MaterialKey) {
        self.material = material;
    }

    /// Per-object tint
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Change the tint
    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    /// Whether lighting is bypassed
    pub fn is_unlit(&self) -> bool {
        self.unlit
    }

    /// Bypass or restore lighting
    pub fn set_unlit(&mut self, unlit: bool) {
        self.unlit = unlit;
    }

    /// Push per-object uniforms and issue the draw tagged with this object's id
    pub fn draw(&self, material: &Material, shader: &mut dyn ShaderBinding, target: &mut dyn DrawTarget) {
        let model: Mat4 = self.transformation.matrix();

        shader.set_mat4(names::MODEL_MATRIX, &model);
        shader.set_mat3(names::NORMAL_MATRIX, &model.normal_matrix());
        shader.set_vec4(names::COLOR, &self.color);
        shader.set_bool(names::UNLIT, self.unlit);
        if !self.unlit {
            material.upload(shader);
        }

        target.draw(&DrawCall {
            mesh: &self.mesh,
            model,
            stencil_id: self.id.get(),
        });
    }
}
