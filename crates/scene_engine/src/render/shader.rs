//! Shader binding interface
//!
//! The engine never compiles shaders or talks to a graphics API itself. It writes
//! named uniforms into a [`ShaderBinding`] supplied by the host, which forwards them
//! to whatever program object it manages.

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::{Mat3, Mat4, Vec3, Vec4};

/// Uniform names shared between the engine and its shaders
pub mod names {
    /// Model matrix of the object being drawn
    pub const MODEL_MATRIX: &str = "u_ModelMatrix";
    /// Inverse-transpose of the model matrix
    pub const NORMAL_MATRIX: &str = "u_NormalMatrix";
    /// Camera view matrix
    pub const VIEW_MATRIX: &str = "u_ViewMatrix";
    /// Camera projection matrix
    pub const PROJECTION_MATRIX: &str = "u_ProjectionMatrix";
    /// Camera position in world space
    pub const VIEW_POSITION: &str = "u_ViewPos";
    /// Per-object tint
    pub const COLOR: &str = "u_Color";
    /// Non-zero when lighting should be bypassed
    pub const UNLIT: &str = "u_Unlit";
    /// Global ambient color
    pub const AMBIENT_COLOR: &str = "u_AmbientColor";
    /// Number of directional lights submitted
    pub const DIR_LIGHT_COUNT: &str = "u_DirLightCount";
    /// Directional light array
    pub const DIR_LIGHTS: &str = "u_DirLights";
    /// Number of point lights submitted
    pub const POINT_LIGHT_COUNT: &str = "u_PointLightCount";
    /// Point light array
    pub const POINT_LIGHTS: &str = "u_PointLights";
    /// Number of spot lights submitted
    pub const SPOT_LIGHT_COUNT: &str = "u_SpotLightCount";
    /// Spot light array
    pub const SPOT_LIGHTS: &str = "u_SpotLights";
    /// Camera-bound spot light
    pub const FLASHLIGHT: &str = "u_Flashlight";
    /// Non-zero when the flashlight contributes
    pub const FLASHLIGHT_ENABLED: &str = "u_FlashlightEnabled";
    /// Phong material struct
    pub const MATERIAL: &str = "u_Material";
}

/// Sink for named uniform writes
///
/// Implementations are expected to bind their program in [`ShaderBinding::bind`] and
/// keep uniform values until overwritten, so the engine only re-sends state that changed.
pub trait ShaderBinding {
    /// Make this program current
    fn bind(&mut self) {}

    /// Write a 4x4 matrix
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Write a 3x3 matrix
    fn set_mat3(&mut self, name: &str, value: &Mat3);

    /// Write a 3-component vector
    fn set_vec3(&mut self, name: &str, value: &Vec3);

    /// Write a 4-component vector
    fn set_vec4(&mut self, name: &str, value: &Vec4);

    /// Write a float
    fn set_float(&mut self, name: &str, value: f32);

    /// Write an integer
    fn set_int(&mut self, name: &str, value: i32);

    /// Write a boolean as an integer
    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_int(name, i32::from(value));
    }
}

/// A recorded uniform value
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// 4x4 matrix
    Mat4(Mat4),
    /// 3x3 matrix
    Mat3(Mat3),
    /// 3-component vector
    Vec3(Vec3),
    /// 4-component vector
    Vec4(Vec4),
    /// Float
    Float(f32),
    /// Integer
    Int(i32),
}

/// A single recorded write
#[derive(Debug, Clone, PartialEq)]
pub struct UniformWrite {
    /// Uniform name
    pub name: String,
    /// Written value
    pub value: UniformValue,
}

/// Shader binding that records every write instead of uploading it
///
/// Clones share the same log, so a caller can hand one clone to a scene and keep
/// another to inspect uniform traffic. Used by the headless demo and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingShader {
    log: Rc<RefCell<Vec<UniformWrite>>>,
    binds: Rc<RefCell<usize>>,
}

impl RecordingShader {
    /// Create a recorder with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, name: &str, value: UniformValue) {
        self.log.borrow_mut().push(UniformWrite {
            name: name.to_string(),
            value,
        });
    }

    /// Snapshot of all writes so far
    pub fn writes(&self) -> Vec<UniformWrite> {
        self.log.borrow().clone()
    }

    /// Most recent value written to `name`
    pub fn last(&self, name: &str) -> Option<UniformValue> {
        self.log
            .borrow()
            .iter()
            .rev()
            .find(|w| w.name == name)
            .map(|w| w.value.clone())
    }

    /// Number of writes to exactly `name`
    pub fn count(&self, name: &str) -> usize {
        self.log.borrow().iter().filter(|w| w.name == name).count()
    }

    /// Number of writes whose name starts with `prefix`
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|w| w.name.starts_with(prefix))
            .count()
    }

    /// Total number of writes
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Number of times the program was bound
    pub fn bind_count(&self) -> usize {
        *self.binds.borrow()
    }

    /// Forget all recorded writes
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
        *self.binds.borrow_mut() = 0;
    }
}

impl ShaderBinding for RecordingShader {
    fn bind(&mut self) {
        *self.binds.borrow_mut() += 1;
    }

    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.record(name, UniformValue::Mat4(*value));
    }

    fn set_mat3(&mut self, name: &str, value: &Mat3) {
        self.record(name, UniformValue::Mat3(*value));
    }

    fn set_vec3(&mut self, name: &str, value: &Vec3) {
        self.record(name, UniformValue::Vec3(*value));
    }

    fn set_vec4(&mut self, name: &str, value: &Vec4) {
        self.record(name, UniformValue::Vec4(*value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name, UniformValue::Int(value));
    }
}
