//! # Rendering System
//!
//! Render-state side of the engine: camera, lights, materials and meshes, plus the
//! two seams to the host graphics layer.
//!
//! ## Architecture
//!
//! - **ShaderBinding**: named uniform writes into the host's program
//! - **DrawTarget**: draw calls tagged with a stencil id for picking
//! - **Camera / LightSet**: state that is flattened into uniforms once per frame
//!
//! The engine never touches a graphics API directly, which keeps every part of the
//! frame testable with [`RecordingShader`] and a software target.

pub mod camera;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod shader;
pub mod target;

pub use camera::Camera;
pub use lighting::{Light, LightKind, LightSet, LightUniforms};
pub use material::{Material, MaterialLibrary};
pub use mesh::{Aabb, Mesh, MeshError};
pub use shader::{RecordingShader, ShaderBinding, UniformValue};
pub use target::{CountingTarget, DrawCall, DrawTarget};

/// Why a frame was not rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No camera has been set
    NoCamera,
    /// No shader binding has been attached
    NoShader,
}

/// Work done by one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Objects drawn
    pub objects_drawn: usize,
    /// Whether camera matrices were re-sent
    pub camera_uploaded: bool,
    /// Lights submitted (flashlight excluded), zero when light uniforms were unchanged
    pub lights_submitted: usize,
}

/// Outcome of [`crate::scene::Scene::render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The frame was drawn
    Rendered(FrameStats),
    /// Nothing was drawn this frame
    Skipped(SkipReason),
}

impl RenderStatus {
    /// Whether the frame was drawn
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}
