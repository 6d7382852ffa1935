//! # Scene Engine
//!
//! Render-state core for small interactive 3D scenes, independent of any graphics API.
//!
//! ## Features
//!
//! - **Composite transforms**: ordered rotate/translate/scale chains folded on demand
//! - **Lighting**: directional, point and spot lights plus a camera-bound flashlight,
//!   clamped to fixed shader array sizes
//! - **Dirty tracking**: camera and light uniforms are sent once per frame, only when changed
//! - **Picking**: every object carries a non-zero id written to the stencil buffer
//! - **Whack-a-mole**: a timed target game layered on the same scene graph
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     scene_engine::foundation::logging::init();
//!
//!     let mut scene = Scene::new();
//!     scene.attach_shader(Box::new(RecordingShader::new()));
//!     scene.set_camera(Camera::new(Vec3::new(0.0, 0.0, 5.0)));
//!
//!     let cube = Mesh::new(1, 6, 36, Aabb::unit());
//!     let material = scene.materials().default_key();
//!     let key = scene.add_object(cube, material, Vec4::new(0.8, 0.2, 0.2, 1.0));
//!     if let Some(object) = scene.object_mut(key) {
//!         object.transformation_mut().rotate(0.5, Vec3::y()).scale(Vec3::repeat(0.5));
//!     }
//!
//!     let mut target = HeadlessTarget::new(800, 600);
//!     scene.update(0.016, 0);
//!     scene.render(&mut target);
//!
//!     if let Some(id) = target.pick(400, 300) {
//!         println!("Clicked object {id}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod game;
pub mod input;
pub mod render;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CameraConfig, Config, EngineConfig, GameConfig, LightingConfig},
        foundation::{
            collections::{LightKey, MaterialKey, ObjectKey},
            math::{Mat4, Vec3, Vec4},
        },
        game::{GameState, HitOutcome, TargetAppearances, WhackGame},
        input::{CameraController, CameraMovement, HeadlessTarget},
        render::{
            Aabb, Camera, DrawTarget, Material, Mesh, RecordingShader, RenderStatus,
            ShaderBinding,
        },
        scene::{DrawableObject, ObjectId, PresetMeshes, Scene, SceneSwitcher, Transformation},
    };
}
