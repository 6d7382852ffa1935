//! Scene management system
//!
//! Bridges gameplay state (animators, the mini-game) with render state (camera,
//! lights, per-object uniforms).
//!
//! ## Architecture
//!
//! ```text
//! SceneSwitcher (preset selection)
//!      ↓
//! Scene (objects, lights, camera, dirty flags)
//!      ↓
//! ShaderBinding + DrawTarget (host graphics layer)
//! ```
//!
//! The Scene:
//! - Owns drawable objects in an ordered arena (draw order = insertion order)
//! - Tracks camera and light changes and re-sends them once per frame
//! - Drives fireflies, the solar-system orbit and the whack-a-mole game in `update`

pub mod animators;
pub mod object;
pub mod presets;
mod scene_graph;
mod switcher;
pub mod transformation;

pub use animators::{Firefly, OrbitParams, OrbitRig};
pub use object::{DrawableObject, ObjectId};
pub use presets::{PresetMeshes, SceneError, PRESET_COUNT, WHACK_A_MOLE_SCENE_INDEX};
pub use scene_graph::{DirtyFlags, Scene, SyncReport, SOLAR_SYSTEM_SCENE_INDEX};
pub use switcher::SceneSwitcher;
pub use transformation::{TransformOp, Transformation};
