//! Input side of the engine
//!
//! The window layer is external. It delivers key, mouse and scroll intents to the
//! [`CameraController`] and clicks to the stencil picking path.

pub mod camera_controller;
pub mod picking;

pub use camera_controller::{CameraController, CameraMovement};
pub use picking::{HeadlessTarget, StencilBuffer};
