//! Lighting system
//!
//! Lights are a closed set of kinds ([`Light`]) stored in a [`LightSet`]. Once per
//! frame the set is flattened into a [`LightUniforms`] payload, clamped to the fixed
//! array sizes the shaders declare, and uploaded in a single pass.

pub mod light;
pub mod light_set;
pub mod uniforms;

pub use light::{Attenuation, DirectionalLight, Light, LightKind, PointLight, SpotLight};
pub use light_set::LightSet;
pub use uniforms::{
    LightUniforms, OverflowCounts, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};
