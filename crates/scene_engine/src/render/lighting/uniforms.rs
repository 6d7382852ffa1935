//! Per-frame light uniform payload
//!
//! The payload is built once per frame from the light set, already clamped to the
//! shader's fixed array sizes, then written to the shader binding in one pass.

use crate::foundation::math::Vec3;
use crate::render::shader::{names, ShaderBinding};

use super::light::{DirectionalLight, PointLight, SpotLight};

/// Maximum number of directional lights supported
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;
/// Maximum number of point lights supported
pub const MAX_POINT_LIGHTS: usize = 8;
/// Maximum number of spot lights supported (excluding the flashlight)
pub const MAX_SPOT_LIGHTS: usize = 4;

/// Lights present in the set but not submitted, per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverflowCounts {
    /// Dropped directional lights
    pub directional: usize,
    /// Dropped point lights
    pub point: usize,
    /// Dropped spot lights
    pub spot: usize,
}

impl OverflowCounts {
    /// Whether anything was dropped
    pub fn any(&self) -> bool {
        self.directional + self.point + self.spot > 0
    }
}

/// Clamped light state ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct LightUniforms {
    /// Camera position used for specular terms
    pub view_position: Vec3,
    /// Global ambient color
    pub ambient: Vec3,
    /// At most [`MAX_DIRECTIONAL_LIGHTS`] entries
    pub directional: Vec<DirectionalLight>,
    /// At most [`MAX_POINT_LIGHTS`] entries
    pub point: Vec<PointLight>,
    /// At most [`MAX_SPOT_LIGHTS`] entries
    pub spot: Vec<SpotLight>,
    /// Camera-bound spot light
    pub flashlight: SpotLight,
    /// Whether the flashlight contributes
    pub flashlight_enabled: bool,
    /// What was left out
    pub dropped: OverflowCounts,
}

impl LightUniforms {
    /// Total number of submitted lights, flashlight excluded
    pub fn submitted(&self) -> usize {
        self.directional.len() + self.point.len() + self.spot.len()
    }

    /// Write everything to the shader
    pub fn upload(&self, shader: &mut dyn ShaderBinding) {
        shader.set_vec3(names::VIEW_POSITION, &self.view_position);
        shader.set_vec3(names::AMBIENT_COLOR, &self.ambient);

        shader.set_int(names::DIR_LIGHT_COUNT, count_as_i32(self.directional.len()));
        for (i, light) in self.directional.iter().enumerate() {
            let base = format!("{}[{i}]", names::DIR_LIGHTS);
            shader.set_vec3(&format!("{base}.direction"), &light.direction);
            shader.set_vec3(&format!("{base}.color"), &light.color);
        }

        shader.set_int(names::POINT_LIGHT_COUNT, count_as_i32(self.point.len()));
        for (i, light) in self.point.iter().enumerate() {
            let base = format!("{}[{i}]", names::POINT_LIGHTS);
            shader.set_vec3(&format!("{base}.position"), &light.position);
            shader.set_vec3(&format!("{base}.color"), &light.color);
            shader.set_float(&format!("{base}.constant"), light.attenuation.constant);
            shader.set_float(&format!("{base}.linear"), light.attenuation.linear);
            shader.set_float(&format!("{base}.quadratic"), light.attenuation.quadratic);
        }

        shader.set_int(names::SPOT_LIGHT_COUNT, count_as_i32(self.spot.len()));
        for (i, light) in self.spot.iter().enumerate() {
            upload_spot(shader, &format!("{}[{i}]", names::SPOT_LIGHTS), light);
        }

        upload_spot(shader, names::FLASHLIGHT, &self.flashlight);
        shader.set_bool(names::FLASHLIGHT_ENABLED, self.flashlight_enabled);
    }
}

fn upload_spot(shader: &mut dyn ShaderBinding, base: &str, light: &SpotLight) {
    shader.set_vec3(&format!("{base}.position"), &light.position);
    shader.set_vec3(&format!("{base}.direction"), &light.direction);
    shader.set_vec3(&format!("{base}.color"), &light.color);
    shader.set_float(&format!("{base}.constant"), light.attenuation.constant);
    shader.set_float(&format!("{base}.linear"), light.attenuation.linear);
    shader.set_float(&format!("{base}.quadratic"), light.attenuation.quadratic);
    shader.set_float(&format!("{base}.cutOff"), light.inner_cutoff_cos);
    shader.set_float(&format!("{base}.outerCutOff"), light.outer_cutoff_cos);
}

// Counts are bounded by the MAX_* constants.
fn count_as_i32(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
