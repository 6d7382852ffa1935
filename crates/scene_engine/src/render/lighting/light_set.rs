//! Scene light collection

use std::cell::Cell;

use crate::config::LightingConfig;
use crate::foundation::collections::{LightKey, OrderedArena};
use crate::foundation::math::Vec3;
use crate::render::Camera;

use super::light::{Attenuation, Light, SpotLight};
use super::uniforms::{
    LightUniforms, OverflowCounts, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};

/// All lights of a scene
///
/// Directional and point lights form one ordered collection, spot lights another.
/// Both live in the same arena so a [`LightKey`] identifies a light regardless of
/// kind. The flashlight is kept outside the collections and is always submitted.
#[derive(Debug, Clone)]
pub struct LightSet {
    ambient: Vec3,
    lights: OrderedArena<LightKey, Light>,
    flashlight: SpotLight,
    flashlight_enabled: bool,
    reported_overflow: Cell<OverflowCounts>,
}

impl Default for LightSet {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}

impl LightSet {
    /// Empty light set with default ambient and flashlight
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty light set using configured ambient and flashlight parameters
    pub fn from_config(config: &LightingConfig) -> Self {
        let flashlight = SpotLight::from_degrees(
            Vec3::zeros(),
            -Vec3::z(),
            Vec3::from(config.flashlight_color),
            Attenuation::default(),
            config.flashlight_inner_degrees,
            config.flashlight_outer_degrees,
        );
        Self {
            ambient: config.ambient_color(),
            lights: OrderedArena::new(),
            flashlight,
            flashlight_enabled: config.flashlight_enabled,
            reported_overflow: Cell::new(OverflowCounts::default()),
        }
    }

    /// Set the global ambient color
    pub fn set_ambient_light(&mut self, color: Vec3) {
        self.ambient = color;
    }

    /// Global ambient color
    pub fn ambient(&self) -> Vec3 {
        self.ambient
    }

    /// Append a light of any kind
    pub fn add_light(&mut self, light: Light) -> LightKey {
        log::trace!("Adding {:?} light", light.kind());
        self.lights.insert(light)
    }

    /// Append a directional light
    pub fn add_dir_light(&mut self, direction: Vec3, color: Vec3) -> LightKey {
        self.add_light(Light::directional(direction, color))
    }

    /// Append a point light
    pub fn add_point_light(
        &mut self,
        position: Vec3,
        color: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
    ) -> LightKey {
        self.add_light(Light::point(
            position,
            color,
            Attenuation::new(constant, linear, quadratic),
        ))
    }

    /// Append a spot light
    pub fn add_spot_light(
        &mut self,
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        constant: f32,
        linear: f32,
        quadratic: f32,
        inner_cutoff_cos: f32,
        outer_cutoff_cos: f32,
    ) -> LightKey {
        self.add_light(Light::Spot(SpotLight {
            position,
            direction,
            color,
            attenuation: Attenuation::new(constant, linear, quadratic),
            inner_cutoff_cos,
            outer_cutoff_cos,
        }))
    }

    /// Look up a light
    pub fn light(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    /// Look up a light for mutation
    pub fn light_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }

    /// Remove a light, invalidating its key
    pub fn remove_light(&mut self, key: LightKey) -> Option<Light> {
        self.lights.remove(key)
    }

    /// Remove every light; ambient and flashlight are kept
    pub fn clear(&mut self) {
        self.lights.clear();
        self.reported_overflow.set(OverflowCounts::default());
    }

    /// Directional and point lights in insertion order
    pub fn lights(&self) -> impl Iterator<Item = (LightKey, &Light)> + '_ {
        self.lights
            .iter()
            .filter(|(_, light)| !matches!(light, Light::Spot(_)))
    }

    /// Spot lights in insertion order
    pub fn spot_lights(&self) -> impl Iterator<Item = (LightKey, &SpotLight)> + '_ {
        self.lights.iter().filter_map(|(key, light)| match light {
            Light::Spot(spot) => Some((key, spot)),
            _ => None,
        })
    }

    /// Number of lights in both collections
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether both collections are empty
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Flip the flashlight on or off; returns the new state
    pub fn toggle_flashlight(&mut self) -> bool {
        self.flashlight_enabled = !self.flashlight_enabled;
        log::info!(
            "Flashlight {}",
            if self.flashlight_enabled { "on" } else { "off" }
        );
        self.flashlight_enabled
    }

    /// Switch the flashlight explicitly
    pub fn set_flashlight_enabled(&mut self, enabled: bool) {
        self.flashlight_enabled = enabled;
    }

    /// Whether the flashlight contributes
    pub fn flashlight_enabled(&self) -> bool {
        self.flashlight_enabled
    }

    /// The camera-bound spot light
    pub fn flashlight(&self) -> &SpotLight {
        &self.flashlight
    }

    /// Place the flashlight at the camera, pointing where it looks.
    /// Returns whether anything moved.
    pub fn sync_flashlight(&mut self, camera: &Camera) -> bool {
        let position = camera.position();
        let direction = camera.front();
        if self.flashlight.position == position && self.flashlight.direction == direction {
            return false;
        }
        self.flashlight.position = position;
        self.flashlight.direction = direction;
        true
    }

    /// Build the clamped uniform payload for one frame
    ///
    /// Lights beyond the per-kind capacity stay in the set but are left out. A warning
    /// is logged whenever the set of dropped lights changes, not on every frame.
    pub fn build_uniforms(&self, view_position: Vec3) -> LightUniforms {
        let mut uniforms = LightUniforms {
            view_position,
            ambient: self.ambient,
            directional: Vec::with_capacity(MAX_DIRECTIONAL_LIGHTS),
            point: Vec::with_capacity(MAX_POINT_LIGHTS),
            spot: Vec::with_capacity(MAX_SPOT_LIGHTS),
            flashlight: self.flashlight,
            flashlight_enabled: self.flashlight_enabled,
            dropped: OverflowCounts::default(),
        };

        for (_, light) in self.lights.iter() {
            match light {
                Light::Directional(dir) => {
                    if uniforms.directional.len() < MAX_DIRECTIONAL_LIGHTS {
                        uniforms.directional.push(*dir);
                    } else {
                        uniforms.dropped.directional += 1;
                    }
                }
                Light::Point(point) => {
                    if uniforms.point.len() < MAX_POINT_LIGHTS {
                        uniforms.point.push(*point);
                    } else {
                        uniforms.dropped.point += 1;
                    }
                }
                Light::Spot(spot) => {
                    if uniforms.spot.len() < MAX_SPOT_LIGHTS {
                        uniforms.spot.push(*spot);
                    } else {
                        uniforms.dropped.spot += 1;
                    }
                }
            }
        }

        if uniforms.dropped != self.reported_overflow.get() {
            if uniforms.dropped.any() {
                log::warn!(
                    "Light capacity exceeded, not submitting {} directional, {} point, {} spot light(s)",
                    uniforms.dropped.directional,
                    uniforms.dropped.point,
                    uniforms.dropped.spot
                );
            }
            self.reported_overflow.set(uniforms.dropped);
        }

        log::trace!(
            "Built light uniforms: {} dir, {} point, {} spot",
            uniforms.directional.len(),
            uniforms.point.len(),
            uniforms.spot.len()
        );

        uniforms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shader::{names, RecordingShader, UniformValue};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 0.001;

    fn assert_vec3_approx_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a, b, epsilon = EPSILON);
    }

    #[test]
    fn test_point_lights_clamped_to_capacity() {
        let mut set = LightSet::new();
        for i in 0..(MAX_POINT_LIGHTS + 3) {
            set.add_point_light(Vec3::new(i as f32, 0.0, 0.0), Vec3::repeat(1.0), 1.0, 0.09, 0.032);
        }
        assert_eq!(set.len(), MAX_POINT_LIGHTS + 3);

        let uniforms = set.build_uniforms(Vec3::zeros());
        assert_eq!(uniforms.point.len(), MAX_POINT_LIGHTS);
        assert_eq!(uniforms.dropped.point, 3);
        // Insertion order decides who is kept
        assert_vec3_approx_eq(uniforms.point[MAX_POINT_LIGHTS - 1].position, Vec3::new(7.0, 0.0, 0.0));
    }

    #[test]
    fn test_kinds_are_clamped_independently() {
        let mut set = LightSet::new();
        for _ in 0..(MAX_DIRECTIONAL_LIGHTS + 1) {
            set.add_dir_light(-Vec3::y(), Vec3::repeat(0.5));
        }
        for _ in 0..(MAX_SPOT_LIGHTS + 2) {
            set.add_spot_light(Vec3::zeros(), -Vec3::y(), Vec3::repeat(1.0), 1.0, 0.0, 0.0, 0.9, 0.8);
        }
        set.add_point_light(Vec3::zeros(), Vec3::repeat(1.0), 1.0, 0.0, 0.0);

        let uniforms = set.build_uniforms(Vec3::zeros());
        assert_eq!(uniforms.directional.len(), MAX_DIRECTIONAL_LIGHTS);
        assert_eq!(uniforms.spot.len(), MAX_SPOT_LIGHTS);
        assert_eq!(uniforms.point.len(), 1);
        assert_eq!(
            uniforms.dropped,
            OverflowCounts { directional: 1, point: 0, spot: 2 }
        );
        assert_eq!(set.spot_lights().count(), MAX_SPOT_LIGHTS + 2);
        assert_eq!(set.lights().count(), MAX_DIRECTIONAL_LIGHTS + 2);
    }

    #[test]
    fn test_key_allows_later_mutation() {
        let mut set = LightSet::new();
        let key = set.add_point_light(Vec3::zeros(), Vec3::repeat(1.0), 1.0, 0.09, 0.032);
        if let Some(light) = set.light_mut(key) {
            light.set_position(Vec3::new(0.0, 3.0, 0.0));
        }
        let uniforms = set.build_uniforms(Vec3::zeros());
        assert_vec3_approx_eq(uniforms.point[0].position, Vec3::new(0.0, 3.0, 0.0));

        set.remove_light(key);
        assert!(set.light(key).is_none());
        assert!(set.light_mut(key).is_none());
    }

    #[test]
    fn test_flashlight_follows_camera() {
        let mut set = LightSet::new();
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        assert!(set.sync_flashlight(&camera));
        assert!(!set.sync_flashlight(&camera));
        assert_vec3_approx_eq(set.flashlight().position, Vec3::new(1.0, 2.0, 3.0));

        camera.set_yaw(0.0);
        assert!(set.sync_flashlight(&camera));
        assert_vec3_approx_eq(set.flashlight().direction, Vec3::x());
    }

    #[test]
    fn test_toggle_flashlight() {
        let mut set = LightSet::new();
        assert!(!set.flashlight_enabled());
        assert!(set.toggle_flashlight());
        assert!(!set.toggle_flashlight());
    }

    #[test]
    fn test_upload_writes_capped_arrays() {
        let mut set = LightSet::new();
        set.set_ambient_light(Vec3::repeat(0.2));
        for _ in 0..(MAX_POINT_LIGHTS * 2) {
            set.add_point_light(Vec3::zeros(), Vec3::repeat(1.0), 1.0, 0.09, 0.032);
        }

        let recorder = RecordingShader::new();
        let mut shader = recorder.clone();
        set.build_uniforms(Vec3::new(0.0, 1.0, 0.0)).upload(&mut shader);

        assert_eq!(
            recorder.last(names::POINT_LIGHT_COUNT),
            Some(UniformValue::Int(MAX_POINT_LIGHTS as i32))
        );
        assert_eq!(recorder.count_prefix("u_PointLights["), MAX_POINT_LIGHTS * 5);
        assert_eq!(recorder.count(&format!("u_PointLights[{MAX_POINT_LIGHTS}].position")), 0);
        assert_eq!(recorder.last(names::AMBIENT_COLOR), Some(UniformValue::Vec3(Vec3::repeat(0.2))));
        assert_eq!(recorder.last(names::FLASHLIGHT_ENABLED), Some(UniformValue::Int(0)));
        assert_eq!(recorder.count_prefix("u_Flashlight."), 8);
    }
}
