//! Time-driven scene animation
//!
//! Animators hold arena keys, not references. When the object or light they drive is
//! removed, the key stops resolving and the animator quietly does nothing.

use crate::foundation::collections::{LightKey, ObjectKey, OrderedArena};
use crate::foundation::math::Vec3;
use crate::render::LightSet;

use super::object::DrawableObject;

/// Uniform scale applied to firefly marker meshes
pub const FIREFLY_MARKER_SCALE: f32 = 0.05;

/// A point light wandering around a fixed base position, with an optional marker mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Firefly {
    light: LightKey,
    marker: Option<ObjectKey>,
    base: Vec3,
    phase: f32,
}

impl Firefly {
    /// Firefly driving `light` (and `marker`, if any) around `base`
    pub fn new(light: LightKey, marker: Option<ObjectKey>, base: Vec3, phase: f32) -> Self {
        Self {
            light,
            marker,
            base,
            phase,
        }
    }

    /// Offset from the base position at `time` seconds
    pub fn offset_at(time: f32, phase: f32) -> Vec3 {
        Vec3::new(
            (1.3 * time + phase).sin() * 0.6,
            (2.1 * time + phase).sin() * 0.25,
            (0.9 * time + phase).cos() * 0.6,
        )
    }

    /// World position at `time` seconds
    pub fn position_at(&self, time: f32) -> Vec3 {
        self.base + Self::offset_at(time, self.phase)
    }

    /// Driven light
    pub fn light(&self) -> LightKey {
        self.light
    }

    /// Marker object
    pub fn marker(&self) -> Option<ObjectKey> {
        self.marker
    }

    /// Center of the wander
    pub fn base(&self) -> Vec3 {
        self.base
    }

    /// Move light and marker to their position at `time`; returns whether the light moved
    pub fn animate(
        &self,
        time: f32,
        lights: &mut LightSet,
        objects: &mut OrderedArena<ObjectKey, DrawableObject>,
    ) -> bool {
        let position = self.position_at(time);

        if let Some(object) = self.marker.and_then(|key| objects.get_mut(key)) {
            object
                .transformation_mut()
                .reset()
                .translate(position)
                .scale(Vec3::repeat(FIREFLY_MARKER_SCALE));
        }

        lights
            .light_mut(self.light)
            .is_some_and(|light| light.set_position(position))
    }
}

/// Orbit speeds, distances and scales for the sun/earth/moon scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Earth orbit speed in radians per second
    pub earth_speed: f32,
    /// Moon orbit speed in radians per second
    pub moon_speed: f32,
    /// Earth to sun distance
    pub earth_distance: f32,
    /// Moon to earth distance
    pub moon_distance: f32,
    /// Earth scale
    pub earth_scale: f32,
    /// Moon scale
    pub moon_scale: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            earth_speed: 0.5,
            moon_speed: 2.0,
            earth_distance: 8.0,
            moon_distance: 2.0,
            earth_scale: 1.0,
            moon_scale: 0.5,
        }
    }
}

/// Earth orbiting the origin with a moon orbiting the earth
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRig {
    earth: ObjectKey,
    moon: ObjectKey,
    params: OrbitParams,
    earth_angle: f32,
    moon_angle: f32,
}

impl OrbitRig {
    /// Rig driving the given objects, both angles at zero
    pub fn new(earth: ObjectKey, moon: ObjectKey, params: OrbitParams) -> Self {
        Self {
            earth,
            moon,
            params,
            earth_angle: 0.0,
            moon_angle: 0.0,
        }
    }

    /// Earth orbit angle in radians
    pub fn earth_angle(&self) -> f32 {
        self.earth_angle
    }

    /// Moon orbit angle in radians
    pub fn moon_angle(&self) -> f32 {
        self.moon_angle
    }

    /// Advance both angles and rebuild the two transformations
    ///
    /// The moon inherits the earth's orbit: `R(earth)·T(earth distance)·R(moon)·T(moon distance)·S`.
    pub fn advance(&mut self, delta_time: f32, objects: &mut OrderedArena<ObjectKey, DrawableObject>) {
        if !objects.contains_key(self.earth) || !objects.contains_key(self.moon) {
            return;
        }

        self.earth_angle += self.params.earth_speed * delta_time;
        self.moon_angle += self.params.moon_speed * delta_time;

        let p = self.params;
        if let Some(earth) = objects.get_mut(self.earth) {
            earth
                .transformation_mut()
                .reset()
                .rotate(self.earth_angle, Vec3::y())
                .translate(Vec3::new(p.earth_distance, 0.0, 0.0))
                .scale(Vec3::repeat(p.earth_scale));
        }
        if let Some(moon) = objects.get_mut(self.moon) {
            moon.transformation_mut()
                .reset()
                .rotate(self.earth_angle, Vec3::y())
                .translate(Vec3::new(p.earth_distance, 0.0, 0.0))
                .rotate(self.moon_angle, Vec3::y())
                .translate(Vec3::new(p.moon_distance, 0.0, 0.0))
                .scale(Vec3::repeat(p.moon_scale));
        }
    }
}
