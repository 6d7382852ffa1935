//! Light descriptors

use crate::foundation::math::{utils, Vec3};

/// Distance falloff coefficients: `1 / (constant + linear·d + quadratic·d²)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attenuation {
    /// Constant term
    pub constant: f32,
    /// Linear term
    pub linear: f32,
    /// Quadratic term
    pub quadratic: f32,
}

impl Attenuation {
    /// Create attenuation coefficients
    pub fn new(constant: f32, linear: f32, quadratic: f32) -> Self {
        Self {
            constant,
            linear,
            quadratic,
        }
    }
}

impl Default for Attenuation {
    /// Roughly a 50 unit range
    fn default() -> Self {
        Self::new(1.0, 0.09, 0.032)
    }
}

/// Light at infinity shining along a direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels
    pub direction: Vec3,
    /// Linear RGB color
    pub color: Vec3,
}

/// Omnidirectional light with distance falloff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World position
    pub position: Vec3,
    /// Linear RGB color
    pub color: Vec3,
    /// Falloff coefficients
    pub attenuation: Attenuation,
}

/// Cone light with distance falloff and a soft edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// World position
    pub position: Vec3,
    /// Cone axis
    pub direction: Vec3,
    /// Linear RGB color
    pub color: Vec3,
    /// Falloff coefficients
    pub attenuation: Attenuation,
    /// Cosine of the full-intensity half-angle
    pub inner_cutoff_cos: f32,
    /// Cosine of the zero-intensity half-angle
    pub outer_cutoff_cos: f32,
}

impl SpotLight {
    /// Spot light with cone half-angles given in degrees
    pub fn from_degrees(
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        attenuation: Attenuation,
        inner_degrees: f32,
        outer_degrees: f32,
    ) -> Self {
        Self {
            position,
            direction,
            color,
            attenuation,
            inner_cutoff_cos: utils::deg_to_rad(inner_degrees).cos(),
            outer_cutoff_cos: utils::deg_to_rad(outer_degrees).cos(),
        }
    }
}

/// Light kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    /// [`DirectionalLight`]
    Directional,
    /// [`PointLight`]
    Point,
    /// [`SpotLight`]
    Spot,
}

/// Any light
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    /// Directional light
    Directional(DirectionalLight),
    /// Point light
    Point(PointLight),
    /// Spot light
    Spot(SpotLight),
}

impl Light {
    /// Directional light
    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self::Directional(DirectionalLight { direction, color })
    }

    /// Point light
    pub fn point(position: Vec3, color: Vec3, attenuation: Attenuation) -> Self {
        Self::Point(PointLight {
            position,
            color,
            attenuation,
        })
    }

    /// Kind tag
    pub fn kind(&self) -> LightKind {
        match self {
            Self::Directional(_) => LightKind::Directional,
            Self::Point(_) => LightKind::Point,
            Self::Spot(_) => LightKind::Spot,
        }
    }

    /// Color of any light kind
    pub fn color(&self) -> Vec3 {
        match self {
            Self::Directional(light) => light.color,
            Self::Point(light) => light.color,
            Self::Spot(light) => light.color,
        }
    }

    /// Set the color; returns whether it changed
    pub fn set_color(&mut self, color: Vec3) -> bool {
        let slot = match self {
            Self::Directional(light) => &mut light.color,
            Self::Point(light) => &mut light.color,
            Self::Spot(light) => &mut light.color,
        };
        if *slot == color {
            return false;
        }
        *slot = color;
        true
    }

    /// Position, for kinds that have one
    pub fn position(&self) -> Option<Vec3> {
        match self {
            Self::Directional(_) => None,
            Self::Point(light) => Some(light.position),
            Self::Spot(light) => Some(light.position),
        }
    }

    /// Set the position; returns whether it changed. Directional lights ignore this.
    pub fn set_position(&mut self, position: Vec3) -> bool {
        let slot = match self {
            Self::Directional(_) => return false,
            Self::Point(light) => &mut light.position,
            Self::Spot(light) => &mut light.position,
        };
        if *slot == position {
            return false;
        }
        *slot = position;
        true
    }
}
