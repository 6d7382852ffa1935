//! Game targets and their two-segment path

use crate::foundation::collections::ObjectKey;
use crate::foundation::math::{utils, Vec3};
use crate::scene::{ObjectId, Transformation};

/// End of the path parameter; targets at or beyond this are removed
pub const PATH_END: f32 = 2.0;

/// The two kinds of target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Worth points, leaves towards +X
    Good,
    /// Costs points, leaves towards -X
    Bad,
}

impl TargetKind {
    /// Sign of the horizontal exit direction
    pub fn exit_sign(self) -> f32 {
        match self {
            Self::Good => 1.0,
            Self::Bad => -1.0,
        }
    }
}

/// Where a target is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPhase {
    /// Moving from spawn to apex, not hit
    Rising,
    /// Moving from apex to exit, not hit
    Falling,
    /// Hit; follows the same path faster
    Retracting,
    /// Path finished; due for removal
    Expired,
}

/// Three points describing the path: spawn, apex, exit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoints {
    /// Spawn point, below ground
    pub start: Vec3,
    /// Highest point
    pub apex: Vec3,
    /// Exit point, below ground
    pub exit: Vec3,
}

impl Waypoints {
    /// Position at path parameter `t`, clamped to [0, 2]
    ///
    /// `t` in [0, 1] moves from start to apex, `t` in (1, 2] from apex to exit.
    pub fn position_at(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, PATH_END);
        if t <= 1.0 {
            utils::lerp_vec3(&self.start, &self.apex, t)
        } else {
            utils::lerp_vec3(&self.apex, &self.exit, t - 1.0)
        }
    }
}

/// An animated, hittable object in the mini-game
#[derive(Debug, Clone, PartialEq)]
pub struct GameTarget {
    object: ObjectKey,
    id: ObjectId,
    kind: TargetKind,
    waypoints: Waypoints,
    t: f32,
    speed: f32,
    points: i32,
    hit: bool,
    spin: f32,
}

impl GameTarget {
    /// Target at the start of its path
    pub fn new(
        object: ObjectKey,
        id: ObjectId,
        kind: TargetKind,
        waypoints: Waypoints,
        speed: f32,
        points: i32,
    ) -> Self {
        Self {
            object,
            id,
            kind,
            waypoints,
            t: 0.0,
            speed,
            points,
            hit: false,
            spin: 0.0,
        }
    }

    /// Advance along the path; hit targets move `hit_multiplier` times faster
    pub fn advance(&mut self, delta_time: f32, hit_multiplier: f32, spin_speed: f32) {
        let rate = if self.hit { self.speed * hit_multiplier } else { self.speed };
        self.t = (self.t + rate * delta_time).min(PATH_END);
        self.spin += spin_speed * delta_time;
    }

    /// Mark as hit; returns false if it already was
    pub fn mark_hit(&mut self) -> bool {
        if self.hit {
            return false;
        }
        self.hit = true;
        true
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> TargetPhase {
        if self.t >= PATH_END {
            TargetPhase::Expired
        } else if self.hit {
            TargetPhase::Retracting
        } else if self.t < 1.0 {
            TargetPhase::Rising
        } else {
            TargetPhase::Falling
        }
    }

    /// Current position on the path
    pub fn position(&self) -> Vec3 {
        self.waypoints.position_at(self.t)
    }

    /// Rewrite a transformation to place, spin and scale the target
    pub fn apply_to(&self, transformation: &mut Transformation, scale: f32) {
        transformation
            .reset()
            .translate(self.position())
            .rotate(self.spin, Vec3::y())
            .scale(Vec3::repeat(scale));
    }

    /// Backing object in the scene arena
    pub fn object(&self) -> ObjectKey {
        self.object
    }

    /// Picking id of the backing object
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Kind
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Path
    pub fn waypoints(&self) -> &Waypoints {
        &self.waypoints
    }

    /// Path parameter in [0, 2]
    pub fn t(&self) -> f32 {
        self.t
    }

    /// Points awarded on hit
    pub fn points(&self) -> i32 {
        self.points
    }

    /// Whether it has been hit
    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Accumulated spin in radians
    pub fn spin(&self) -> f32 {
        self.spin
    }
}
