//! Spawn timing and placement

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::foundation::math::Vec3;

use super::target::{TargetKind, Waypoints};

/// Fires once every `interval` seconds of accumulated frame time
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    interval: f32,
    elapsed: f32,
}

impl SpawnTimer {
    /// Timer starting from zero
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    /// Accumulate frame time; returns true and restarts from zero when the interval is reached
    pub fn tick(&mut self, delta_time: f32) -> bool {
        self.elapsed += delta_time;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    /// Seconds accumulated since the last spawn
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds between spawns
    pub fn interval(&self) -> f32 {
        self.interval
    }
}

/// Random spawn placement, seeded once
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: StdRng,
    half_extent: f32,
    burrow_depth: f32,
    apex_height: f32,
    exit_offset: f32,
}

impl Spawner {
    /// Spawner using the configured seed, or entropy when none is set
    pub fn from_config(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            half_extent: config.field_half_extent,
            burrow_depth: config.burrow_depth,
            apex_height: config.apex_height,
            exit_offset: config.exit_offset,
        }
    }

    /// Uniformly random kind
    pub fn pick_kind(&mut self) -> TargetKind {
        if self.rng.gen_bool(0.5) {
            TargetKind::Good
        } else {
            TargetKind::Bad
        }
    }

    /// Uniformly random point on the ground plane within the field
    pub fn pick_ground_position(&mut self) -> Vec3 {
        let h = self.half_extent.abs();
        if h == 0.0 {
            return Vec3::zeros();
        }
        Vec3::new(self.rng.gen_range(-h..=h), 0.0, self.rng.gen_range(-h..=h))
    }

    /// Path for a target of `kind` surfacing at `ground`
    pub fn waypoints(&self, kind: TargetKind, ground: Vec3) -> Waypoints {
        let dx = self.exit_offset * kind.exit_sign();
        Waypoints {
            start: Vec3::new(ground.x, ground.y - self.burrow_depth, ground.z),
            apex: Vec3::new(ground.x + dx * 0.5, ground.y + self.apex_height, ground.z),
            exit: Vec3::new(ground.x + dx, ground.y - self.burrow_depth, ground.z),
        }
    }
}
