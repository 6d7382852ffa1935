//! Whack-a-mole game state
//!
//! Targets surface on a timer, travel a rise/fall path and sink back underground.
//! Clicking one (a hit) scores its points and makes it retract five times faster.
//! Reaching the win score ends the game: nothing spawns and hits stop counting, but
//! targets already on the field finish their paths.

use crate::config::GameConfig;
use crate::foundation::collections::{MaterialKey, ObjectKey, OrderedArena};
use crate::foundation::math::{Vec3, Vec4};
use crate::render::Mesh;
use crate::scene::{DrawableObject, ObjectId};

use super::spawner::{SpawnTimer, Spawner};
use super::target::{GameTarget, TargetKind, TargetPhase};

/// Object arena the game spawns into
pub type ObjectArena = OrderedArena<ObjectKey, DrawableObject>;

/// Game-wide state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Spawning and scoring
    Playing,
    /// Win score reached; terminal
    Finished,
}

/// What a hit request did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// The target was hit and its points applied
    Scored {
        /// Points applied by this hit
        points: i32,
        /// Score after the hit
        score: i32,
    },
    /// The target had already been hit
    AlreadyHit,
    /// No live target has this id
    NotATarget,
    /// The game is over; hits no longer count
    GameOver,
}

/// Mesh, material and tint for one target kind
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAppearance {
    /// Geometry
    pub mesh: Mesh,
    /// Shared material
    pub material: MaterialKey,
    /// Tint
    pub color: Vec4,
}

/// Appearance of both kinds
#[derive(Debug, Clone, PartialEq)]
pub struct TargetAppearances {
    /// Good targets
    pub good: TargetAppearance,
    /// Bad targets
    pub bad: TargetAppearance,
}

impl TargetAppearances {
    /// Same mesh and material for both kinds, green for good and red for bad
    pub fn tinted(mesh: Mesh, material: MaterialKey) -> Self {
        Self {
            good: TargetAppearance {
                mesh: mesh.clone(),
                material,
                color: Vec4::new(0.2, 0.8, 0.2, 1.0),
            },
            bad: TargetAppearance {
                mesh,
                material,
                color: Vec4::new(0.9, 0.15, 0.1, 1.0),
            },
        }
    }

    fn get(&self, kind: TargetKind) -> &TargetAppearance {
        match kind {
            TargetKind::Good => &self.good,
            TargetKind::Bad => &self.bad,
        }
    }
}

/// The mini-game
#[derive(Debug, Clone)]
pub struct WhackGame {
    config: GameConfig,
    appearances: TargetAppearances,
    spawner: Spawner,
    timer: SpawnTimer,
    targets: Vec<GameTarget>,
    score: i32,
    state: GameState,
    spawned: usize,
}

impl WhackGame {
    /// New game in the `Playing` state with score 0
    pub fn new(config: GameConfig, appearances: TargetAppearances) -> Self {
        log::info!(
            "Starting whack-a-mole: spawn every {:.2}s, win at {} points",
            config.spawn_interval,
            config.win_score
        );
        Self {
            spawner: Spawner::from_config(&config),
            timer: SpawnTimer::new(config.spawn_interval),
            config,
            appearances,
            targets: Vec::new(),
            score: 0,
            state: GameState::Playing,
            spawned: 0,
        }
    }

    /// Advance one frame
    ///
    /// Existing targets move first and expired ones are removed together with their
    /// objects; a target spawned this frame starts at the beginning of its path.
    pub fn update(&mut self, delta_time: f32, objects: &mut ObjectArena) {
        let multiplier = self.config.hit_speed_multiplier;
        let spin_speed = self.config.spin_speed;
        let scale = self.config.target_scale;

        self.targets.retain_mut(|target| {
            target.advance(delta_time, multiplier, spin_speed);

            if target.phase() == TargetPhase::Expired {
                objects.remove(target.object());
                log::debug!("Target {} expired (hit: {})", target.id(), target.is_hit());
                return false;
            }

            // The scene may have dropped the object (scene cleared, manual removal)
            match objects.get_mut(target.object()) {
                Some(object) => {
                    target.apply_to(object.transformation_mut(), scale);
                    true
                }
                None => false,
            }
        });

        if self.state == GameState::Playing && self.timer.tick(delta_time) {
            let kind = self.spawner.pick_kind();
            let ground = self.spawner.pick_ground_position();
            self.spawn(kind, ground, objects);
        }
    }

    /// Spawn one target of `kind` surfacing at `ground`
    ///
    /// Returns `None` once the game is finished.
    pub fn spawn(&mut self, kind: TargetKind, ground: Vec3, objects: &mut ObjectArena) -> Option<ObjectId> {
        if self.state == GameState::Finished {
            return None;
        }
        let appearance = self.appearances.get(kind);
        let mut object = DrawableObject::new(appearance.mesh.clone(), appearance.material)
            .with_color(appearance.color);
        let id = object.id();

        let points = match kind {
            TargetKind::Good => self.config.good_points,
            TargetKind::Bad => self.config.bad_points,
        };
        let waypoints = self.spawner.waypoints(kind, ground);
        let target_speed = self.config.target_speed;

        // Key is filled in after insertion; place the object first so it never
        // appears at the origin for a frame.
        let placeholder = GameTarget::new(ObjectKey::default(), id, kind, waypoints, target_speed, points);
        placeholder.apply_to(object.transformation_mut(), self.config.target_scale);
        let key = objects.insert(object);

        self.targets.push(GameTarget::new(key, id, kind, waypoints, target_speed, points));
        self.spawned += 1;
        log::debug!("Spawned {:?} target {} at {:?}", kind, id, ground);
        Some(id)
    }

    /// Register a hit on the object with `id`
    ///
    /// Unknown ids, targets whose object is no longer in `objects`, targets already
    /// hit and hits after the game finished are no-ops.
    pub fn hit_object(&mut self, id: ObjectId, objects: &ObjectArena) -> HitOutcome {
        if self.state == GameState::Finished {
            return HitOutcome::GameOver;
        }

        let Some(target) = self
            .targets
            .iter_mut()
            .find(|t| t.id() == id && objects.contains_key(t.object()))
        else {
            return HitOutcome::NotATarget;
        };
        if !target.mark_hit() {
            return HitOutcome::AlreadyHit;
        }

        let points = target.points();
        self.score += points;
        log::info!("Hit {:?} target {}: {:+} -> score {}", target.kind(), id, points, self.score);

        if self.score >= self.config.win_score {
            self.state = GameState::Finished;
            log::info!("Game finished with score {}", self.score);
        }

        HitOutcome::Scored {
            points,
            score: self.score,
        }
    }

    /// Current score; may be negative
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Playing or finished
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Whether the win score has been reached
    pub fn is_finished(&self) -> bool {
        self.state == GameState::Finished
    }

    /// Live targets
    pub fn targets(&self) -> &[GameTarget] {
        &self.targets
    }

    /// Live target backed by the object with `id`
    pub fn target(&self, id: ObjectId) -> Option<&GameTarget> {
        self.targets.iter().find(|t| t.id() == id)
    }

    /// Targets spawned since the game started
    pub fn spawned_count(&self) -> usize {
        self.spawned
    }

    /// Tuning in effect
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Aabb;
    use approx::assert_relative_eq;

    fn game(config: GameConfig) -> WhackGame {
        let mesh = Mesh::new(7, 6, 36, Aabb::unit());
        WhackGame::new(config, TargetAppearances::tinted(mesh, MaterialKey::default()))
    }

    fn seeded() -> GameConfig {
        GameConfig { seed: Some(11), ..GameConfig::default() }
    }

    #[test]
    fn test_one_spawn_per_interval() {
        let mut game = game(seeded());
        let mut objects = ObjectArena::new();
        let mut spawn_frames = Vec::new();

        for frame in 1..=100 {
            let before = game.spawned_count();
            game.update(0.1, &mut objects);
            if game.spawned_count() > before {
                spawn_frames.push(frame);
            }
        }

        assert!((9..=11).contains(&spawn_frames.len()), "{spawn_frames:?}");
        assert!((9..=11).contains(&spawn_frames[0]));
        for pair in spawn_frames.windows(2) {
            assert!((9..=11).contains(&(pair[1] - pair[0])));
        }
    }

    #[test]
    fn test_new_target_starts_at_spawn_point() {
        let mut game = game(seeded());
        let mut objects = ObjectArena::new();
        let id = game.spawn(TargetKind::Good, Vec3::new(1.0, 0.0, 2.0), &mut objects).unwrap();

        let target = game.target(id).unwrap();
        assert_relative_eq!(target.t(), 0.0);
        assert_relative_eq!(target.position(), target.waypoints().start);
        assert_eq!(target.phase(), TargetPhase::Rising);

        let object = objects.get(target.object()).unwrap();
        assert_eq!(object.id(), id);
        let placed = object.transformation().matrix().column(3).xyz();
        assert_relative_eq!(placed, target.waypoints().start, epsilon = 1e-5);
    }

    #[test]
    fn test_hit_and_bad_hit_score() {
        let mut game = game(seeded());
        let mut objects = ObjectArena::new();
        let good = game.spawn(TargetKind::Good, Vec3::zeros(), &mut objects).unwrap();
        let bad = game.spawn(TargetKind::Bad, Vec3::new(2.0, 0.0, 0.0), &mut objects).unwrap();

        assert_eq!(game.hit_object(good, &objects), HitOutcome::Scored { points: 10, score: 10 });
        game.update(0.1, &mut objects);
        assert_eq!(game.hit_object(bad, &objects), HitOutcome::Scored { points: -50, score: -40 });

        assert_eq!(game.score(), -40);
        assert!(game.targets().iter().all(|t| t.phase() == TargetPhase::Retracting));
    }

    #[test]
    fn test_hit_is_idempotent() {
        let mut game = game(seeded());
        let mut objects = ObjectArena::new();
        let id = game.spawn(TargetKind::Good, Vec3::zeros(), &mut objects).unwrap();

        game.hit_object(id, &objects);
        assert_eq!(game.hit_object(id, &objects), HitOutcome::AlreadyHit);
        assert_eq!(game.score(), 10);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut game = game(seeded());
        let mut objects = ObjectArena::new();
        let stray = DrawableObject::new(Mesh::new(0, 6, 3, Aabb::unit()), MaterialKey::default());
        assert_eq!(game.hit_object(stray.id(), &objects), HitOutcome::NotATarget);
        game.update(0.1, &mut objects);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_expired_targets_are_removed_with_their_objects() {
        let mut game = game(GameConfig { spawn_interval: 1000.0, ..seeded() });
        let mut objects = ObjectArena::new();
        let id = game.spawn(TargetKind::Bad, Vec3::zeros(), &mut objects).unwrap();
        assert_eq!(objects.len(), 1);

        // Default speed 0.5: the full path takes four seconds
        for _ in 0..39 {
            game.update(0.1, &mut objects);
        }
        assert_eq!(objects.len(), 1);
        for _ in 0..2 {
            game.update(0.1, &mut objects);
        }
        assert!(objects.is_empty());
        assert!(game.target(id).is_none());
        assert_eq!(game.hit_object(id, &objects), HitOutcome::NotATarget);
    }

    #[test]
    fn test_hit_target_expires_sooner() {
        let mut game = game(GameConfig { spawn_interval: 1000.0, ..seeded() });
        let mut objects = ObjectArena::new();
        let id = game.spawn(TargetKind::Good, Vec3::zeros(), &mut objects).unwrap();
        game.hit_object(id, &objects);

        // 2.0 / (0.5 * 5) = 0.8 seconds
        for _ in 0..9 {
            game.update(0.1, &mut objects);
        }
        assert!(game.target(id).is_none());
        assert!(objects.is_empty());
    }

    #[test]
    fn test_win_freezes_spawning_and_scoring() {
        let mut game = game(GameConfig { spawn_interval: 0.1, ..seeded() });
        let mut objects = ObjectArena::new();

        let ids: Vec<_> = (0..11)
            .map(|i| game.spawn(TargetKind::Good, Vec3::new(i as f32, 0.0, 0.0), &mut objects).unwrap())
            .collect();
        for id in &ids[..10] {
            game.hit_object(*id, &objects);
        }
        assert_eq!(game.state(), GameState::Finished);
        assert_eq!(game.score(), 100);

        assert_eq!(game.hit_object(ids[10], &objects), HitOutcome::GameOver);
        assert_eq!(game.score(), 100);

        let spawned = game.spawned_count();
        for _ in 0..50 {
            game.update(0.1, &mut objects);
        }
        assert_eq!(game.spawned_count(), spawned);
        assert!(game.is_finished());
    }

    #[test]
    fn test_manual_spawn_after_win_is_refused() {
        let mut game = game(GameConfig { win_score: 10, spawn_interval: 1000.0, ..seeded() });
        let mut objects = ObjectArena::new();
        let id = game.spawn(TargetKind::Good, Vec3::zeros(), &mut objects).unwrap();
        game.hit_object(id, &objects);
        assert!(game.is_finished());

        assert!(game.spawn(TargetKind::Good, Vec3::x(), &mut objects).is_none());
        assert_eq!(game.spawned_count(), 1);
        assert_eq!(objects.len(), 1);
    }

    #[test]
    fn test_hit_on_removed_object_is_ignored() {
        let mut game = game(GameConfig { spawn_interval: 1000.0, ..seeded() });
        let mut objects = ObjectArena::new();
        let id = game.spawn(TargetKind::Good, Vec3::zeros(), &mut objects).unwrap();
        let key = game.target(id).unwrap().object();
        objects.remove(key);

        // The target is still listed until the next update, but no longer scores
        assert!(game.target(id).is_some());
        assert_eq!(game.hit_object(id, &objects), HitOutcome::NotATarget);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_removed_object_drops_target() {
        let mut game = game(GameConfig { spawn_interval: 1000.0, ..seeded() });
        let mut objects = ObjectArena::new();
        let id = game.spawn(TargetKind::Good, Vec3::zeros(), &mut objects).unwrap();
        objects.clear();
        game.update(0.1, &mut objects);
        assert!(game.target(id).is_none());
    }
}
