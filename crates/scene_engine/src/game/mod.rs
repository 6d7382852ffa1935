//! Whack-a-mole mini-game layered on the scene graph

pub mod spawner;
pub mod target;
pub mod whack;

pub use spawner::{SpawnTimer, Spawner};
pub use target::{GameTarget, TargetKind, TargetPhase, Waypoints, PATH_END};
pub use whack::{GameState, HitOutcome, ObjectArena, TargetAppearance, TargetAppearances, WhackGame};
