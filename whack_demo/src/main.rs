//! Headless whack-a-mole demo
//!
//! Drives the scene engine without a window: every preset is built and rendered once,
//! then the whack-a-mole scene is played by a simulated player who clicks at
//! targets through the software stencil buffer.
//!
//! Usage: `whack_demo [config.toml|config.ron]`

mod geometry;

use rand::prelude::*;
use scene_engine::config::{Config, ConfigError, EngineConfig};
use scene_engine::game::{HitOutcome, TargetKind, TargetPhase};
use scene_engine::input::HeadlessTarget;
use scene_engine::render::{RecordingShader, RenderStatus};
use scene_engine::scene::{SceneError, SceneSwitcher, PRESET_COUNT, WHACK_A_MOLE_SCENE_INDEX};
use thiserror::Error;

const VIEWPORT_WIDTH: usize = 320;
const VIEWPORT_HEIGHT: usize = 240;
const FRAME_TIME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 60 * 120;
const CLICK_EVERY_FRAMES: usize = 20;
/// Pixels of aiming error either way
const AIM_JITTER: f32 = 6.0;
/// Chance the player clicks a bad target by mistake
const MISTAKE_RATE: f64 = 0.15;

#[derive(Error, Debug)]
enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

struct Player {
    rng: StdRng,
    clicks: usize,
    hits: usize,
}

impl Player {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        Self { rng, clicks: 0, hits: 0 }
    }

    /// Aim at a visible target and click through the stencil buffer
    fn click(&mut self, switcher: &mut SceneSwitcher, target: &HeadlessTarget) -> Option<HitOutcome> {
        let game = switcher.scene().game()?;
        let candidates: Vec<_> = game
            .targets()
            .iter()
            .filter(|t| !t.is_hit() && t.phase() != TargetPhase::Expired)
            .filter(|t| t.kind() == TargetKind::Good || self.rng.gen_bool(MISTAKE_RATE))
            .map(|t| t.position())
            .collect();
        let aim = candidates.choose(&mut self.rng)?;

        let (x, y, _) = target.project(&aim.push(1.0))?;
        let x = (x + self.rng.gen_range(-AIM_JITTER..=AIM_JITTER)).max(0.0) as usize;
        let y = (y + self.rng.gen_range(-AIM_JITTER..=AIM_JITTER)).max(0.0) as usize;
        self.clicks += 1;

        let Some(id) = switcher.scene().pick_at(target, x, y) else {
            log::debug!("Click at ({}, {}) hit the background", x, y);
            return None;
        };
        let outcome = switcher.scene_mut().hit_object(id);
        if matches!(outcome, HitOutcome::Scored { .. }) {
            self.hits += 1;
        }
        Some(outcome)
    }
}

fn load_config() -> Result<EngineConfig, AppError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading configuration from {}", path);
            Ok(EngineConfig::load_from_file(&path)?)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    let seed = config.game.seed;
    let meshes = geometry::preset_meshes()?;

    let shader = RecordingShader::new();
    let mut switcher = SceneSwitcher::new(meshes, config);
    switcher.scene_mut().attach_shader(Box::new(shader.clone()));
    let mut target = HeadlessTarget::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);

    for index in 0..PRESET_COUNT {
        switcher.load(index)?;
        switcher
            .scene_mut()
            .set_aspect_ratio(VIEWPORT_WIDTH as f32, VIEWPORT_HEIGHT as f32);
        shader.clear();
        if let RenderStatus::Rendered(stats) = switcher.frame(FRAME_TIME, &mut target) {
            log::info!(
                "Scene {}: {} objects drawn, {} lights, {} uniform writes",
                index,
                stats.objects_drawn,
                stats.lights_submitted,
                shader.len()
            );
        }
    }

    // Loading the last preset again is a no-op; make sure whack-a-mole is fresh
    switcher.load(0)?;
    switcher.load(WHACK_A_MOLE_SCENE_INDEX)?;

    let mut player = Player::new(seed);
    for frame in 1..=MAX_FRAMES {
        switcher.frame(FRAME_TIME, &mut target);

        if frame % CLICK_EVERY_FRAMES == 0 {
            if let Some(outcome) = player.click(&mut switcher, &target) {
                log::debug!("Frame {}: {:?}", frame, outcome);
            }
        }

        if switcher.scene().game().is_some_and(|game| game.is_finished()) {
            log::info!("Won after {:.1}s of play", frame as f32 * FRAME_TIME);
            break;
        }
    }

    if let Some(game) = switcher.scene().game() {
        log::info!(
            "Final score {} ({:?}): {} targets spawned, {} clicks, {} hits",
            game.score(),
            game.state(),
            game.spawned_count(),
            player.clicks,
            player.hits
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG still wins over the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting headless whack-a-mole demo");

    match run() {
        Ok(()) => {
            log::info!("Demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Demo failed: {}", e);
            Err(e.into())
        }
    }
}
