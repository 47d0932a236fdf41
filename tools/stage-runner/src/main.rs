//! stage-runner: play a level headlessly with a scripted autopilot.
//!
//! Usage:
//!   stage-runner levels/stage1.json
//!   stage-runner levels/stage1.json --config tuning.json --seconds 180 --fps 60

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use glam::Vec2;
use log::{debug, error, info};

use kerfuffle_core::commands::PlayerIntent;
use kerfuffle_core::enums::{EntityKind, StageState};
use kerfuffle_core::events::StageEvent;
use kerfuffle_core::level::load_level;
use kerfuffle_core::state::StageSnapshot;
use kerfuffle_sim::{Stage, StageConfig};

#[derive(Parser)]
#[command(version, about = "Run a Space Kerfuffle stage headlessly and report the outcome.")]
struct Cli {
    /// Level JSON exported from Tiled.
    level: PathBuf,

    /// Stage configuration JSON. Missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Give up after this many stage seconds.
    #[arg(long, default_value_t = 180.0)]
    seconds: f32,

    /// Fixed frame rate used to step the stage.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => read_config(path).unwrap_or_else(|err| {
            error!("failed to read config {}: {err}", path.display());
            process::exit(1);
        }),
        None => StageConfig::default(),
    };
    let queue = load_level(&cli.level).unwrap_or_else(|err| {
        error!("failed to load level {}: {err}", cli.level.display());
        process::exit(1);
    });

    let dt = 1.0 / cli.fps.max(1) as f32;
    let frames = (cli.seconds.max(0.0) / dt).ceil() as u64;
    info!(
        "running {} for up to {:.0}s at {} fps",
        cli.level.display(),
        cli.seconds,
        cli.fps
    );

    let mut stage = Stage::new(config, queue);
    let mut snapshot = StageSnapshot::default();
    for _ in 0..frames {
        let intent = autopilot(&snapshot);
        snapshot = stage.tick(dt, &intent);
        for event in &snapshot.events {
            log_event(snapshot.time.now(), event);
        }
        if snapshot.state != StageState::Playing {
            break;
        }
    }

    let score = stage.score();
    println!("outcome:          {:?}", snapshot.state);
    println!("stage time:       {:.2}s ({} frames)", snapshot.time.elapsed_secs, snapshot.time.tick);
    println!("score:            {}", score.points);
    println!("display score:    {}", snapshot.hud.display_score);
    println!("enemies:          {}", score.enemies_destroyed);
    println!("powerups:         {}", score.powerups_collected);
    println!("boss parts:       {}", score.boss_parts_destroyed);
    println!("deaths:           {}", score.deaths);
    println!("lives left:       {}", snapshot.hud.lives);
}

fn read_config(path: &Path) -> Result<StageConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Line up under the lowest threat and keep the trigger held. Missiles go
/// out when the screen gets crowded or the boss is up.
fn autopilot(snapshot: &StageSnapshot) -> PlayerIntent {
    let Some(player) = snapshot
        .entities
        .iter()
        .find(|view| view.kind == EntityKind::Player)
    else {
        return PlayerIntent::idle();
    };

    let target = snapshot
        .entities
        .iter()
        .filter(|view| matches!(view.kind, EntityKind::EnemyShip | EntityKind::Boss))
        .min_by(|a, b| a.position.y.total_cmp(&b.position.y));

    let direction = match target {
        Some(view) => {
            let dx = view.position.x - player.position.x;
            Vec2::new((dx / 40.0).clamp(-1.0, 1.0), 0.0)
        }
        None => Vec2::ZERO,
    };

    let mut intent = PlayerIntent::moving(direction).with_laser();
    let crowded = snapshot.count(EntityKind::EnemyShip) >= 3;
    if crowded || snapshot.hud.boss_phase.is_some() {
        intent = intent.with_missile();
    }
    intent
}

fn log_event(at: f32, event: &StageEvent) {
    match event {
        StageEvent::EnemyDestroyed { .. } | StageEvent::PowerupCollected { .. } => {
            debug!("[{at:7.2}] {event:?}");
        }
        _ => info!("[{at:7.2}] {event:?}"),
    }
}
