//! Spawn records, the height-ordered spawn queue, and level-file loading.
//!
//! Level files are Tiled-style JSON maps. Layer 1 holds enemy objects and
//! layer 2 holds powerup objects; each object's `y` is the level height at
//! which it enters play. Unrecognized property strings never fail the load,
//! they fall back to a default variant and log a warning.

use std::collections::HashMap;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::*;

const ENEMY_LAYER_INDEX: usize = 1;
const POWERUP_LAYER_INDEX: usize = 2;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level has no layer at index {0}")]
    MissingLayer(usize),
}

/// One enemy waiting to enter play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub x: f32,
    /// Level height at which this enemy appears.
    pub level_y: f32,
    pub pattern: MovementPatternKind,
    pub phase_duration: PhaseDuration,
    pub speed: SpeedClass,
    pub firing: FiringPattern,
    pub fire_rate: FireRate,
}

impl EnemySpawn {
    /// A straight-down, medium-everything enemy.
    pub fn basic(x: f32, level_y: f32) -> Self {
        Self {
            x,
            level_y,
            pattern: MovementPatternKind::default(),
            phase_duration: PhaseDuration::default(),
            speed: SpeedClass::default(),
            firing: FiringPattern::default(),
            fire_rate: FireRate::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerupSpawn {
    pub x: f32,
    pub level_y: f32,
    pub kind: PowerupType,
}

/// Pending spawns, ordered so the next one due sits at the tail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnQueue {
    enemies: Vec<EnemySpawn>,
    powerups: Vec<PowerupSpawn>,
}

impl SpawnQueue {
    pub fn new(mut enemies: Vec<EnemySpawn>, mut powerups: Vec<PowerupSpawn>) -> Self {
        enemies.sort_by(|a, b| a.level_y.total_cmp(&b.level_y));
        powerups.sort_by(|a, b| a.level_y.total_cmp(&b.level_y));
        Self { enemies, powerups }
    }

    /// Remove and return every enemy whose height the level has reached.
    pub fn pop_due_enemies(&mut self, level_height: f32) -> Vec<EnemySpawn> {
        let mut due = Vec::new();
        while let Some(next) = self.enemies.last() {
            if next.level_y < level_height {
                break;
            }
            due.extend(self.enemies.pop());
        }
        due
    }

    pub fn pop_due_powerups(&mut self, level_height: f32) -> Vec<PowerupSpawn> {
        let mut due = Vec::new();
        while let Some(next) = self.powerups.last() {
            if next.level_y < level_height {
                break;
            }
            due.extend(self.powerups.pop());
        }
        due
    }

    pub fn enemies_remaining(&self) -> usize {
        self.enemies.len()
    }

    pub fn powerups_remaining(&self) -> usize {
        self.powerups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty() && self.powerups.is_empty()
    }
}

// --- Level file format ---

#[derive(Debug, Deserialize)]
struct LevelFile {
    layers: Vec<LevelLayer>,
}

#[derive(Debug, Default, Deserialize)]
struct LevelLayer {
    #[serde(default)]
    objects: Vec<LevelObject>,
}

#[derive(Debug, Deserialize)]
struct LevelObject {
    x: f32,
    y: f32,
    #[serde(default)]
    properties: HashMap<String, serde_json::Value>,
}

impl LevelObject {
    /// Look up `key` in a string table, falling back to `fallback`.
    fn property<T: Copy>(&self, key: &str, table: &[(&str, T)], fallback: T) -> T {
        let Some(raw) = self.properties.get(key).and_then(|v| v.as_str()) else {
            warn!("level object at ({}, {}) missing '{key}', using default", self.x, self.y);
            return fallback;
        };
        match table.iter().find(|(name, _)| *name == raw) {
            Some((_, value)) => *value,
            None => {
                warn!("unrecognized {key} '{raw}', using default");
                fallback
            }
        }
    }

    fn to_enemy(&self) -> EnemySpawn {
        EnemySpawn {
            x: self.x,
            level_y: self.y,
            pattern: self.property(
                "move-pattern",
                &[
                    ("simple", MovementPatternKind::Simple),
                    ("simple-pause", MovementPatternKind::SimplePause),
                    ("simple-pause-long", MovementPatternKind::SimplePauseLong),
                    ("s-right", MovementPatternKind::SRight),
                    ("s-left", MovementPatternKind::SLeft),
                    ("strafe-s-right", MovementPatternKind::StrafeSRight),
                    ("strafe-s-left", MovementPatternKind::StrafeSLeft),
                    ("zig-zag-right", MovementPatternKind::ZigZagRight),
                    ("zig-zag-left", MovementPatternKind::ZigZagLeft),
                ],
                MovementPatternKind::Simple,
            ),
            phase_duration: self.property(
                "phase-duration",
                &[
                    ("short", PhaseDuration::Short),
                    ("medium", PhaseDuration::Medium),
                    ("long", PhaseDuration::Long),
                ],
                PhaseDuration::Medium,
            ),
            speed: self.property(
                "speed",
                &[
                    ("slow", SpeedClass::Slow),
                    ("medium", SpeedClass::Medium),
                    ("fast", SpeedClass::Fast),
                ],
                SpeedClass::Medium,
            ),
            firing: self.property(
                "firing-pattern",
                &[
                    ("simple", FiringPattern::Simple),
                    ("spray", FiringPattern::Spray),
                    ("homing", FiringPattern::Aimed),
                    ("burst", FiringPattern::Burst),
                ],
                FiringPattern::Simple,
            ),
            fire_rate: self.property(
                "fire-rate",
                &[
                    ("slow", FireRate::Slow),
                    ("medium", FireRate::Medium),
                    ("fast", FireRate::Fast),
                ],
                FireRate::Medium,
            ),
        }
    }

    fn to_powerup(&self) -> PowerupSpawn {
        PowerupSpawn {
            x: self.x,
            level_y: self.y,
            kind: self.property(
                "powerup-type",
                &[
                    ("extra-life", PowerupType::ExtraLife),
                    ("extra-missiles", PowerupType::ExtraMissiles),
                    ("improved-lasers", PowerupType::ImprovedLasers),
                ],
                PowerupType::ExtraLife,
            ),
        }
    }
}

/// Parse level JSON into a spawn queue.
pub fn parse_level(json: &str) -> Result<SpawnQueue, LevelError> {
    let file: LevelFile = serde_json::from_str(json)?;
    let layer = |index: usize| file.layers.get(index).ok_or(LevelError::MissingLayer(index));

    let enemies = layer(ENEMY_LAYER_INDEX)?
        .objects
        .iter()
        .map(LevelObject::to_enemy)
        .collect();
    let powerups = layer(POWERUP_LAYER_INDEX)?
        .objects
        .iter()
        .map(LevelObject::to_powerup)
        .collect();

    Ok(SpawnQueue::new(enemies, powerups))
}

/// Read and parse a level file from disk.
pub fn load_level(path: impl AsRef<Path>) -> Result<SpawnQueue, LevelError> {
    let json = std::fs::read_to_string(path)?;
    parse_level(&json)
}
