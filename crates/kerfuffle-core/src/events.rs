//! Events emitted by the stage during a tick, for audio and UI feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StageEvent {
    /// An enemy ship was destroyed by `cause`.
    EnemyDestroyed { position: Vec2, cause: EntityKind },
    /// The player lost a life.
    PlayerHit { lives_remaining: u32 },
    PowerupCollected { kind: PowerupType },
    /// A missile explosion expired and paid its multi-kill bonus.
    MissileBonus { kills: u32, points: i64 },
    BossSpawned,
    BossPhaseChanged { from: BossPhase, to: BossPhase },
    BossPartDestroyed { part: BossPart },
    BossDefeated,
}
