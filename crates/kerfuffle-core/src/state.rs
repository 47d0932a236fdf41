//! Stage snapshot: everything a render/HUD sink needs after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::StageEvent;
use crate::types::SimTime;

/// Complete visible state produced by every `Stage::tick`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageSnapshot {
    pub time: SimTime,
    pub state: StageState,
    pub hud: HudView,
    pub entities: Vec<EntityView>,
    pub events: Vec<StageEvent>,
}

impl StageSnapshot {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: i64,
    /// Score plus the survival bonus for elapsed whole seconds.
    pub display_score: i64,
    pub lives: u32,
    pub missiles: u32,
    pub improved_lasers: bool,
    pub level_height: f32,
    pub boss_phase: Option<BossPhase>,
}

/// One drawable thing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    /// Degrees, 0 = north.
    pub rotation: f32,
    pub reflect_horizontal: bool,
    pub visual: VisualKey,
    /// Seconds since spawn, for animation frame selection.
    pub age_secs: f32,
    /// False on invulnerability blink-off frames.
    pub visible: bool,
}

/// Which sprite the render sink should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualKey {
    PlayerNeutral,
    PlayerFiring,
    PlayerTurning,
    PlayerTurningFiring,
    EnemyNeutral,
    EnemyFiring,
    EnemyTurning,
    EnemyTurningFiring,
    BossWhole,
    /// Boss with one or both arms blown off.
    BossDamaged,
    BossCore,
    TurretNeutral,
    TurretFiring,
    LaserBlue,
    LaserRed,
    LaserPointy,
    Missile,
    PowerupExtraLife,
    PowerupMissileAmmo,
    PowerupImprovedLasers,
    Explosion,
}

impl VisualKey {
    pub fn player(turning: bool, firing: bool) -> Self {
        match (turning, firing) {
            (false, false) => VisualKey::PlayerNeutral,
            (false, true) => VisualKey::PlayerFiring,
            (true, false) => VisualKey::PlayerTurning,
            (true, true) => VisualKey::PlayerTurningFiring,
        }
    }

    pub fn enemy(turning: bool, firing: bool) -> Self {
        match (turning, firing) {
            (false, false) => VisualKey::EnemyNeutral,
            (false, true) => VisualKey::EnemyFiring,
            (true, false) => VisualKey::EnemyTurning,
            (true, true) => VisualKey::EnemyTurningFiring,
        }
    }

    pub fn laser(laser_type: LaserType) -> Self {
        match laser_type {
            LaserType::Blue => VisualKey::LaserBlue,
            LaserType::Red => VisualKey::LaserRed,
            LaserType::Pointy => VisualKey::LaserPointy,
        }
    }

    pub fn powerup(kind: PowerupType) -> Self {
        match kind {
            PowerupType::ExtraLife => VisualKey::PowerupExtraLife,
            PowerupType::ExtraMissiles => VisualKey::PowerupMissileAmmo,
            PowerupType::ImprovedLasers => VisualKey::PowerupImprovedLasers,
        }
    }
}
