//! Enumeration types used throughout the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Discriminant of every simulated object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Boss,
    EnemyShip,
    PlayerLaser,
    EnemyLaser,
    Missile,
    Powerup,
    Explosion,
    MissileExplosion,
}

impl EntityKind {
    /// Whether entities of this kind are removed when they leave the viewport.
    pub fn culled_off_screen(self) -> bool {
        !matches!(self, EntityKind::Player | EntityKind::Boss)
    }
}

/// One of the nine discrete headings an enemy can hold during a movement phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    North,
    #[default]
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    Still,
}

impl Compass {
    /// Unit direction for this heading (zero for `Still`). y points up.
    pub fn unit(self) -> Vec2 {
        use std::f32::consts::FRAC_1_SQRT_2 as D;
        match self {
            Compass::North => Vec2::new(0.0, 1.0),
            Compass::South => Vec2::new(0.0, -1.0),
            Compass::East => Vec2::new(1.0, 0.0),
            Compass::West => Vec2::new(-1.0, 0.0),
            Compass::NorthEast => Vec2::new(D, D),
            Compass::NorthWest => Vec2::new(-D, D),
            Compass::SouthEast => Vec2::new(D, -D),
            Compass::SouthWest => Vec2::new(-D, -D),
            Compass::Still => Vec2::ZERO,
        }
    }

    /// Whether the heading has a horizontal component (drives the turning sprite).
    pub fn is_turning(self) -> bool {
        !matches!(self, Compass::North | Compass::South | Compass::Still)
    }

    /// Whether the heading points west-ward (drives horizontal reflection).
    pub fn is_westward(self) -> bool {
        matches!(self, Compass::West | Compass::NorthWest | Compass::SouthWest)
    }
}

/// Named enemy movement pattern, expanded into a heading cycle by `MovementPattern`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementPatternKind {
    /// Straight down, forever.
    #[default]
    Simple,
    SimplePause,
    SimplePauseLong,
    SRight,
    SLeft,
    StrafeSRight,
    StrafeSLeft,
    ZigZagRight,
    ZigZagLeft,
}

/// Length of each movement phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseDuration {
    Short,
    #[default]
    Medium,
    Long,
}

/// Enemy cruising speed class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedClass {
    Slow,
    #[default]
    Medium,
    Fast,
}

/// How an enemy aims and rhythms its shots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FiringPattern {
    /// Straight down, skipping every fourth attempt.
    #[default]
    Simple,
    /// Cycles S, SE, S, SW.
    Spray,
    /// Toward the player's position at the instant of firing.
    Aimed,
    /// Three shots out of every six attempts.
    Burst,
}

/// Enemy fire cadence class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireRate {
    Slow,
    #[default]
    Medium,
    Fast,
}

/// Who fired a laser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserOwner {
    Player,
    Enemy,
}

/// Laser sprite family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaserType {
    Blue,
    Red,
    Pointy,
}

impl LaserType {
    /// Default visual for an owner: blue for the player, red for enemies.
    pub fn default_for(owner: LaserOwner) -> Self {
        match owner {
            LaserOwner::Player => LaserType::Blue,
            LaserOwner::Enemy => LaserType::Red,
        }
    }
}

/// Missile flight stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileStage {
    /// Decelerating sideways away from the ship.
    #[default]
    Lateral,
    /// Accelerating straight up.
    Vertical,
}

/// Powerup effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupType {
    #[default]
    ExtraLife,
    ExtraMissiles,
    ImprovedLasers,
}

/// Player roll state, derived from horizontal motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRoll {
    #[default]
    Neutral,
    RollLeft,
    RollRight,
}

/// Boss encounter phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    /// Descending into view, invulnerable.
    #[default]
    Entrance,
    Phase1,
    Phase2,
    Phase3,
    /// Terminal.
    Dead,
}

/// Boss motion mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossMotion {
    Descend,
    Strafe,
    Center,
    TrackPlayer,
}

/// Arm turret firing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmFiringPattern {
    Alternating,
    Simultaneous,
    None,
}

/// Core turret firing pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreFiringPattern {
    None,
    Simple,
    Aimed,
    Spray,
    Rapid,
}

/// Which boss arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmSide {
    Left,
    Right,
}

impl ArmSide {
    /// -1 for the left arm, +1 for the right arm.
    pub fn sign(self) -> f32 {
        match self {
            ArmSide::Left => -1.0,
            ArmSide::Right => 1.0,
        }
    }
}

/// Top-level stage outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageState {
    #[default]
    Playing,
    Win,
    Lose,
}

/// A destructible boss part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPart {
    LeftArm,
    RightArm,
    Core,
}
