//! Projectile factory: turns firing decisions into spawnable component
//! bundles.
//!
//! Each builder returns an `(EntityKind, Body, payload)` tuple that can be
//! handed straight to `hecs::World::spawn`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::constants::*;
use crate::enums::*;

/// A firing decision: where a laser starts, which way it flies, who owns it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserShot {
    pub origin: Vec2,
    pub direction: Vec2,
    pub owner: LaserOwner,
    pub laser_type: LaserType,
}

impl LaserShot {
    pub fn new(origin: Vec2, direction: Vec2, owner: LaserOwner) -> Self {
        Self {
            origin,
            direction,
            owner,
            laser_type: LaserType::default_for(owner),
        }
    }

    pub fn with_type(mut self, laser_type: LaserType) -> Self {
        self.laser_type = laser_type;
        self
    }

    /// Enemy shot heading along a compass direction.
    pub fn enemy(origin: Vec2, compass: Compass) -> Self {
        Self::new(origin, compass.unit(), LaserOwner::Enemy)
    }

    /// Enemy shot aimed at `target`'s position at the instant of firing.
    pub fn aimed(origin: Vec2, target: Vec2) -> Self {
        Self::new(origin, target - origin, LaserOwner::Enemy).with_type(LaserType::Pointy)
    }

    pub fn kind(&self) -> EntityKind {
        match self.owner {
            LaserOwner::Player => EntityKind::PlayerLaser,
            LaserOwner::Enemy => EntityKind::EnemyLaser,
        }
    }
}

/// Build a laser bolt. A degenerate direction falls back to the owner's
/// default (north for the player, south for enemies).
pub fn laser(shot: &LaserShot, now: f32) -> (EntityKind, Body, Laser) {
    let direction = match shot.direction.try_normalize() {
        Some(d) => d,
        None => match shot.owner {
            LaserOwner::Player => Compass::North.unit(),
            LaserOwner::Enemy => Compass::South.unit(),
        },
    };
    let body = Body::new(shot.origin, LASER_WIDTH, LASER_HEIGHT, now)
        .with_heading(direction)
        .tracking_heading();
    (
        shot.kind(),
        body,
        Laser {
            owner: shot.owner,
            laser_type: shot.laser_type,
        },
    )
}

/// Build a missile leaving `origin` towards one side.
pub fn missile(origin: Vec2, side: ArmSide, now: f32) -> (EntityKind, Body, Missile) {
    let (x, y) = match side {
        ArmSide::Left => MISSILE_LEFT_HEADING,
        ArmSide::Right => MISSILE_RIGHT_HEADING,
    };
    let body = Body::new(origin, MISSILE_WIDTH, MISSILE_HEIGHT, now)
        .with_heading(Vec2::new(x, y))
        .tracking_heading();
    (EntityKind::Missile, body, Missile::default())
}

pub fn explosion(at: Vec2, now: f32) -> (EntityKind, Body, Explosion) {
    (
        EntityKind::Explosion,
        Body::new(at, EXPLOSION_WIDTH, EXPLOSION_HEIGHT, now),
        Explosion,
    )
}

pub fn missile_explosion(at: Vec2, now: f32) -> (EntityKind, Body, MissileExplosion) {
    let body = Body::new(at, MISSILE_EXPLOSION_WIDTH, MISSILE_EXPLOSION_HEIGHT, now)
        .with_hit_size(MISSILE_EXPLOSION_HIT_WIDTH, MISSILE_EXPLOSION_HIT_HEIGHT);
    (EntityKind::MissileExplosion, body, MissileExplosion::default())
}

/// The lasers a single player trigger pull produces.
pub fn player_volley(origin: Vec2, improved: bool) -> Vec<LaserShot> {
    let mut shots = vec![LaserShot::new(
        origin,
        Compass::North.unit(),
        LaserOwner::Player,
    )];
    if improved {
        for (x, y) in [IMPROVED_LASER_LEFT_HEADING, IMPROVED_LASER_RIGHT_HEADING] {
            shots.push(LaserShot::new(origin, Vec2::new(x, y), LaserOwner::Player));
        }
    }
    shots
}

/// Heading for the `step`-th shot of a spray: S, SE, S, SW, repeating.
pub fn spray_heading(step: u32) -> Compass {
    match step % 4 {
        1 => Compass::SouthEast,
        3 => Compass::SouthWest,
        _ => Compass::South,
    }
}
