//! Entity components stored in the stage's hecs world.
//!
//! Every entity carries an `EntityKind` and a `Body`; the remaining
//! component is the per-kind payload. Payloads are plain data. Behavior
//! lives in the sim systems and the boss crate.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::pattern::MovementPattern;
use crate::types::{rotation_for, Viewport};
use crate::weapon::WeaponTimer;

/// Spatial state shared by every entity.
///
/// `heading` is this frame's displacement: direction × `speed × dt`. It is
/// rescaled once per frame by `set_heading_length` and then applied by
/// `integrate`; nothing else should move `position` during the update pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    pub heading: Vec2,
    /// Degrees, 0 = north. Only maintained when `track_heading` is set.
    pub rotation: f32,
    pub track_heading: bool,
    /// Render size.
    pub width: f32,
    pub height: f32,
    /// Collision size.
    pub hit_width: f32,
    pub hit_height: f32,
    /// Stage time at which the entity entered play.
    pub spawned_at: f32,
}

impl Body {
    /// A stationary body whose hit box matches its render size.
    pub fn new(position: Vec2, width: f32, height: f32, spawned_at: f32) -> Self {
        Self {
            position,
            heading: Vec2::ZERO,
            rotation: 0.0,
            track_heading: false,
            width,
            height,
            hit_width: width,
            hit_height: height,
            spawned_at,
        }
    }

    pub fn with_hit_size(mut self, hit_width: f32, hit_height: f32) -> Self {
        self.hit_width = hit_width;
        self.hit_height = hit_height;
        self
    }

    pub fn with_heading(mut self, heading: Vec2) -> Self {
        self.heading = heading;
        self
    }

    /// Keep `rotation` aligned with the heading on every update.
    pub fn tracking_heading(mut self) -> Self {
        self.track_heading = true;
        if self.heading != Vec2::ZERO {
            self.rotation = rotation_for(self.heading);
        }
        self
    }

    /// Seconds since this entity spawned.
    pub fn age(&self, now: f32) -> f32 {
        now - self.spawned_at
    }

    /// Rescale the heading to `distance`, keeping its direction. A zero
    /// heading stays zero.
    pub fn set_heading_length(&mut self, distance: f32) {
        if self.heading == Vec2::ZERO {
            return;
        }
        self.heading = self.heading.normalize_or_zero() * distance;
        if self.track_heading {
            self.rotation = rotation_for(self.heading);
        }
    }

    /// Apply this frame's heading to the position.
    pub fn integrate(&mut self) {
        self.position += self.heading;
    }

    /// True once the render box has fully left the viewport. The boundary is
    /// inclusive on every side.
    pub fn is_off_screen(&self, viewport: &Viewport) -> bool {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        self.position.x <= -half_w
            || self.position.x >= viewport.width + half_w
            || self.position.y <= -half_h
            || self.position.y >= viewport.height + half_h
    }

    /// Axis-aligned hit box test, exclusive at the edges.
    pub fn hit_test(&self, point: Vec2) -> bool {
        let half_w = self.hit_width / 2.0;
        let half_h = self.hit_height / 2.0;
        point.x > self.position.x - half_w
            && point.x < self.position.x + half_w
            && point.y > self.position.y - half_h
            && point.y < self.position.y + half_h
    }

    /// Circular hit test using half the hit width as radius.
    pub fn hit_test_circle(&self, point: Vec2) -> bool {
        self.position.distance(point) < self.hit_width / 2.0
    }
}

/// The player-controlled ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShip {
    pub lives: u32,
    pub missiles: u32,
    pub improved_lasers: bool,
    /// When improved lasers were last granted.
    pub improved_lasers_at: f32,
    pub invulnerable: bool,
    pub roll: PlayerRoll,
    /// Current speed, scaled by the magnitude of this frame's intent.
    pub speed: f32,
    pub laser_timer: WeaponTimer,
    pub missile_timer: WeaponTimer,
}

impl PlayerShip {
    pub fn new(lives: u32, missiles: u32) -> Self {
        Self {
            lives,
            missiles,
            improved_lasers: false,
            improved_lasers_at: 0.0,
            invulnerable: true,
            roll: PlayerRoll::Neutral,
            speed: 0.0,
            laser_timer: WeaponTimer::ready(PLAYER_LASER_FIRE_DELAY),
            missile_timer: WeaponTimer::ready(PLAYER_MISSILE_FIRE_DELAY),
        }
    }
}

/// An enemy fighter driven by a movement pattern and a firing pattern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyShip {
    pub pattern: MovementPattern,
    pub firing: FiringPattern,
    pub speed: f32,
    pub fire_timer: WeaponTimer,
    /// Incremented on every attempt that passes the fire gate.
    pub shot_count: u32,
}

/// A straight-flying laser bolt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Laser {
    pub owner: LaserOwner,
    pub laser_type: LaserType,
}

impl Laser {
    pub fn speed(&self) -> f32 {
        match self.owner {
            LaserOwner::Player => PLAYER_LASER_SPEED,
            LaserOwner::Enemy => ENEMY_LASER_SPEED,
        }
    }
}

/// A player missile: lateral deceleration, then vertical acceleration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Missile {
    pub stage: MissileStage,
    /// When the vertical stage began.
    pub ascend_at: f32,
}

/// A falling powerup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Powerup {
    pub kind: PowerupType,
}

/// A purely visual explosion that expires after its animation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Explosion;

/// The blast left by a missile. Consumes enemies inside its circular area.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MissileExplosion {
    /// Enemies consumed by the blast itself (not the missile impact).
    pub kills: u32,
}

impl MissileExplosion {
    /// Bonus paid when the blast expires: `kill score × Σ i²` for i = 1..=kills.
    pub fn bonus_points(&self) -> i64 {
        (1..=self.kills as i64)
            .map(|i| SCORE_ENEMY_KILL_ADDITION * i * i)
            .sum()
    }
}
