//! Per-frame motion for every live entity.
//!
//! Each kind sets its heading direction, the heading is rescaled to
//! `speed × dt`, then integrated. Entities that leave the viewport (other
//! than the player and the boss) are marked for despawn.

use glam::Vec2;
use hecs::{Entity, World};

use kerfuffle_boss::{BossEncounter, BossFrame};
use kerfuffle_core::commands::PlayerIntent;
use kerfuffle_core::components::*;
use kerfuffle_core::constants::*;
use kerfuffle_core::enums::*;
use kerfuffle_core::events::StageEvent;

use super::cleanup::DespawnBuffer;
use super::{player_position, Frame};
use crate::roster::Roster;

const CULLED_KINDS: [EntityKind; 7] = [
    EntityKind::EnemyShip,
    EntityKind::PlayerLaser,
    EntityKind::EnemyLaser,
    EntityKind::Missile,
    EntityKind::Powerup,
    EntityKind::Explosion,
    EntityKind::MissileExplosion,
];

pub fn run(
    world: &mut World,
    roster: &Roster,
    frame: &Frame,
    intent: &PlayerIntent,
    despawn_buffer: &mut DespawnBuffer,
    events: &mut Vec<StageEvent>,
) {
    if let Some(player) = roster.player() {
        update_player(world, player, frame, intent);
    }

    if let Some(boss) = roster.boss() {
        let boss_frame = BossFrame {
            now: frame.now,
            dt: frame.dt,
            player_position: player_position(world, roster, &frame.viewport),
        };
        if let Ok((body, encounter)) = world.query_one_mut::<(&mut Body, &mut BossEncounter)>(boss)
        {
            if let Some(change) = encounter.update(body, &boss_frame) {
                events.push(StageEvent::BossPhaseChanged {
                    from: change.from,
                    to: change.to,
                });
            }
        }
    }

    for kind in CULLED_KINDS {
        for &entity in roster.of(kind) {
            if despawn_buffer.contains(entity) {
                continue;
            }
            if let Some(off_screen) = update_entity(world, kind, entity, frame) {
                if off_screen && kind.culled_off_screen() {
                    despawn_buffer.mark(entity);
                }
            }
        }
    }
}

/// Move one non-player, non-boss entity. Returns whether it is now off
/// screen, or `None` if the entity is missing its components.
fn update_entity(world: &mut World, kind: EntityKind, entity: Entity, frame: &Frame) -> Option<bool> {
    let body = match kind {
        EntityKind::EnemyShip => {
            let (body, ship) = world
                .query_one_mut::<(&mut Body, &mut EnemyShip)>(entity)
                .ok()?;
            steer_enemy(body, ship, frame.now);
            advance(body, ship.speed, frame.dt);
            body
        }
        EntityKind::PlayerLaser | EntityKind::EnemyLaser => {
            let (body, laser) = world.query_one_mut::<(&mut Body, &Laser)>(entity).ok()?;
            advance(body, laser.speed(), frame.dt);
            body
        }
        EntityKind::Missile => {
            let (body, missile) = world
                .query_one_mut::<(&mut Body, &mut Missile)>(entity)
                .ok()?;
            let speed = steer_missile(body, missile, frame.now);
            advance(body, speed, frame.dt);
            body
        }
        EntityKind::Powerup => {
            let body = world.query_one_mut::<&mut Body>(entity).ok()?;
            advance(body, POWERUP_SPEED, frame.dt);
            body
        }
        // Explosions are stationary; they only need the off-screen check.
        EntityKind::Explosion | EntityKind::MissileExplosion => {
            world.query_one_mut::<&mut Body>(entity).ok()?
        }
        EntityKind::Player | EntityKind::Boss => return None,
    };
    Some(body.is_off_screen(&frame.viewport))
}

/// Rescale the heading to this frame's travel and integrate.
fn advance(body: &mut Body, speed: f32, dt: f32) {
    body.set_heading_length(speed * dt);
    body.integrate();
}

pub fn steer_enemy(body: &mut Body, ship: &mut EnemyShip, now: f32) {
    ship.pattern.update(now);
    body.heading = ship.pattern.current().unit();
}

/// Switch to the vertical stage once the lateral phase is over. Returns
/// the missile's speed for this frame.
pub fn steer_missile(body: &mut Body, missile: &mut Missile, now: f32) -> f32 {
    let age = body.age(now);
    if missile.stage == MissileStage::Lateral && age > MISSILE_LATERAL_MOTION_TIME {
        body.heading = Compass::North.unit();
        missile.stage = MissileStage::Vertical;
        missile.ascend_at = now;
    }
    match missile.stage {
        MissileStage::Lateral => MISSILE_INITIAL_LATERAL_SPEED - age * MISSILE_LATERAL_DECAY_FACTOR,
        MissileStage::Vertical => {
            MISSILE_INITIAL_LATERAL_SPEED / 4.0
                + (now - missile.ascend_at) * MISSILE_ACCEL_FACTOR * MISSILE_ACCEL_FACTOR
        }
    }
}

fn update_player(world: &mut World, entity: Entity, frame: &Frame, intent: &PlayerIntent) {
    let Ok((body, ship)) = world.query_one_mut::<(&mut Body, &mut PlayerShip)>(entity) else {
        return;
    };
    let direction = intent.clamped_direction();
    ship.speed = PLAYER_SHIP_SPEED * direction.length();
    body.heading = direction;
    advance(body, ship.speed, frame.dt);

    ship.roll = if body.heading.x < 0.0 {
        PlayerRoll::RollLeft
    } else if body.heading.x > 0.0 {
        PlayerRoll::RollRight
    } else {
        PlayerRoll::Neutral
    };

    if ship.invulnerable {
        ship.invulnerable = body.age(frame.now) < RESPAWN_INVULNERABILITY_DURATION;
    }

    let half = Vec2::new(body.width / 2.0, body.height / 2.0);
    let max = Vec2::new(frame.viewport.width, frame.viewport.height) - half;
    body.position = body.position.clamp(half, max.max(half));

    if ship.improved_lasers && frame.now - ship.improved_lasers_at > IMPROVED_LASER_DURATION {
        ship.improved_lasers = false;
    }
}
