//! Firing system: collects this frame's new projectiles from the boss, the
//! player and every enemy, in that order, and spawns them.

use glam::Vec2;
use hecs::World;

use kerfuffle_boss::{BossEncounter, BossFrame};
use kerfuffle_core::commands::PlayerIntent;
use kerfuffle_core::components::*;
use kerfuffle_core::enums::*;
use kerfuffle_core::projectile::{self, spray_heading, LaserShot};

use super::cleanup::DespawnBuffer;
use super::{player_position, Frame};
use crate::roster::Roster;
use crate::world_setup::spawn_filed;

pub fn run(
    world: &mut World,
    roster: &mut Roster,
    frame: &Frame,
    intent: &PlayerIntent,
    despawn_buffer: &DespawnBuffer,
) {
    let now = frame.now;
    let target = player_position(world, roster, &frame.viewport);

    // 1. Boss turrets
    if let Some(boss) = roster.boss() {
        let boss_frame = BossFrame {
            now,
            dt: frame.dt,
            player_position: target,
        };
        let shots = match world.query_one_mut::<&mut BossEncounter>(boss) {
            Ok(encounter) => encounter.fire(&boss_frame),
            Err(_) => Vec::new(),
        };
        spawn_lasers(world, roster, &shots, now);
    }

    // 2. Player lasers and missiles
    if let Some(player) = roster.player() {
        let (shots, missiles) = match world.query_one_mut::<(&Body, &mut PlayerShip)>(player) {
            Ok((body, ship)) => player_fire(body, ship, intent, now),
            Err(_) => (Vec::new(), Vec::new()),
        };
        spawn_lasers(world, roster, &shots, now);
        for (origin, side) in missiles {
            spawn_filed(world, roster, projectile::missile(origin, side, now));
        }
    }

    // 3. Enemies, in roster order
    let mut shots = Vec::new();
    for &enemy in roster.of(EntityKind::EnemyShip) {
        if despawn_buffer.contains(enemy) {
            continue;
        }
        if let Ok((body, ship)) = world.query_one_mut::<(&Body, &mut EnemyShip)>(enemy) {
            shots.extend(enemy_fire(ship, body, now, target));
        }
    }
    spawn_lasers(world, roster, &shots, now);
}

fn spawn_lasers(world: &mut World, roster: &mut Roster, shots: &[LaserShot], now: f32) {
    for shot in shots {
        spawn_filed(world, roster, projectile::laser(shot, now));
    }
}

/// Player trigger handling. Missiles need ammo and consume one round per
/// pair launched.
pub fn player_fire(
    body: &Body,
    ship: &mut PlayerShip,
    intent: &PlayerIntent,
    now: f32,
) -> (Vec<LaserShot>, Vec<(Vec2, ArmSide)>) {
    let mut shots = Vec::new();
    let mut missiles = Vec::new();
    if intent.fire_laser && ship.laser_timer.try_fire(now) {
        shots = projectile::player_volley(body.position, ship.improved_lasers);
    }
    if intent.fire_missile && ship.missiles > 0 && ship.missile_timer.try_fire(now) {
        ship.missiles -= 1;
        missiles.push((body.position, ArmSide::Left));
        missiles.push((body.position, ArmSide::Right));
    }
    (shots, missiles)
}

/// One enemy fire attempt.
///
/// Every attempt that passes the cooldown bumps the shot counter, and the
/// counter shapes the rhythm. Simple skips every fourth attempt and Burst
/// fires three of every six. Aimed shots are not predictive.
pub fn enemy_fire(ship: &mut EnemyShip, body: &Body, now: f32, target: Vec2) -> Option<LaserShot> {
    if !ship.fire_timer.try_fire(now) {
        return None;
    }
    ship.shot_count += 1;
    let count = ship.shot_count;
    let origin = body.position - Vec2::new(0.0, body.height / 2.0);
    match ship.firing {
        FiringPattern::Simple if count % 4 == 0 => None,
        FiringPattern::Burst if count % 6 < 3 => None,
        FiringPattern::Simple | FiringPattern::Burst => {
            Some(LaserShot::enemy(origin, Compass::South))
        }
        FiringPattern::Spray => Some(LaserShot::enemy(origin, spray_heading(count))),
        FiringPattern::Aimed => Some(LaserShot::aimed(origin, target)),
    }
}
