//! Entity spawn factories for populating the stage world.
//!
//! Every spawn goes through `spawn_filed`, so an entity is never live in
//! the world without also being filed in the roster.

use glam::Vec2;
use hecs::{Component, Entity, World};
use log::info;

use kerfuffle_boss::BossEncounter;
use kerfuffle_core::components::*;
use kerfuffle_core::constants::*;
use kerfuffle_core::enums::*;
use kerfuffle_core::level::{EnemySpawn, PowerupSpawn};
use kerfuffle_core::pattern::MovementPattern;
use kerfuffle_core::types::Viewport;
use kerfuffle_core::weapon::WeaponTimer;

use crate::roster::Roster;

/// Spawn a `(kind, body, payload)` bundle and file it in the roster.
pub fn spawn_filed<P: Component>(
    world: &mut World,
    roster: &mut Roster,
    bundle: (EntityKind, Body, P),
) -> Entity {
    let kind = bundle.0;
    let entity = world.spawn(bundle);
    roster.file(world, kind, entity);
    entity
}

/// Where the player (re)spawns.
pub fn player_spawn_point(viewport: &Viewport) -> Vec2 {
    Vec2::new(viewport.center_x(), PLAYER_SHIP_HEIGHT)
}

pub fn player_body(viewport: &Viewport, now: f32) -> Body {
    Body::new(
        player_spawn_point(viewport),
        PLAYER_SHIP_WIDTH,
        PLAYER_SHIP_HEIGHT,
        now,
    )
    .with_hit_size(PLAYER_SHIP_HIT_WIDTH, PLAYER_SHIP_HEIGHT)
}

pub fn spawn_player(
    world: &mut World,
    roster: &mut Roster,
    viewport: &Viewport,
    lives: u32,
    missiles: u32,
    now: f32,
) -> Entity {
    spawn_filed(
        world,
        roster,
        (
            EntityKind::Player,
            player_body(viewport, now),
            PlayerShip::new(lives, missiles),
        ),
    )
}

pub fn enemy_speed(speed: SpeedClass) -> f32 {
    match speed {
        SpeedClass::Slow => ENEMY_SPEED_SLOW,
        SpeedClass::Medium => ENEMY_SPEED_MEDIUM,
        SpeedClass::Fast => ENEMY_SPEED_FAST,
    }
}

pub fn enemy_fire_delay(rate: FireRate) -> f32 {
    match rate {
        FireRate::Slow => ENEMY_FIRE_DELAY_SLOW,
        FireRate::Medium => ENEMY_FIRE_DELAY_MEDIUM,
        FireRate::Fast => ENEMY_FIRE_DELAY_FAST,
    }
}

/// Build an enemy entering at the top edge of the viewport.
pub fn enemy_bundle(
    spawn: &EnemySpawn,
    viewport: &Viewport,
    now: f32,
) -> (EntityKind, Body, EnemyShip) {
    let pattern = MovementPattern::from_kind(spawn.pattern, spawn.phase_duration, now);
    let body = Body::new(
        Vec2::new(spawn.x, viewport.height),
        ENEMY_SHIP_WIDTH,
        ENEMY_SHIP_HEIGHT,
        now,
    )
    .with_heading(pattern.current().unit());
    let ship = EnemyShip {
        pattern,
        firing: spawn.firing,
        speed: enemy_speed(spawn.speed),
        fire_timer: WeaponTimer::primed(enemy_fire_delay(spawn.fire_rate), now),
        shot_count: 0,
    };
    (EntityKind::EnemyShip, body, ship)
}

pub fn powerup_bundle(
    spawn: &PowerupSpawn,
    viewport: &Viewport,
    now: f32,
) -> (EntityKind, Body, Powerup) {
    let body = Body::new(
        Vec2::new(spawn.x, viewport.height),
        POWERUP_WIDTH,
        POWERUP_HEIGHT,
        now,
    )
    .with_heading(Compass::South.unit());
    (EntityKind::Powerup, body, Powerup { kind: spawn.kind })
}

pub fn spawn_boss(
    world: &mut World,
    roster: &mut Roster,
    viewport: &Viewport,
    now: f32,
) -> Entity {
    let (body, encounter) = BossEncounter::spawn(*viewport, now);
    info!("boss spawned at ({:.0}, {:.0})", body.position.x, body.position.y);
    spawn_filed(world, roster, (EntityKind::Boss, body, encounter))
}

/// Take a life and put the player back at the spawn point with fresh
/// invulnerability and ready weapons. Missiles are kept. Returns the lives
/// left.
pub fn respawn_player(body: &mut Body, ship: &mut PlayerShip, viewport: &Viewport, now: f32) -> u32 {
    ship.lives = ship.lives.saturating_sub(1);
    *body = player_body(viewport, now);
    ship.invulnerable = true;
    ship.improved_lasers = false;
    ship.roll = PlayerRoll::Neutral;
    ship.speed = 0.0;
    ship.laser_timer.reset();
    ship.missile_timer.reset();
    ship.lives
}

pub fn apply_powerup(ship: &mut PlayerShip, kind: PowerupType, now: f32) {
    match kind {
        PowerupType::ExtraLife => ship.lives += 1,
        PowerupType::ExtraMissiles => ship.missiles += EXTRA_MISSILE_AMMO,
        PowerupType::ImprovedLasers => {
            ship.improved_lasers = true;
            ship.improved_lasers_at = now;
        }
    }
}
