//! Read-only projection of the stage world into a `StageSnapshot`.

use hecs::{Entity, World};

use kerfuffle_boss::{BossEncounter, Turret};
use kerfuffle_core::components::*;
use kerfuffle_core::constants::*;
use kerfuffle_core::enums::*;
use kerfuffle_core::state::{EntityView, HudView, VisualKey};

use crate::roster::Roster;
use crate::score::ScoreState;

/// HUD readout for the current frame.
pub fn hud(
    world: &World,
    roster: &Roster,
    score: &ScoreState,
    elapsed_secs: f32,
    level_height: f32,
) -> HudView {
    let mut hud = HudView {
        score: score.points,
        display_score: score.display_score(elapsed_secs),
        level_height,
        ..HudView::default()
    };
    if let Some(ship) = roster
        .player()
        .and_then(|player| world.get::<&PlayerShip>(player).ok())
    {
        hud.lives = ship.lives;
        hud.missiles = ship.missiles;
        hud.improved_lasers = ship.improved_lasers;
    }
    hud.boss_phase = roster
        .boss()
        .and_then(|boss| world.get::<&BossEncounter>(boss).ok())
        .map(|encounter| encounter.phase());
    hud
}

/// Views for every rostered entity, in draw order. The boss contributes its
/// hull followed by one view per turret.
pub fn entity_views(world: &World, roster: &Roster, now: f32) -> Vec<EntityView> {
    let mut views = Vec::with_capacity(roster.len());
    for (kind, entity) in roster.iter() {
        let Ok(body) = world.get::<&Body>(entity) else {
            continue;
        };
        let mut view = base_view(kind, &body, now);
        match kind {
            EntityKind::Player => {
                if let Ok(ship) = world.get::<&PlayerShip>(entity) {
                    dress_player(&mut view, &body, &ship, now);
                }
            }
            EntityKind::EnemyShip => {
                if let Ok(ship) = world.get::<&EnemyShip>(entity) {
                    let heading = ship.pattern.current();
                    let firing = ship.shot_count > 0
                        && ship.fire_timer.fired_within(now, MUZZLE_FLASH_DURATION);
                    view.visual = VisualKey::enemy(heading.is_turning(), firing);
                    view.reflect_horizontal = heading.is_westward();
                }
            }
            EntityKind::PlayerLaser | EntityKind::EnemyLaser => {
                if let Ok(laser) = world.get::<&Laser>(entity) {
                    view.visual = VisualKey::laser(laser.laser_type);
                }
            }
            EntityKind::Powerup => {
                if let Ok(powerup) = world.get::<&Powerup>(entity) {
                    view.visual = VisualKey::powerup(powerup.kind);
                }
            }
            EntityKind::Boss => {
                views.extend(boss_views(world, entity, view, now));
                continue;
            }
            EntityKind::Missile | EntityKind::Explosion | EntityKind::MissileExplosion => {}
        }
        views.push(view);
    }
    views
}

fn base_view(kind: EntityKind, body: &Body, now: f32) -> EntityView {
    let visual = match kind {
        EntityKind::Player => VisualKey::PlayerNeutral,
        EntityKind::Boss => VisualKey::BossWhole,
        EntityKind::EnemyShip => VisualKey::EnemyNeutral,
        EntityKind::PlayerLaser => VisualKey::LaserBlue,
        EntityKind::EnemyLaser => VisualKey::LaserRed,
        EntityKind::Missile => VisualKey::Missile,
        EntityKind::Powerup => VisualKey::PowerupExtraLife,
        EntityKind::Explosion | EntityKind::MissileExplosion => VisualKey::Explosion,
    };
    EntityView {
        kind,
        position: body.position,
        width: body.width,
        height: body.height,
        rotation: body.rotation,
        reflect_horizontal: false,
        visual,
        age_secs: body.age(now),
        visible: true,
    }
}

fn dress_player(view: &mut EntityView, body: &Body, ship: &PlayerShip, now: f32) {
    let firing = ship.laser_timer.fired_within(now, MUZZLE_FLASH_DURATION)
        || ship.missile_timer.fired_within(now, MUZZLE_FLASH_DURATION);
    view.visual = VisualKey::player(ship.roll != PlayerRoll::Neutral, firing);
    view.reflect_horizontal = ship.roll == PlayerRoll::RollLeft;
    // Blink off for every other interval while invulnerable.
    let blink = INVULNERABILITY_BLINK_DURATION;
    view.visible = !(ship.invulnerable && body.age(now) % (blink * 2.0) < blink);
}

fn boss_views(world: &World, boss: Entity, mut hull: EntityView, now: f32) -> Vec<EntityView> {
    let Ok(encounter) = world.get::<&BossEncounter>(boss) else {
        return vec![hull];
    };
    hull.visual = encounter.visual();
    hull.reflect_horizontal = encounter.reflect_horizontal();
    let age_secs = hull.age_secs;
    let mut views = vec![hull];
    views.extend(
        encounter
            .turrets()
            .map(|turret| turret_view(turret, age_secs, now)),
    );
    views
}

fn turret_view(turret: &Turret, age_secs: f32, now: f32) -> EntityView {
    EntityView {
        kind: EntityKind::Boss,
        position: turret.position,
        width: BOSS_TURRET_WIDTH,
        height: BOSS_TURRET_HEIGHT,
        rotation: 0.0,
        reflect_horizontal: false,
        visual: if turret.is_flashing(now) {
            VisualKey::TurretFiring
        } else {
            VisualKey::TurretNeutral
        },
        age_secs,
        visible: true,
    }
}
