//! Lifetime system: ages out finished explosions.
//!
//! A missile explosion pays its multi-kill bonus when it expires.

use hecs::World;

use kerfuffle_core::components::{Body, MissileExplosion};
use kerfuffle_core::constants::EXPLOSION_DURATION;
use kerfuffle_core::enums::EntityKind;
use kerfuffle_core::events::StageEvent;

use super::cleanup::DespawnBuffer;
use super::Frame;
use crate::roster::Roster;
use crate::score::ScoreState;

pub fn run(
    world: &World,
    roster: &Roster,
    frame: &Frame,
    despawn_buffer: &mut DespawnBuffer,
    score: &mut ScoreState,
    events: &mut Vec<StageEvent>,
) {
    for &entity in roster.of(EntityKind::Explosion) {
        let expired = world
            .get::<&Body>(entity)
            .map_or(false, |body| body.age(frame.now) >= EXPLOSION_DURATION);
        if expired && !despawn_buffer.contains(entity) {
            despawn_buffer.mark(entity);
        }
    }

    for &entity in roster.of(EntityKind::MissileExplosion) {
        if despawn_buffer.contains(entity) {
            continue;
        }
        let Ok(mut query) = world.query_one::<(&Body, &MissileExplosion)>(entity) else {
            continue;
        };
        let Some((body, blast)) = query.get() else {
            continue;
        };
        if body.age(frame.now) < EXPLOSION_DURATION {
            continue;
        }
        despawn_buffer.mark(entity);
        if blast.kills > 0 {
            let points = blast.bonus_points();
            score.award(points);
            events.push(StageEvent::MissileBonus {
                kills: blast.kills,
                points,
            });
        }
    }
}
