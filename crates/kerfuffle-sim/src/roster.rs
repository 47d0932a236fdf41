//! Typed entity roster.
//!
//! hecs gives no iteration-order guarantee that survives despawns, so the
//! stage keeps its own ordered bucket of entity ids per `EntityKind`.
//! Collision resolution walks these buckets, which makes its outcome
//! deterministic.

use hecs::{Entity, World};
use log::warn;

use kerfuffle_boss::BossEncounter;
use kerfuffle_core::components::*;
use kerfuffle_core::enums::EntityKind;

use crate::systems::cleanup::DespawnBuffer;

/// Order in which kinds are updated and drawn.
pub const ROSTER_ORDER: [EntityKind; 9] = [
    EntityKind::Player,
    EntityKind::Boss,
    EntityKind::EnemyShip,
    EntityKind::PlayerLaser,
    EntityKind::EnemyLaser,
    EntityKind::Missile,
    EntityKind::Powerup,
    EntityKind::Explosion,
    EntityKind::MissileExplosion,
];

#[derive(Debug, Default)]
pub struct Roster {
    players: Vec<Entity>,
    bosses: Vec<Entity>,
    enemies: Vec<Entity>,
    player_lasers: Vec<Entity>,
    enemy_lasers: Vec<Entity>,
    missiles: Vec<Entity>,
    powerups: Vec<Entity>,
    explosions: Vec<Entity>,
    missile_explosions: Vec<Entity>,
}

impl Roster {
    fn bucket_mut(&mut self, kind: EntityKind) -> &mut Vec<Entity> {
        match kind {
            EntityKind::Player => &mut self.players,
            EntityKind::Boss => &mut self.bosses,
            EntityKind::EnemyShip => &mut self.enemies,
            EntityKind::PlayerLaser => &mut self.player_lasers,
            EntityKind::EnemyLaser => &mut self.enemy_lasers,
            EntityKind::Missile => &mut self.missiles,
            EntityKind::Powerup => &mut self.powerups,
            EntityKind::Explosion => &mut self.explosions,
            EntityKind::MissileExplosion => &mut self.missile_explosions,
        }
    }

    /// Entities of `kind`, oldest first.
    pub fn of(&self, kind: EntityKind) -> &[Entity] {
        match kind {
            EntityKind::Player => &self.players,
            EntityKind::Boss => &self.bosses,
            EntityKind::EnemyShip => &self.enemies,
            EntityKind::PlayerLaser => &self.player_lasers,
            EntityKind::EnemyLaser => &self.enemy_lasers,
            EntityKind::Missile => &self.missiles,
            EntityKind::Powerup => &self.powerups,
            EntityKind::Explosion => &self.explosions,
            EntityKind::MissileExplosion => &self.missile_explosions,
        }
    }

    pub fn player(&self) -> Option<Entity> {
        self.players.first().copied()
    }

    pub fn boss(&self) -> Option<Entity> {
        self.bosses.first().copied()
    }

    /// Every filed entity, in `ROSTER_ORDER`.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, Entity)> + '_ {
        ROSTER_ORDER
            .into_iter()
            .flat_map(move |kind| self.of(kind).iter().map(move |&e| (kind, e)))
    }

    pub fn len(&self) -> usize {
        ROSTER_ORDER.iter().map(|&kind| self.of(kind).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// File `entity` under `kind`.
    ///
    /// The entity must carry that `EntityKind` and the matching payload
    /// component. Anything else is a programming error: it is logged and
    /// the roster is left unchanged.
    pub fn file(&mut self, world: &World, kind: EntityKind, entity: Entity) -> bool {
        let Ok(entity_ref) = world.entity(entity) else {
            warn!("cannot file {entity:?} under {kind:?}: no such entity");
            return false;
        };
        let filed_kind = entity_ref.get::<&EntityKind>().map(|k| *k);
        let payload_ok = entity_ref.has::<Body>()
            && match kind {
                EntityKind::Player => entity_ref.has::<PlayerShip>(),
                EntityKind::Boss => entity_ref.has::<BossEncounter>(),
                EntityKind::EnemyShip => entity_ref.has::<EnemyShip>(),
                EntityKind::PlayerLaser | EntityKind::EnemyLaser => entity_ref.has::<Laser>(),
                EntityKind::Missile => entity_ref.has::<Missile>(),
                EntityKind::Powerup => entity_ref.has::<Powerup>(),
                EntityKind::Explosion => entity_ref.has::<Explosion>(),
                EntityKind::MissileExplosion => entity_ref.has::<MissileExplosion>(),
            };
        if filed_kind != Some(kind) || !payload_ok {
            warn!("refusing to file {entity:?} ({filed_kind:?}) under {kind:?}");
            return false;
        }
        self.bucket_mut(kind).push(entity);
        true
    }

    /// Drop every entity marked for despawn, preserving order.
    pub fn retain_live(&mut self, dead: &DespawnBuffer) {
        for kind in ROSTER_ORDER {
            self.bucket_mut(kind).retain(|e| !dead.contains(*e));
        }
    }

    pub fn clear(&mut self) {
        for kind in ROSTER_ORDER {
            self.bucket_mut(kind).clear();
        }
    }
}
