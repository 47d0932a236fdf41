//! Cleanup system: removes every entity marked dead this frame in one pass.

use std::collections::HashSet;

use hecs::{Entity, World};

use crate::roster::Roster;

/// Entities marked for removal during a frame.
///
/// Systems mark instead of despawning so that removal during a scan is
/// well-defined; marked entities are skipped by every later pass.
#[derive(Debug, Default)]
pub struct DespawnBuffer {
    order: Vec<Entity>,
    marked: HashSet<Entity>,
}

impl DespawnBuffer {
    /// Returns false if `entity` was already marked.
    pub fn mark(&mut self, entity: Entity) -> bool {
        if !self.marked.insert(entity) {
            return false;
        }
        self.order.push(entity);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.marked.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.marked.clear();
    }
}

/// Despawn collected entities and drop them from the roster.
pub fn run(world: &mut World, roster: &mut Roster, despawn_buffer: &mut DespawnBuffer) {
    roster.retain_live(despawn_buffer);
    for &entity in &despawn_buffer.order {
        let _ = world.despawn(entity);
    }
    despawn_buffer.clear();
}
