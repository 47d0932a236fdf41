//! Spawner system: releases queued enemies and powerups once the level has
//! scrolled down to their spawn height.

use hecs::World;
use log::debug;

use kerfuffle_core::level::SpawnQueue;

use super::Frame;
use crate::roster::Roster;
use crate::world_setup::{enemy_bundle, powerup_bundle, spawn_filed};

/// Returns how many entities were spawned.
pub fn run(
    world: &mut World,
    roster: &mut Roster,
    frame: &Frame,
    queue: &mut SpawnQueue,
    level_height: f32,
) -> usize {
    let enemies = queue.pop_due_enemies(level_height);
    let powerups = queue.pop_due_powerups(level_height);

    for spawn in &enemies {
        debug!("enemy spawn at x={:.0} (level y {:.0})", spawn.x, spawn.level_y);
        spawn_filed(world, roster, enemy_bundle(spawn, &frame.viewport, frame.now));
    }
    for spawn in &powerups {
        debug!("powerup {:?} at x={:.0}", spawn.kind, spawn.x);
        spawn_filed(world, roster, powerup_bundle(spawn, &frame.viewport, frame.now));
    }
    enemies.len() + powerups.len()
}
