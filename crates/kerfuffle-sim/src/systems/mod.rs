//! Systems that operate on the stage world each frame.
//!
//! Systems are free functions over `&mut World` plus the roster. They hold
//! no state of their own; everything lives in components or on the `Stage`.

pub mod cleanup;
pub mod collision;
pub mod firing;
pub mod lifetime;
pub mod movement;
pub mod snapshot;
pub mod spawner;

use glam::Vec2;
use hecs::World;

use kerfuffle_core::components::Body;
use kerfuffle_core::types::Viewport;

use crate::roster::Roster;
use crate::world_setup::player_spawn_point;

/// Timing shared by every system during one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Stage seconds at the end of this frame.
    pub now: f32,
    pub dt: f32,
    pub viewport: Viewport,
}

/// Current player position, or the spawn point if the player is missing.
pub fn player_position(world: &World, roster: &Roster, viewport: &Viewport) -> Vec2 {
    roster
        .player()
        .and_then(|player| world.get::<&Body>(player).ok().map(|body| body.position))
        .unwrap_or_else(|| player_spawn_point(viewport))
}
