//! Stage simulation for Space Kerfuffle.
//!
//! Owns the hecs ECS world, runs the ordered per-frame systems and produces
//! `StageSnapshot`s for a render sink.

pub mod roster;
pub mod score;
pub mod stage;
pub mod systems;
pub mod world_setup;

pub use kerfuffle_core as core;
pub use stage::{Stage, StageConfig};

#[cfg(test)]
mod tests;
