//! Core types and definitions for the Space Kerfuffle stage simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! constants, enums, entity components, weapon timing, enemy movement
//! patterns, the projectile factory, spawn data, commands, events and
//! snapshots. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod level;
pub mod pattern;
pub mod projectile;
pub mod state;
pub mod types;
pub mod weapon;
