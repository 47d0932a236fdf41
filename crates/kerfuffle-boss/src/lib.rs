//! Boss encounter for Space Kerfuffle.
//!
//! Implements the multi-part boss: its phase state machine, per-phase
//! behavior tables, damage model and turret firing.

pub mod behaviors;
pub mod encounter;

pub use encounter::{BossArm, BossCore, BossEncounter, BossFrame, PhaseChange, Turret};
