//! Running score for a stage.

use serde::{Deserialize, Serialize};

use kerfuffle_core::constants::SCORE_PER_SECOND;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreState {
    /// Banked points. May go negative after early deaths.
    pub points: i64,
    pub enemies_destroyed: u32,
    pub powerups_collected: u32,
    pub boss_parts_destroyed: u32,
    pub deaths: u32,
}

impl ScoreState {
    pub fn award(&mut self, points: i64) {
        self.points += points;
    }

    pub fn deduct(&mut self, points: i64) {
        self.points -= points;
    }

    /// Banked points plus the survival bonus for whole elapsed seconds.
    pub fn display_score(&self, elapsed_secs: f32) -> i64 {
        self.points + elapsed_secs.max(0.0).floor() as i64 * SCORE_PER_SECOND
    }
}
