//! Per-frame player input, already reduced from whatever device produced it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerIntent {
    /// Desired movement direction. Lengths above 1 are clamped.
    pub direction: Vec2,
    pub fire_laser: bool,
    pub fire_missile: bool,
}

impl PlayerIntent {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn moving(direction: Vec2) -> Self {
        Self {
            direction,
            ..Self::default()
        }
    }

    pub fn with_laser(mut self) -> Self {
        self.fire_laser = true;
        self
    }

    pub fn with_missile(mut self) -> Self {
        self.fire_missile = true;
        self
    }

    /// Direction with length at most 1.
    pub fn clamped_direction(&self) -> Vec2 {
        if self.direction.is_finite() {
            self.direction.clamp_length_max(1.0)
        } else {
            Vec2::ZERO
        }
    }
}
