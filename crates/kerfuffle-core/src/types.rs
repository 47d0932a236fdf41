//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};

/// Visible world rectangle, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Stage clock. Advanced by the externally supplied frame time, so tests
/// control time exactly by choosing the `dt` they feed in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of frames simulated.
    pub tick: u64,
    /// Seconds since the stage started, accumulated in `f64`.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt.max(0.0));
    }

    /// Seconds elapsed since `timestamp`.
    pub fn since(&self, timestamp: f32) -> f32 {
        (self.elapsed_secs - f64::from(timestamp)) as f32
    }

    /// Stage time narrowed to the `f32` precision entity timestamps use.
    pub fn now(&self) -> f32 {
        self.elapsed_secs as f32
    }
}

/// Sprite rotation (degrees) for something travelling along `heading`, with
/// 0° meaning "pointing north".
pub fn rotation_for(heading: Vec2) -> f32 {
    heading.y.atan2(heading.x).to_degrees() - 90.0
}
