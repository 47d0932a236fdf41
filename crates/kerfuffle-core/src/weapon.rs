//! Cooldown gate shared by every weapon in the stage.

use serde::{Deserialize, Serialize};

/// "Ready to fire" gate: a shot is allowed once strictly more than `delay`
/// seconds have passed since the previous one.
///
/// Time is always passed in by the caller (stage seconds), never read from a
/// system clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponTimer {
    delay: f32,
    last_fired: Option<f32>,
}

impl WeaponTimer {
    /// A timer that fires on its first poll.
    pub fn ready(delay: f32) -> Self {
        Self {
            delay,
            last_fired: None,
        }
    }

    /// A timer that behaves as if it had just fired at `now`.
    pub fn primed(delay: f32, now: f32) -> Self {
        Self {
            delay,
            last_fired: Some(now),
        }
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    pub fn set_delay(&mut self, delay: f32) {
        self.delay = delay;
    }

    pub fn last_fired(&self) -> Option<f32> {
        self.last_fired
    }

    /// Seconds since the last shot, or `None` if the timer never fired.
    pub fn since_fired(&self, now: f32) -> Option<f32> {
        self.last_fired.map(|t| now - t)
    }

    pub fn is_ready(&self, now: f32) -> bool {
        match self.last_fired {
            None => true,
            Some(t) => now - t > self.delay,
        }
    }

    /// Fire if ready. Returns whether the shot happened.
    pub fn try_fire(&mut self, now: f32) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_fired = Some(now);
        true
    }

    /// Record a shot at `now` regardless of readiness.
    pub fn mark_fired(&mut self, now: f32) {
        self.last_fired = Some(now);
    }

    /// Forget the last shot so the next poll fires.
    pub fn reset(&mut self) {
        self.last_fired = None;
    }

    /// True within `window` seconds of the last shot (muzzle flash).
    pub fn fired_within(&self, now: f32, window: f32) -> bool {
        self.since_fired(now).map_or(false, |dt| dt < window)
    }
}
