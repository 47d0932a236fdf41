//! Enemy movement patterns: short cyclic sequences of compass headings,
//! each held for a fixed phase duration.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Compass, MovementPatternKind, PhaseDuration};

use Compass::*;

const SIMPLE: &[Compass] = &[South];
const SIMPLE_PAUSE: &[Compass] = &[South, Still];
const SIMPLE_PAUSE_LONG: &[Compass] = &[South, Still, Still];
const S_RIGHT: &[Compass] = &[South, East, South, West];
const S_LEFT: &[Compass] = &[South, West, South, East];
const STRAFE_S_RIGHT: &[Compass] = &[South, East, West, East, South, West, East, West];
const STRAFE_S_LEFT: &[Compass] = &[South, West, East, West, South, East, West, East];
const ZIG_ZAG_RIGHT: &[Compass] = &[SouthEast, SouthWest];
const ZIG_ZAG_LEFT: &[Compass] = &[SouthWest, SouthEast];

/// Heading cycle for a named pattern.
pub fn sequence_for(kind: MovementPatternKind) -> &'static [Compass] {
    match kind {
        MovementPatternKind::Simple => SIMPLE,
        MovementPatternKind::SimplePause => SIMPLE_PAUSE,
        MovementPatternKind::SimplePauseLong => SIMPLE_PAUSE_LONG,
        MovementPatternKind::SRight => S_RIGHT,
        MovementPatternKind::SLeft => S_LEFT,
        MovementPatternKind::StrafeSRight => STRAFE_S_RIGHT,
        MovementPatternKind::StrafeSLeft => STRAFE_S_LEFT,
        MovementPatternKind::ZigZagRight => ZIG_ZAG_RIGHT,
        MovementPatternKind::ZigZagLeft => ZIG_ZAG_LEFT,
    }
}

pub fn phase_seconds(duration: PhaseDuration) -> f32 {
    match duration {
        PhaseDuration::Short => ENEMY_PHASE_DURATION_SHORT,
        PhaseDuration::Medium => ENEMY_PHASE_DURATION_MEDIUM,
        PhaseDuration::Long => ENEMY_PHASE_DURATION_LONG,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementPattern {
    sequence: Vec<Compass>,
    index: usize,
    /// Seconds each heading is held. Zero holds the first heading forever.
    phase_duration: f32,
    phase_started: f32,
}

impl MovementPattern {
    /// An empty sequence is treated as straight down.
    pub fn new(sequence: Vec<Compass>, phase_duration: f32, now: f32) -> Self {
        let sequence = if sequence.is_empty() {
            SIMPLE.to_vec()
        } else {
            sequence
        };
        Self {
            sequence,
            index: 0,
            phase_duration: phase_duration.max(0.0),
            phase_started: now,
        }
    }

    pub fn from_kind(kind: MovementPatternKind, duration: PhaseDuration, now: f32) -> Self {
        let seconds = match kind {
            MovementPatternKind::Simple => 0.0,
            _ => phase_seconds(duration),
        };
        Self::new(sequence_for(kind).to_vec(), seconds, now)
    }

    /// Advance through every phase boundary crossed by `now`.
    ///
    /// Phase start moves forward by whole durations, so the index depends
    /// only on elapsed time and not on how the frames were sliced.
    pub fn update(&mut self, now: f32) {
        if self.phase_duration <= 0.0 {
            return;
        }
        while now - self.phase_started > self.phase_duration {
            self.phase_started += self.phase_duration;
            self.index = (self.index + 1) % self.sequence.len();
        }
    }

    pub fn current(&self) -> Compass {
        self.sequence[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn phase_duration(&self) -> f32 {
        self.phase_duration
    }
}
