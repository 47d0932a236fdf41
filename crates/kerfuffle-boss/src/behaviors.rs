//! Per-phase boss behavior tables.
//!
//! Each phase cycles through a fixed ordered list of behaviors, advancing
//! every `BOSS_BEHAVIOR_DURATION` seconds.

use log::warn;
use serde::{Deserialize, Serialize};

use kerfuffle_core::constants::*;
use kerfuffle_core::enums::{ArmFiringPattern, BossMotion, BossPhase, CoreFiringPattern};

/// What the boss does for one dwell period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Behavior {
    pub motion: BossMotion,
    pub arm_firing: ArmFiringPattern,
    pub core_firing: CoreFiringPattern,
    pub speed_multiplier: f32,
}

impl Behavior {
    const fn new(
        motion: BossMotion,
        arm_firing: ArmFiringPattern,
        core_firing: CoreFiringPattern,
        speed_multiplier: f32,
    ) -> Self {
        Self {
            motion,
            arm_firing,
            core_firing,
            speed_multiplier,
        }
    }

    pub fn speed(&self) -> f32 {
        BOSS_SPEED * self.speed_multiplier
    }
}

const ENTRANCE_BEHAVIORS: &[Behavior] = &[Behavior::new(
    BossMotion::Descend,
    ArmFiringPattern::None,
    CoreFiringPattern::None,
    BOSS_ENTRANCE_SPEED_MULTIPLIER,
)];

const PHASE_1_BEHAVIORS: &[Behavior] = &[
    Behavior::new(
        BossMotion::Strafe,
        ArmFiringPattern::Alternating,
        CoreFiringPattern::None,
        1.0,
    ),
    Behavior::new(
        BossMotion::TrackPlayer,
        ArmFiringPattern::Simultaneous,
        CoreFiringPattern::Simple,
        1.0,
    ),
];

const PHASE_2_BEHAVIORS: &[Behavior] = &[
    Behavior::new(
        BossMotion::Strafe,
        ArmFiringPattern::Alternating,
        CoreFiringPattern::Aimed,
        1.2,
    ),
    Behavior::new(
        BossMotion::Center,
        ArmFiringPattern::Simultaneous,
        CoreFiringPattern::Spray,
        1.2,
    ),
    Behavior::new(
        BossMotion::TrackPlayer,
        ArmFiringPattern::Simultaneous,
        CoreFiringPattern::Rapid,
        1.2,
    ),
];

const PHASE_3_BEHAVIORS: &[Behavior] = &[
    Behavior::new(
        BossMotion::TrackPlayer,
        ArmFiringPattern::None,
        CoreFiringPattern::Rapid,
        1.8,
    ),
    Behavior::new(
        BossMotion::Center,
        ArmFiringPattern::None,
        CoreFiringPattern::Spray,
        1.8,
    ),
];

/// The behavior cycle for `phase`. `Dead` has none.
pub fn behaviors_for(phase: BossPhase) -> Option<&'static [Behavior]> {
    match phase {
        BossPhase::Entrance => Some(ENTRANCE_BEHAVIORS),
        BossPhase::Phase1 => Some(PHASE_1_BEHAVIORS),
        BossPhase::Phase2 => Some(PHASE_2_BEHAVIORS),
        BossPhase::Phase3 => Some(PHASE_3_BEHAVIORS),
        BossPhase::Dead => {
            warn!("no boss behaviors for phase {phase:?}");
            None
        }
    }
}

/// The behavior the boss enters play with.
pub fn entrance_behavior() -> Behavior {
    ENTRANCE_BEHAVIORS[0]
}

/// Core turret cooldown for a firing pattern. Spray speeds up in the
/// final phase; the rest are phase-independent.
pub fn core_fire_delay(pattern: CoreFiringPattern, phase: BossPhase) -> Option<f32> {
    match pattern {
        CoreFiringPattern::None => None,
        CoreFiringPattern::Simple => Some(BOSS_CORE_FIRE_DELAY_SIMPLE),
        CoreFiringPattern::Aimed => Some(BOSS_CORE_FIRE_DELAY_AIMED),
        CoreFiringPattern::Spray if phase == BossPhase::Phase3 => {
            Some(BOSS_CORE_FIRE_DELAY_SPRAY_FAST)
        }
        CoreFiringPattern::Spray => Some(BOSS_CORE_FIRE_DELAY_SPRAY),
        CoreFiringPattern::Rapid => Some(BOSS_CORE_FIRE_DELAY_RAPID),
    }
}
