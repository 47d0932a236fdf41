//! Boss encounter state machine.
//!
//! The boss is one entity in the stage (a `Body` plus this struct). Its core,
//! arms and turrets are sibling structs owned here and re-positioned from the
//! parent body every frame; the parent body is always passed in explicitly.
//! No ECS dependency.

use glam::Vec2;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use kerfuffle_core::components::Body;
use kerfuffle_core::constants::*;
use kerfuffle_core::enums::*;
use kerfuffle_core::projectile::{spray_heading, LaserShot};
use kerfuffle_core::state::VisualKey;
use kerfuffle_core::types::Viewport;
use kerfuffle_core::weapon::WeaponTimer;

use crate::behaviors::{behaviors_for, core_fire_delay, entrance_behavior, Behavior};

/// Render-only muzzle. Its only state is when it last fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    pub position: Vec2,
    flash: WeaponTimer,
}

impl Turret {
    fn new(position: Vec2) -> Self {
        Self {
            position,
            flash: WeaponTimer::ready(MUZZLE_FLASH_DURATION),
        }
    }

    fn flash(&mut self, now: f32) {
        self.flash.mark_fired(now);
    }

    pub fn is_flashing(&self, now: f32) -> bool {
        self.flash.fired_within(now, MUZZLE_FLASH_DURATION)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCore {
    pub body: Body,
    pub health: i32,
    pub turret: Turret,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossArm {
    pub side: ArmSide,
    pub body: Body,
    pub health: i32,
    /// False once health reaches zero. Inactive arms neither collide nor fire.
    pub active: bool,
    pub turret: Turret,
}

impl BossArm {
    fn new(side: ArmSide, parent: Vec2, now: f32) -> Self {
        let mut arm = Self {
            side,
            body: Body::new(parent, BOSS_ARM_WIDTH, BOSS_ARM_HEIGHT, now),
            health: BOSS_ARM_STARTING_HEALTH,
            active: true,
            turret: Turret::new(parent),
        };
        arm.sync(parent);
        arm
    }

    fn sync(&mut self, parent: Vec2) {
        let sign = self.side.sign();
        self.body.position = parent + Vec2::new(sign * BOSS_ARM_OFFSET, 0.0);
        self.turret.position = parent
            + Vec2::new(sign * BOSS_ARM_TURRET_OFFSET_X, -BOSS_ARM_TURRET_OFFSET_Y);
    }

    pub fn hit(&self, point: Vec2) -> bool {
        self.active && self.body.hit_test(point)
    }

    fn take_damage(&mut self) {
        self.health -= 1;
        self.active = self.health > 0;
    }

    fn fire(&mut self, now: f32) -> Option<LaserShot> {
        if !self.active {
            return None;
        }
        self.turret.flash(now);
        Some(LaserShot::enemy(self.turret.position, Compass::South))
    }
}

/// What the encounter reads from the rest of the stage each frame.
#[derive(Debug, Clone, Copy)]
pub struct BossFrame {
    pub now: f32,
    pub dt: f32,
    pub player_position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub from: BossPhase,
    pub to: BossPhase,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossEncounter {
    phase: BossPhase,
    behavior: Behavior,
    behavior_index: usize,
    behavior_started: f32,
    core: BossCore,
    left_arm: BossArm,
    right_arm: BossArm,
    arm_timer: WeaponTimer,
    core_timer: WeaponTimer,
    viewport: Viewport,
}

impl BossEncounter {
    /// Create the boss at the top-center of the viewport, in `Entrance`.
    pub fn spawn(viewport: Viewport, now: f32) -> (Body, Self) {
        let position = Vec2::new(viewport.center_x(), viewport.height);
        let body = Body::new(position, BOSS_WIDTH, BOSS_HEIGHT, now)
            .with_heading(Compass::South.unit());
        let encounter = Self {
            phase: BossPhase::Entrance,
            behavior: entrance_behavior(),
            behavior_index: 0,
            behavior_started: now,
            core: BossCore {
                body: Body::new(position, BOSS_CORE_WIDTH, BOSS_CORE_HEIGHT, now),
                health: BOSS_CORE_STARTING_HEALTH,
                turret: Turret::new(position),
            },
            left_arm: BossArm::new(ArmSide::Left, position, now),
            right_arm: BossArm::new(ArmSide::Right, position, now),
            arm_timer: WeaponTimer::primed(BOSS_ARM_FIRE_DELAY, now),
            core_timer: WeaponTimer::primed(BOSS_CORE_FIRE_DELAY_SIMPLE, now),
            viewport,
        };
        (body, encounter)
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn is_dead(&self) -> bool {
        self.phase == BossPhase::Dead
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn behavior_index(&self) -> usize {
        self.behavior_index
    }

    pub fn core(&self) -> &BossCore {
        &self.core
    }

    pub fn arm(&self, side: ArmSide) -> &BossArm {
        match side {
            ArmSide::Left => &self.left_arm,
            ArmSide::Right => &self.right_arm,
        }
    }

    pub fn speed(&self) -> f32 {
        self.behavior.speed()
    }

    /// Advance one frame: steer, move, re-seat the parts, then evaluate
    /// phase and behavior transitions. A dead boss does nothing.
    pub fn update(&mut self, body: &mut Body, frame: &BossFrame) -> Option<PhaseChange> {
        if self.is_dead() {
            return None;
        }
        self.update_heading(body, frame);
        body.integrate();
        self.clamp_to_strafe_bounds(body);
        self.sync_parts(body.position);

        let change = self.update_phase(body, frame.now);
        if self.phase != BossPhase::Entrance
            && frame.now - self.behavior_started > BOSS_BEHAVIOR_DURATION
        {
            self.select_behavior(self.behavior_index + 1, frame.now);
        }
        change
    }

    fn update_heading(&mut self, body: &mut Body, frame: &BossFrame) {
        let move_distance = self.speed() * frame.dt;
        match self.behavior.motion {
            BossMotion::Descend => body.heading = Compass::South.unit(),
            BossMotion::Strafe => {
                body.heading.y = 0.0;
                if body.heading.x == 0.0 {
                    body.heading.x = 1.0;
                }
            }
            BossMotion::Center => {
                glide_toward(body, self.viewport.center_x(), move_distance);
            }
            BossMotion::TrackPlayer => {
                glide_toward(body, frame.player_position.x, move_distance);
            }
        }
        body.set_heading_length(move_distance);
    }

    /// Keep the boss (and any attached arm) on screen, bouncing the
    /// horizontal heading when a bound is hit.
    fn clamp_to_strafe_bounds(&self, body: &mut Body) {
        let mut min_x = BOSS_SIDE_SCREEN_OFFSET;
        if self.left_arm.active {
            min_x += BOSS_ARM_WIDTH;
        }
        let mut max_x = self.viewport.width - BOSS_SIDE_SCREEN_OFFSET;
        if self.right_arm.active {
            max_x -= BOSS_ARM_WIDTH;
        }
        if body.position.x < min_x {
            body.position.x = min_x;
            body.heading.x = 1.0;
        } else if body.position.x > max_x {
            body.position.x = max_x;
            body.heading.x = -1.0;
        }
    }

    fn sync_parts(&mut self, parent: Vec2) {
        self.core.body.position = parent;
        self.core.turret.position = parent;
        self.left_arm.sync(parent);
        self.right_arm.sync(parent);
    }

    fn update_phase(&mut self, body: &Body, now: f32) -> Option<PhaseChange> {
        let from = self.phase;
        let entered_y = self.viewport.height - BOSS_HEIGHT / 2.0 - BOSS_TOP_SCREEN_OFFSET;

        if self.phase == BossPhase::Entrance && body.position.y < entered_y {
            self.enter_phase(BossPhase::Phase1, now);
        }
        if self.phase == BossPhase::Phase1
            && self.left_arm.health + self.right_arm.health < BOSS_ARM_STARTING_HEALTH
        {
            self.enter_phase(BossPhase::Phase2, now);
        }
        if self.phase == BossPhase::Phase2 && !self.left_arm.active && !self.right_arm.active {
            self.enter_phase(BossPhase::Phase3, now);
        }

        (self.phase != from).then_some(PhaseChange {
            from,
            to: self.phase,
        })
    }

    fn enter_phase(&mut self, phase: BossPhase, now: f32) {
        info!("boss phase {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.select_behavior(0, now);
    }

    /// Select behavior `index` of the current phase, wrapping past the end.
    fn select_behavior(&mut self, index: usize, now: f32) {
        let Some(behaviors) = behaviors_for(self.phase) else {
            return;
        };
        let index = if index >= behaviors.len() { 0 } else { index };
        self.behavior_index = index;
        self.behavior = behaviors[index];
        self.behavior_started = now;
        debug!(
            "boss behavior {index} in {:?}: {:?}",
            self.phase, self.behavior
        );
    }

    /// Whether `point` touches any live part. The core always collides,
    /// even while it cannot yet be damaged.
    pub fn hit(&self, point: Vec2) -> bool {
        self.core.body.hit_test(point) || self.left_arm.hit(point) || self.right_arm.hit(point)
    }

    /// Apply one point of damage at `point`.
    ///
    /// Arms are checked first (right, then left); the core only takes damage
    /// once both arms are gone. Returns the part destroyed by this hit, if
    /// any. Invulnerable during `Entrance`; a no-op once `Dead`.
    pub fn take_damage(&mut self, point: Vec2) -> Option<BossPart> {
        if matches!(self.phase, BossPhase::Entrance | BossPhase::Dead) {
            return None;
        }
        if self.right_arm.hit(point) {
            self.right_arm.take_damage();
            return (!self.right_arm.active).then_some(BossPart::RightArm);
        }
        if self.left_arm.hit(point) {
            self.left_arm.take_damage();
            return (!self.left_arm.active).then_some(BossPart::LeftArm);
        }
        if self.core.body.hit_test(point) && !self.left_arm.active && !self.right_arm.active {
            self.core.health -= 1;
            if self.core.health <= 0 {
                info!("boss core destroyed in {:?}", self.phase);
                self.phase = BossPhase::Dead;
                return Some(BossPart::Core);
            }
        }
        None
    }

    /// Shots the boss wants to fire this frame.
    pub fn fire(&mut self, frame: &BossFrame) -> Vec<LaserShot> {
        let mut shots = Vec::new();
        if self.is_dead() {
            return shots;
        }
        let now = frame.now;
        let behavior_elapsed = now - self.behavior_started;

        if self.behavior.arm_firing != ArmFiringPattern::None && self.arm_timer.try_fire(now) {
            match self.behavior.arm_firing {
                ArmFiringPattern::Alternating => {
                    let arm = if behavior_elapsed % (BOSS_ARM_FIRE_DELAY * 2.0) < BOSS_ARM_FIRE_DELAY
                    {
                        &mut self.right_arm
                    } else {
                        &mut self.left_arm
                    };
                    shots.extend(arm.fire(now));
                }
                ArmFiringPattern::Simultaneous => {
                    shots.extend(self.right_arm.fire(now));
                    shots.extend(self.left_arm.fire(now));
                }
                ArmFiringPattern::None => {}
            }
        }

        let pattern = self.behavior.core_firing;
        if let Some(delay) = core_fire_delay(pattern, self.phase) {
            self.core_timer.set_delay(delay);
            if self.core_timer.try_fire(now) {
                let origin = self.core.body.position;
                let shot = match pattern {
                    CoreFiringPattern::Simple => Some(LaserShot::enemy(origin, Compass::South)),
                    CoreFiringPattern::Aimed => {
                        Some(LaserShot::aimed(origin, frame.player_position))
                    }
                    CoreFiringPattern::Spray => {
                        let slot = (behavior_elapsed % (delay * 4.0) / delay) as u32;
                        Some(LaserShot::enemy(origin, spray_heading(slot)))
                    }
                    CoreFiringPattern::Rapid => {
                        let period = delay * BOSS_CORE_RAPID_FIRE_PERIOD as f32;
                        let slot = (behavior_elapsed % period / delay) as u32;
                        (slot < BOSS_CORE_RAPID_FIRE_BURST_SIZE)
                            .then(|| LaserShot::enemy(origin, Compass::South))
                    }
                    CoreFiringPattern::None => None,
                };
                if let Some(shot) = shot {
                    self.core.turret.flash(now);
                    shots.push(shot);
                }
            }
        }
        shots
    }

    pub fn visual(&self) -> VisualKey {
        match (self.left_arm.active, self.right_arm.active) {
            (true, true) => VisualKey::BossWhole,
            (false, false) => VisualKey::BossCore,
            _ => VisualKey::BossDamaged,
        }
    }

    /// The damaged sprite shows the left arm missing; mirror it when the
    /// right one is the casualty.
    pub fn reflect_horizontal(&self) -> bool {
        self.left_arm.active && !self.right_arm.active
    }

    /// Core turret plus the turret of every arm still attached.
    pub fn turrets(&self) -> impl Iterator<Item = &Turret> {
        std::iter::once(&self.core.turret).chain(
            [&self.left_arm, &self.right_arm]
                .into_iter()
                .filter(|arm| arm.active)
                .map(|arm| &arm.turret),
        )
    }
}

/// Steer horizontally toward `target_x`, snapping onto it once it is within
/// one frame of travel.
fn glide_toward(body: &mut Body, target_x: f32, move_distance: f32) {
    if (body.position.x - target_x).abs() < move_distance {
        body.position.x = target_x;
        body.heading = Vec2::ZERO;
    } else {
        body.heading = Vec2::new(target_x - body.position.x, 0.0);
    }
}
