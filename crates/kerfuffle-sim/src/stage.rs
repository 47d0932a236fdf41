//! Stage: the core of the game.
//!
//! `Stage` owns the hecs world, the entity roster and every piece of
//! per-play state. It advances on each externally driven `tick` and returns a
//! `StageSnapshot`. Completely headless, so tests can drive it frame by frame
//! with a controlled clock.

use hecs::{Entity, World};
use log::info;
use serde::{Deserialize, Serialize};

use kerfuffle_boss::BossEncounter;
use kerfuffle_core::commands::PlayerIntent;
use kerfuffle_core::components::{Body, PlayerShip};
use kerfuffle_core::constants::*;
use kerfuffle_core::enums::StageState;
use kerfuffle_core::events::StageEvent;
use kerfuffle_core::level::SpawnQueue;
use kerfuffle_core::state::StageSnapshot;
use kerfuffle_core::types::{SimTime, Viewport};

use crate::roster::Roster;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::cleanup::DespawnBuffer;
use crate::systems::collision::CollisionContext;
use crate::systems::Frame;
use crate::world_setup;

/// Per-stage knobs. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub world_width: f32,
    pub world_height: f32,
    /// Level height at time zero; the boss arrives when it drops below zero.
    pub init_level_height: f32,
    /// Scroll speed in units per second.
    pub ascent_speed: f32,
    pub starting_lives: u32,
    pub starting_missiles: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            init_level_height: INIT_LEVEL_HEIGHT,
            ascent_speed: LEVEL_ASCENT_SPEED,
            starting_lives: STARTING_LIVES,
            starting_missiles: STARTING_MISSILES,
        }
    }
}

impl StageConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.world_width, self.world_height)
    }
}

/// One play-through of the stage.
pub struct Stage {
    config: StageConfig,
    viewport: Viewport,
    world: World,
    roster: Roster,
    time: SimTime,
    state: StageState,
    score: ScoreState,
    level_height: f32,
    boss_spawned: bool,
    spawn_queue: SpawnQueue,
    /// Kept pristine so `reset` can replay the level.
    initial_queue: SpawnQueue,
    despawn_buffer: DespawnBuffer,
    events: Vec<StageEvent>,
}

impl Stage {
    pub fn new(config: StageConfig, spawn_queue: SpawnQueue) -> Self {
        let mut stage = Self {
            viewport: config.viewport(),
            level_height: config.init_level_height,
            config,
            world: World::new(),
            roster: Roster::default(),
            time: SimTime::default(),
            state: StageState::Playing,
            score: ScoreState::default(),
            boss_spawned: false,
            spawn_queue: spawn_queue.clone(),
            initial_queue: spawn_queue,
            despawn_buffer: DespawnBuffer::default(),
            events: Vec::new(),
        };
        stage.populate();
        stage
    }

    /// Discard every live entity and start the level over.
    pub fn reset(&mut self) {
        self.world.clear();
        self.roster.clear();
        self.despawn_buffer.clear();
        self.events.clear();
        self.time = SimTime::default();
        self.state = StageState::Playing;
        self.score = ScoreState::default();
        self.level_height = self.config.init_level_height;
        self.boss_spawned = false;
        self.spawn_queue = self.initial_queue.clone();
        self.populate();
    }

    fn populate(&mut self) {
        world_setup::spawn_player(
            &mut self.world,
            &mut self.roster,
            &self.viewport,
            self.config.starting_lives,
            self.config.starting_missiles,
            self.time.now(),
        );
        info!(
            "stage initialized: {} enemies and {} powerups queued",
            self.spawn_queue.enemies_remaining(),
            self.spawn_queue.powerups_remaining()
        );
    }

    /// Advance the stage by `dt` seconds and return the resulting snapshot.
    /// Once the stage is won or lost this only reports.
    pub fn tick(&mut self, dt: f32, intent: &PlayerIntent) -> StageSnapshot {
        if self.state == StageState::Playing {
            self.run_systems(dt.max(0.0), intent);
        }
        self.snapshot()
    }

    fn run_systems(&mut self, dt: f32, intent: &PlayerIntent) {
        self.time.advance(dt);
        let frame = Frame {
            now: self.time.now(),
            dt,
            viewport: self.viewport,
        };
        self.level_height =
            self.config.init_level_height - frame.now * self.config.ascent_speed;

        // 1. Boss arrival
        if !self.boss_spawned && self.level_height < BOSS_TRIGGER_HEIGHT {
            world_setup::spawn_boss(&mut self.world, &mut self.roster, &self.viewport, frame.now);
            self.boss_spawned = true;
            self.events.push(StageEvent::BossSpawned);
        }

        // 2. Motion
        systems::movement::run(
            &mut self.world,
            &self.roster,
            &frame,
            intent,
            &mut self.despawn_buffer,
            &mut self.events,
        );

        // 3. New projectiles
        systems::firing::run(
            &mut self.world,
            &mut self.roster,
            &frame,
            intent,
            &self.despawn_buffer,
        );

        // 4. Expired explosions
        systems::lifetime::run(
            &self.world,
            &self.roster,
            &frame,
            &mut self.despawn_buffer,
            &mut self.score,
            &mut self.events,
        );

        // 5. Collisions
        systems::collision::run(&mut CollisionContext {
            world: &mut self.world,
            roster: &mut self.roster,
            frame: &frame,
            despawn_buffer: &mut self.despawn_buffer,
            score: &mut self.score,
            events: &mut self.events,
            state: &mut self.state,
        });

        // 6. Spawn queue
        systems::spawner::run(
            &mut self.world,
            &mut self.roster,
            &frame,
            &mut self.spawn_queue,
            self.level_height,
        );

        // 7. Dead entities
        systems::cleanup::run(&mut self.world, &mut self.roster, &mut self.despawn_buffer);
    }

    fn snapshot(&mut self) -> StageSnapshot {
        StageSnapshot {
            time: self.time,
            state: self.state,
            hud: systems::snapshot::hud(
                &self.world,
                &self.roster,
                &self.score,
                self.time.now(),
                self.level_height,
            ),
            entities: systems::snapshot::entity_views(
                &self.world,
                &self.roster,
                self.time.now(),
            ),
            events: std::mem::take(&mut self.events),
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn level_height(&self) -> f32 {
        self.level_height
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    pub fn spawn_queue(&self) -> &SpawnQueue {
        &self.spawn_queue
    }

    /// Read-only view of the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn player(&self) -> Option<Entity> {
        self.roster.player()
    }

    pub fn player_ship(&self) -> Option<PlayerShip> {
        let player = self.roster.player()?;
        self.world.get::<&PlayerShip>(player).ok().map(|ship| (*ship).clone())
    }

    pub fn player_body(&self) -> Option<Body> {
        let player = self.roster.player()?;
        self.world.get::<&Body>(player).ok().map(|body| (*body).clone())
    }

    pub fn boss(&self) -> Option<BossEncounter> {
        let boss = self.roster.boss()?;
        self.world
            .get::<&BossEncounter>(boss)
            .ok()
            .map(|encounter| (*encounter).clone())
    }

    /// Mutable world and roster for scripted scenarios. Anything spawned
    /// here should go through `world_setup::spawn_filed`.
    pub fn world_mut(&mut self) -> (&mut World, &mut Roster) {
        (&mut self.world, &mut self.roster)
    }
}
