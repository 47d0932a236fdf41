//! Gameplay constants and tuning parameters.
//!
//! All distances are in world units (the logical 480×640 playfield), all
//! speeds in units per second and all durations in seconds. The y axis
//! points up: the player sits near y = 0 and the boss enters from the top.

// --- World bounds ---

/// Logical playfield width.
pub const WORLD_WIDTH: f32 = 480.0;

/// Logical playfield height.
pub const WORLD_HEIGHT: f32 = 640.0;

// --- Stage scrolling ---

/// Level height remaining at stage start. Spawn records are keyed by this scale.
pub const INIT_LEVEL_HEIGHT: f32 = 7680.0;

/// Rate at which the remaining level height decreases.
pub const LEVEL_ASCENT_SPEED: f32 = 80.0;

/// The boss spawns once the remaining level height drops below this.
pub const BOSS_TRIGGER_HEIGHT: f32 = 0.0;

// --- Player ship ---

pub const PLAYER_SHIP_WIDTH: f32 = 50.0;
pub const PLAYER_SHIP_HEIGHT: f32 = 50.0;
pub const PLAYER_SHIP_HIT_WIDTH: f32 = 35.0;
pub const PLAYER_SHIP_SPEED: f32 = WORLD_WIDTH;
pub const PLAYER_LASER_FIRE_DELAY: f32 = 0.2;
pub const PLAYER_MISSILE_FIRE_DELAY: f32 = 0.5;
pub const STARTING_LIVES: u32 = 3;
pub const STARTING_MISSILES: u32 = 10;

/// How long the ship ignores hits after spawning or respawning.
pub const RESPAWN_INVULNERABILITY_DURATION: f32 = 1.25;

/// Half-period of the invulnerability blink.
pub const INVULNERABILITY_BLINK_DURATION: f32 = 0.1;

// --- Enemy ships ---

pub const ENEMY_SHIP_WIDTH: f32 = 50.0;
pub const ENEMY_SHIP_HEIGHT: f32 = 50.0;
pub const ENEMY_SPEED_SLOW: f32 = 30.0;
pub const ENEMY_SPEED_MEDIUM: f32 = 50.0;
pub const ENEMY_SPEED_FAST: f32 = 90.0;
pub const ENEMY_FIRE_DELAY_SLOW: f32 = 4.0;
pub const ENEMY_FIRE_DELAY_MEDIUM: f32 = 1.5;
pub const ENEMY_FIRE_DELAY_FAST: f32 = 0.5;
pub const ENEMY_PHASE_DURATION_SHORT: f32 = 1.0;
pub const ENEMY_PHASE_DURATION_MEDIUM: f32 = 2.0;
pub const ENEMY_PHASE_DURATION_LONG: f32 = 3.0;

// --- Boss geometry (derived from the 112×64 sprite) ---

pub const BOSS_ASPECT_RATIO: f32 = 112.0 / 64.0;
pub const BOSS_WIDTH: f32 = 250.0;
pub const BOSS_HEIGHT: f32 = BOSS_WIDTH / BOSS_ASPECT_RATIO;

pub const BOSS_CORE_WIDTH: f32 = BOSS_WIDTH * (44.0 / 112.0);
pub const BOSS_CORE_HEIGHT: f32 = BOSS_HEIGHT * (56.0 / 64.0);

pub const BOSS_ARM_WIDTH: f32 = BOSS_WIDTH * (34.0 / 112.0);
pub const BOSS_ARM_HEIGHT: f32 = BOSS_HEIGHT * (26.0 / 64.0);

/// Arm turret offset from the boss center.
pub const BOSS_ARM_TURRET_OFFSET_X: f32 = BOSS_WIDTH * (32.0 / 112.0);
pub const BOSS_ARM_TURRET_OFFSET_Y: f32 = BOSS_HEIGHT * (10.0 / 64.0);

pub const BOSS_TURRET_WIDTH: f32 = 35.0;
pub const BOSS_TURRET_HEIGHT: f32 = 35.0;

/// Horizontal distance from the core center to each arm center.
pub const BOSS_ARM_OFFSET: f32 = BOSS_CORE_WIDTH / 2.0 + BOSS_ARM_WIDTH / 2.0;

/// Gap kept between the boss and the top edge once it has entered.
pub const BOSS_TOP_SCREEN_OFFSET: f32 = BOSS_HEIGHT / 2.0;

/// Closest the core center may get to a side edge while strafing.
pub const BOSS_SIDE_SCREEN_OFFSET: f32 = BOSS_CORE_WIDTH / 2.0;

// --- Boss gameplay ---

pub const BOSS_SPEED: f32 = 40.0;
pub const BOSS_ARM_STARTING_HEALTH: i32 = 50;
pub const BOSS_CORE_STARTING_HEALTH: i32 = 50;
pub const BOSS_ARM_FIRE_DELAY: f32 = 1.0;
pub const BOSS_CORE_FIRE_DELAY_SIMPLE: f32 = BOSS_ARM_FIRE_DELAY;
pub const BOSS_CORE_FIRE_DELAY_AIMED: f32 = BOSS_ARM_FIRE_DELAY;
pub const BOSS_CORE_FIRE_DELAY_SPRAY: f32 = 0.75;
pub const BOSS_CORE_FIRE_DELAY_SPRAY_FAST: f32 = 0.5;
pub const BOSS_CORE_FIRE_DELAY_RAPID: f32 = 0.2;

/// Number of rapid-fire slots in one repeating period.
pub const BOSS_CORE_RAPID_FIRE_PERIOD: u32 = 20;

/// Leading slots of each rapid-fire period that actually emit a shot.
pub const BOSS_CORE_RAPID_FIRE_BURST_SIZE: u32 = 10;

/// How long the boss dwells on one behavior before advancing.
pub const BOSS_BEHAVIOR_DURATION: f32 = 10.0;

/// Speed multiplier while descending into view.
pub const BOSS_ENTRANCE_SPEED_MULTIPLIER: f32 = 0.75;

// --- Projectiles ---

pub const LASER_WIDTH: f32 = 15.0;
pub const LASER_HEIGHT: f32 = 30.0;
pub const PLAYER_LASER_SPEED: f32 = WORLD_HEIGHT;
pub const ENEMY_LASER_SPEED: f32 = PLAYER_LASER_SPEED / 4.0;
pub const IMPROVED_LASER_LEFT_HEADING: (f32, f32) = (-0.33, 1.0);
pub const IMPROVED_LASER_RIGHT_HEADING: (f32, f32) = (0.33, 1.0);

pub const MISSILE_WIDTH: f32 = 30.0;
pub const MISSILE_HEIGHT: f32 = 30.0;
pub const MISSILE_INITIAL_LATERAL_SPEED: f32 = 175.0;
pub const MISSILE_LATERAL_MOTION_TIME: f32 = 0.4;

/// Deceleration during the lateral phase: after `MISSILE_LATERAL_MOTION_TIME`
/// the missile is moving at a quarter of its initial speed.
pub const MISSILE_LATERAL_DECAY_FACTOR: f32 =
    (3.0 * MISSILE_INITIAL_LATERAL_SPEED) / (4.0 * MISSILE_LATERAL_MOTION_TIME);
pub const MISSILE_LEFT_HEADING: (f32, f32) = (-1.0, 0.33);
pub const MISSILE_RIGHT_HEADING: (f32, f32) = (1.0, 0.33);
pub const MISSILE_ACCEL_FACTOR: f32 = WORLD_HEIGHT / 10.0;

// --- Powerups ---

pub const POWERUP_WIDTH: f32 = 30.0;
pub const POWERUP_HEIGHT: f32 = 30.0;
pub const POWERUP_SPEED: f32 = 75.0;
pub const EXTRA_MISSILE_AMMO: u32 = 5;
pub const IMPROVED_LASER_DURATION: f32 = 5.5;

// --- Explosions ---

pub const EXPLOSION_WIDTH: f32 = 50.0;
pub const EXPLOSION_HEIGHT: f32 = 50.0;
pub const EXPLOSION_FRAME_TIME: f32 = 0.125;
pub const EXPLOSION_FRAME_COUNT: u32 = 6;
pub const EXPLOSION_DURATION: f32 = EXPLOSION_FRAME_TIME * EXPLOSION_FRAME_COUNT as f32;

pub const MISSILE_EXPLOSION_WIDTH: f32 = 100.0;
pub const MISSILE_EXPLOSION_HEIGHT: f32 = 100.0;
pub const MISSILE_EXPLOSION_HIT_WIDTH: f32 = 100.0;
pub const MISSILE_EXPLOSION_HIT_HEIGHT: f32 = 100.0;

// --- Visual timing ---

pub const MUZZLE_FLASH_DURATION: f32 = 0.25;

// --- Score ---

pub const SCORE_ENEMY_KILL_ADDITION: i64 = 500;
pub const SCORE_POWERUP_ADDITION: i64 = 200;
pub const SCORE_BOSS_ARM_KILL_ADDITION: i64 = 5000;
pub const SCORE_BOSS_KILL_ADDITION: i64 = SCORE_BOSS_ARM_KILL_ADDITION * 2;
pub const SCORE_DEATH_DEDUCTION: i64 = 1000;

/// Survival bonus shown on the HUD, per whole second since stage start.
pub const SCORE_PER_SECOND: i64 = 10;
