#[cfg(test)]
mod tests {
    use glam::Vec2;
    use hecs::Entity;

    use kerfuffle_boss::BossEncounter;
    use kerfuffle_core::commands::PlayerIntent;
    use kerfuffle_core::components::*;
    use kerfuffle_core::constants::*;
    use kerfuffle_core::enums::*;
    use kerfuffle_core::events::StageEvent;
    use kerfuffle_core::level::{EnemySpawn, PowerupSpawn, SpawnQueue};
    use kerfuffle_core::pattern::MovementPattern;
    use kerfuffle_core::projectile::{self, LaserShot};
    use kerfuffle_core::state::{StageSnapshot, VisualKey};
    use kerfuffle_core::types::Viewport;
    use kerfuffle_core::weapon::WeaponTimer;

    use crate::roster::Roster;
    use crate::stage::{Stage, StageConfig};
    use crate::systems::cleanup::DespawnBuffer;
    use crate::systems::firing::{enemy_fire, player_fire};
    use crate::systems::movement::steer_missile;
    use crate::world_setup::{enemy_bundle, powerup_bundle, spawn_filed};

    const DT: f32 = 1.0 / 60.0;

    // ---- Helpers ----

    fn empty_stage() -> Stage {
        Stage::new(StageConfig::default(), SpawnQueue::default())
    }

    fn idle(stage: &mut Stage) -> StageSnapshot {
        stage.tick(DT, &PlayerIntent::idle())
    }

    /// Tick until the respawn invulnerability has worn off.
    fn settle(stage: &mut Stage) {
        for _ in 0..200 {
            if !stage.player_ship().unwrap().invulnerable {
                return;
            }
            idle(stage);
        }
        panic!("player stayed invulnerable");
    }

    fn now(stage: &Stage) -> f32 {
        stage.time().now()
    }

    fn player_position(stage: &Stage) -> Vec2 {
        stage.player_body().unwrap().position
    }

    fn spawn_enemy(stage: &mut Stage, at: Vec2) -> Entity {
        let t = now(stage);
        let mut bundle = enemy_bundle(&EnemySpawn::basic(at.x, 0.0), &Viewport::default(), t);
        bundle.1.position = at;
        let (world, roster) = stage.world_mut();
        spawn_filed(world, roster, bundle)
    }

    fn spawn_laser(stage: &mut Stage, at: Vec2, owner: LaserOwner) -> Entity {
        let direction = match owner {
            LaserOwner::Player => Compass::North.unit(),
            LaserOwner::Enemy => Compass::South.unit(),
        };
        let t = now(stage);
        let (world, roster) = stage.world_mut();
        spawn_filed(
            world,
            roster,
            projectile::laser(&LaserShot::new(at, direction, owner), t),
        )
    }

    fn spawn_powerup(stage: &mut Stage, at: Vec2, kind: PowerupType) -> Entity {
        let t = now(stage);
        let spawn = PowerupSpawn {
            x: at.x,
            level_y: 0.0,
            kind,
        };
        let mut bundle = powerup_bundle(&spawn, &Viewport::default(), t);
        bundle.1.position = at;
        let (world, roster) = stage.world_mut();
        spawn_filed(world, roster, bundle)
    }

    fn with_boss<R>(stage: &mut Stage, f: impl FnOnce(&mut BossEncounter) -> R) -> R {
        let (world, roster) = stage.world_mut();
        let boss = roster.boss().expect("boss spawned");
        let mut encounter = world.get::<&mut BossEncounter>(boss).unwrap();
        f(&mut encounter)
    }

    /// A stage whose boss arrives almost immediately, ticked until the boss
    /// has finished its entrance.
    fn stage_with_boss_in_phase1() -> Stage {
        let mut stage = Stage::new(
            StageConfig {
                init_level_height: 2.0,
                ..StageConfig::default()
            },
            SpawnQueue::default(),
        );
        for _ in 0..1200 {
            let snap = idle(&mut stage);
            if snap.hud.boss_phase == Some(BossPhase::Phase1) {
                return stage;
            }
        }
        panic!("boss never left its entrance");
    }

    fn test_enemy(firing: FiringPattern) -> EnemyShip {
        EnemyShip {
            pattern: MovementPattern::from_kind(
                MovementPatternKind::Simple,
                PhaseDuration::Medium,
                0.0,
            ),
            firing,
            speed: ENEMY_SPEED_MEDIUM,
            fire_timer: WeaponTimer::ready(1.0),
            shot_count: 0,
        }
    }

    /// Poll `enemy_fire` just after each one-second cooldown has passed.
    fn fire_attempts(ship: &mut EnemyShip, attempts: usize) -> Vec<Option<LaserShot>> {
        let body = Body::new(Vec2::new(200.0, 400.0), 50.0, 50.0, 0.0);
        (0..attempts)
            .map(|i| enemy_fire(ship, &body, i as f32 * 1.1, Vec2::new(200.0, 50.0)))
            .collect()
    }

    // ---- Enemy firing rhythm ----

    #[test]
    fn test_simple_fire_skips_every_fourth_attempt() {
        let mut ship = test_enemy(FiringPattern::Simple);
        let fired: Vec<bool> = fire_attempts(&mut ship, 8).iter().map(Option::is_some).collect();
        assert_eq!(fired, vec![true, true, true, false, true, true, true, false]);
        assert_eq!(ship.shot_count, 8);
    }

    #[test]
    fn test_burst_fires_three_of_six() {
        let mut ship = test_enemy(FiringPattern::Burst);
        let fired: Vec<bool> = fire_attempts(&mut ship, 12).iter().map(Option::is_some).collect();
        assert_eq!(
            fired,
            vec![false, false, true, true, true, false, false, false, true, true, true, false]
        );
    }

    #[test]
    fn test_spray_cycles_headings() {
        let mut ship = test_enemy(FiringPattern::Spray);
        let headings: Vec<Vec2> = fire_attempts(&mut ship, 4)
            .into_iter()
            .map(|shot| shot.unwrap().direction)
            .collect();
        assert_eq!(
            headings,
            vec![
                Compass::SouthEast.unit(),
                Compass::South.unit(),
                Compass::SouthWest.unit(),
                Compass::South.unit(),
            ]
        );
    }

    #[test]
    fn test_aimed_shot_leaves_bottom_edge_towards_target() {
        let mut ship = test_enemy(FiringPattern::Aimed);
        let shot = fire_attempts(&mut ship, 1)[0].unwrap();
        assert_eq!(shot.origin, Vec2::new(200.0, 375.0));
        assert_eq!(shot.laser_type, LaserType::Pointy);
        assert_eq!(shot.owner, LaserOwner::Enemy);
        assert!(shot.direction.normalize().abs_diff_eq(Vec2::new(0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_enemy_fire_respects_cooldown() {
        let mut ship = test_enemy(FiringPattern::Spray);
        let body = Body::new(Vec2::new(200.0, 400.0), 50.0, 50.0, 0.0);
        let target = Vec2::ZERO;
        assert!(enemy_fire(&mut ship, &body, 0.0, target).is_some());
        assert!(enemy_fire(&mut ship, &body, 0.5, target).is_none());
        assert!(enemy_fire(&mut ship, &body, 1.0, target).is_none());
        assert_eq!(ship.shot_count, 1);
    }

    // ---- Player weapons and motion ----

    #[test]
    fn test_player_fire_volley_and_missile_pair() {
        let body = Body::new(Vec2::new(240.0, 50.0), 50.0, 50.0, 0.0);
        let mut ship = PlayerShip::new(3, 1);
        let intent = PlayerIntent::idle().with_laser().with_missile();

        let (shots, missiles) = player_fire(&body, &mut ship, &intent, 0.0);
        assert_eq!(shots.len(), 1);
        assert_eq!(missiles.len(), 2);
        assert_eq!(ship.missiles, 0);

        // Out of ammo; laser still on cooldown.
        let (shots, missiles) = player_fire(&body, &mut ship, &intent, 0.1);
        assert!(shots.is_empty());
        assert!(missiles.is_empty());

        ship.improved_lasers = true;
        let (shots, _) = player_fire(&body, &mut ship, &intent, 0.3);
        assert_eq!(shots.len(), 3);
    }

    #[test]
    fn test_missile_steering_stages() {
        let (_, mut body, mut missile) = projectile::missile(Vec2::ZERO, ArmSide::Left, 0.0);

        let lateral = steer_missile(&mut body, &mut missile, 0.2);
        assert_eq!(missile.stage, MissileStage::Lateral);
        assert!((lateral - (175.0 - 0.2 * MISSILE_LATERAL_DECAY_FACTOR)).abs() < 1e-3);
        assert!(body.heading.x < 0.0);

        let ascending = steer_missile(&mut body, &mut missile, 0.5);
        assert_eq!(missile.stage, MissileStage::Vertical);
        assert_eq!(body.heading, Compass::North.unit());
        assert!((ascending - 43.75).abs() < 1e-3);

        let later = steer_missile(&mut body, &mut missile, 1.0);
        assert!((later - (43.75 + 0.5 * 64.0 * 64.0)).abs() < 1e-2);
    }

    #[test]
    fn test_player_clamped_to_viewport_and_rolls() {
        let mut stage = empty_stage();
        let mut snap = StageSnapshot::default();
        for _ in 0..120 {
            snap = stage.tick(DT, &PlayerIntent::moving(Vec2::new(-1.0, -1.0)));
        }
        let body = stage.player_body().unwrap();
        assert_eq!(body.position, Vec2::new(PLAYER_SHIP_WIDTH / 2.0, PLAYER_SHIP_HEIGHT / 2.0));
        assert_eq!(stage.player_ship().unwrap().roll, PlayerRoll::RollLeft);

        let view = &snap.entities[0];
        assert_eq!(view.kind, EntityKind::Player);
        assert!(view.reflect_horizontal);
        assert_eq!(view.visual, VisualKey::PlayerTurning);
    }

    #[test]
    fn test_player_blinks_while_invulnerable() {
        let mut stage = empty_stage();
        let first = idle(&mut stage);
        assert!(!first.entities[0].visible);

        let mut visible_frames = 0;
        for _ in 0..60 {
            if idle(&mut stage).entities[0].visible {
                visible_frames += 1;
            }
        }
        assert!(visible_frames > 0 && visible_frames < 60);

        settle(&mut stage);
        assert!(idle(&mut stage).entities[0].visible);
    }

    #[test]
    fn test_improved_lasers_expire() {
        let mut stage = empty_stage();
        settle(&mut stage);
        let at = player_position(&stage);
        spawn_powerup(&mut stage, at, PowerupType::ImprovedLasers);
        let snap = idle(&mut stage);
        assert!(snap.hud.improved_lasers);

        for _ in 0..((IMPROVED_LASER_DURATION / DT) as usize + 10) {
            idle(&mut stage);
        }
        assert!(!stage.player_ship().unwrap().improved_lasers);
    }

    // ---- Roster ----

    #[test]
    fn test_roster_refuses_mismatched_kind() {
        let mut world = hecs::World::new();
        let mut roster = Roster::default();
        let shot = LaserShot::new(Vec2::ZERO, Vec2::Y, LaserOwner::Player);
        let laser = world.spawn(projectile::laser(&shot, 0.0));

        assert!(!roster.file(&world, EntityKind::EnemyShip, laser));
        assert!(!roster.file(&world, EntityKind::EnemyLaser, laser));
        assert!(roster.is_empty());

        assert!(roster.file(&world, EntityKind::PlayerLaser, laser));
        assert_eq!(roster.of(EntityKind::PlayerLaser), &[laser]);
    }

    #[test]
    fn test_despawn_buffer_marks_once() {
        let mut world = hecs::World::new();
        let e = world.spawn((Explosion,));
        let mut buffer = DespawnBuffer::default();
        assert!(buffer.mark(e));
        assert!(!buffer.mark(e));
        assert_eq!(buffer.len(), 1);
    }

    // ---- Collision scenarios ----

    #[test]
    fn test_laser_inside_enemy_kills_both() {
        let mut stage = empty_stage();
        let at = Vec2::new(100.0, 400.0);
        spawn_enemy(&mut stage, at);
        spawn_laser(&mut stage, at, LaserOwner::Player);

        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::EnemyShip), 0);
        assert_eq!(snap.count(EntityKind::PlayerLaser), 0);
        assert_eq!(snap.count(EntityKind::Explosion), 1);
        assert_eq!(stage.score().points, SCORE_ENEMY_KILL_ADDITION);
        assert_eq!(stage.score().enemies_destroyed, 1);
        assert!(snap.events.iter().any(|e| matches!(
            e,
            StageEvent::EnemyDestroyed {
                cause: EntityKind::PlayerLaser,
                ..
            }
        )));
    }

    #[test]
    fn test_missed_laser_persists() {
        let mut stage = empty_stage();
        spawn_enemy(&mut stage, Vec2::new(100.0, 400.0));
        spawn_laser(&mut stage, Vec2::new(400.0, 300.0), LaserOwner::Player);

        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::EnemyShip), 1);
        assert_eq!(snap.count(EntityKind::PlayerLaser), 1);
        assert_eq!(snap.count(EntityKind::Explosion), 0);
        assert_eq!(stage.score().points, 0);

        let laser = snap
            .entities
            .iter()
            .find(|e| e.kind == EntityKind::PlayerLaser)
            .unwrap();
        assert!((laser.position.y - (300.0 + PLAYER_LASER_SPEED * DT)).abs() < 1e-3);
    }

    #[test]
    fn test_laser_culled_off_screen() {
        let mut stage = empty_stage();
        spawn_laser(&mut stage, Vec2::new(240.0, 660.0), LaserOwner::Player);
        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::PlayerLaser), 0);
        assert_eq!(stage.roster().of(EntityKind::PlayerLaser).len(), 0);
    }

    #[test]
    fn test_missile_explosion_multi_kill_bonus() {
        let mut stage = empty_stage();
        let center = Vec2::new(240.0, 400.0);
        for dx in [-30.0, 0.0, 30.0] {
            spawn_enemy(&mut stage, center + Vec2::new(dx, 0.0));
        }
        // An enemy outside the blast radius survives.
        spawn_enemy(&mut stage, center + Vec2::new(120.0, 0.0));
        {
            let t = now(&stage);
            let (world, roster) = stage.world_mut();
            spawn_filed(world, roster, projectile::missile_explosion(center, t));
        }

        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::EnemyShip), 1);
        assert_eq!(snap.count(EntityKind::Explosion), 3);
        assert_eq!(snap.count(EntityKind::MissileExplosion), 1);
        assert_eq!(stage.score().points, 3 * SCORE_ENEMY_KILL_ADDITION);

        let mut bonus = None;
        for _ in 0..60 {
            let snap = idle(&mut stage);
            bonus = bonus.or(snap.events.into_iter().find_map(|e| match e {
                StageEvent::MissileBonus { kills, points } => Some((kills, points)),
                _ => None,
            }));
        }
        let expected = SCORE_ENEMY_KILL_ADDITION * (1 + 4 + 9);
        assert_eq!(bonus, Some((3, expected)));
        assert_eq!(stage.score().points, 3 * SCORE_ENEMY_KILL_ADDITION + expected);
        assert_eq!(stage.roster().of(EntityKind::MissileExplosion).len(), 0);
    }

    #[test]
    fn test_missile_hit_leaves_blast() {
        let mut stage = empty_stage();
        let at = Vec2::new(100.0, 400.0);
        spawn_enemy(&mut stage, at);
        {
            let t = now(&stage);
            let (world, roster) = stage.world_mut();
            spawn_filed(world, roster, projectile::missile(at, ArmSide::Right, t));
        }
        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::EnemyShip), 0);
        assert_eq!(snap.count(EntityKind::Missile), 0);
        assert_eq!(snap.count(EntityKind::MissileExplosion), 1);
        assert_eq!(snap.count(EntityKind::Explosion), 1);
        assert_eq!(stage.score().points, SCORE_ENEMY_KILL_ADDITION);
    }

    #[test]
    fn test_invulnerable_player_ignores_lasers_and_powerups() {
        let mut stage = empty_stage();
        let at = player_position(&stage);
        spawn_laser(&mut stage, at, LaserOwner::Enemy);
        spawn_powerup(&mut stage, at, PowerupType::ExtraLife);

        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::EnemyLaser), 1);
        assert_eq!(snap.count(EntityKind::Powerup), 1);
        assert_eq!(snap.hud.lives, STARTING_LIVES);
    }

    #[test]
    fn test_enemy_laser_kills_player() {
        let mut stage = empty_stage();
        settle(&mut stage);
        // Walk away from the spawn point so the respawn is observable.
        for _ in 0..30 {
            stage.tick(DT, &PlayerIntent::moving(Vec2::new(1.0, 0.0)));
        }
        let at = player_position(&stage);
        spawn_laser(&mut stage, at, LaserOwner::Enemy);

        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::EnemyLaser), 0);
        assert_eq!(snap.count(EntityKind::Explosion), 1);
        assert!(snap.events.contains(&StageEvent::PlayerHit {
            lives_remaining: STARTING_LIVES - 1
        }));
        assert_eq!(stage.score().points, -SCORE_DEATH_DEDUCTION);
        assert_eq!(stage.score().deaths, 1);

        let ship = stage.player_ship().unwrap();
        assert!(ship.invulnerable);
        assert_eq!(ship.missiles, STARTING_MISSILES);
        assert_eq!(player_position(&stage), Vec2::new(240.0, PLAYER_SHIP_HEIGHT));
        assert_eq!(stage.state(), StageState::Playing);
    }

    #[test]
    fn test_last_life_lost_ends_stage() {
        let mut stage = Stage::new(
            StageConfig {
                starting_lives: 1,
                ..StageConfig::default()
            },
            SpawnQueue::default(),
        );
        settle(&mut stage);
        let at = player_position(&stage);
        spawn_laser(&mut stage, at, LaserOwner::Enemy);

        let snap = idle(&mut stage);
        assert_eq!(snap.state, StageState::Lose);
        assert_eq!(snap.hud.lives, 0);

        let frozen = stage.time();
        let after = idle(&mut stage);
        assert_eq!(after.time.tick, frozen.tick);
        assert_eq!(after.state, StageState::Lose);
    }

    #[test]
    fn test_ramming_ignores_invulnerability() {
        let mut stage = empty_stage();
        let at = player_position(&stage);
        spawn_enemy(&mut stage, at);

        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::EnemyShip), 0);
        assert_eq!(snap.count(EntityKind::Explosion), 2);
        assert_eq!(snap.hud.lives, STARTING_LIVES - 1);
        assert_eq!(stage.score().points, 0);
    }

    #[test]
    fn test_final_death_is_not_repeated_by_a_ram() {
        let mut stage = Stage::new(
            StageConfig {
                starting_lives: 1,
                ..StageConfig::default()
            },
            SpawnQueue::default(),
        );
        settle(&mut stage);
        let at = player_position(&stage);
        spawn_laser(&mut stage, at, LaserOwner::Enemy);
        spawn_enemy(&mut stage, at);

        let snap = idle(&mut stage);
        assert_eq!(snap.state, StageState::Lose);
        assert_eq!(snap.hud.lives, 0);
        assert_eq!(stage.score().deaths, 1);
        let hits = snap
            .events
            .iter()
            .filter(|e| matches!(e, StageEvent::PlayerHit { .. }))
            .count();
        assert_eq!(hits, 1);
        // The player's wreck and the rammed enemy.
        assert_eq!(snap.count(EntityKind::Explosion), 2);
    }

    #[test]
    fn test_powerups_apply_effects() {
        let mut stage = empty_stage();
        settle(&mut stage);
        let at = player_position(&stage);
        spawn_powerup(&mut stage, at, PowerupType::ExtraMissiles);
        spawn_powerup(&mut stage, at, PowerupType::ExtraLife);

        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::Powerup), 0);
        assert_eq!(snap.hud.missiles, STARTING_MISSILES + EXTRA_MISSILE_AMMO);
        assert_eq!(snap.hud.lives, STARTING_LIVES + 1);
        assert_eq!(stage.score().points, 2 * SCORE_POWERUP_ADDITION);
        assert_eq!(stage.score().powerups_collected, 2);
    }

    // ---- Boss ----

    #[test]
    fn test_boss_arrives_below_trigger_height() {
        let mut stage = Stage::new(
            StageConfig {
                init_level_height: 2.0,
                ..StageConfig::default()
            },
            SpawnQueue::default(),
        );
        let mut spawned_at = None;
        for i in 0..30 {
            let snap = idle(&mut stage);
            if snap.events.contains(&StageEvent::BossSpawned) {
                spawned_at = Some(i);
                assert_eq!(snap.hud.boss_phase, Some(BossPhase::Entrance));
            }
        }
        // 2 units at 80 units per second are covered on the second frame.
        assert_eq!(spawned_at, Some(1));
        assert_eq!(stage.roster().of(EntityKind::Boss).len(), 1);
    }

    #[test]
    fn test_missile_deals_double_damage_to_boss() {
        let mut stage = stage_with_boss_in_phase1();
        let arm = with_boss(&mut stage, |boss| boss.arm(ArmSide::Right).body.position);
        {
            let t = now(&stage);
            let (world, roster) = stage.world_mut();
            spawn_filed(world, roster, projectile::missile(arm, ArmSide::Right, t));
        }
        let snap = idle(&mut stage);
        assert_eq!(snap.count(EntityKind::MissileExplosion), 1);
        assert_eq!(snap.count(EntityKind::Missile), 0);
        let health = stage.boss().unwrap().arm(ArmSide::Right).health;
        assert_eq!(health, BOSS_ARM_STARTING_HEALTH - 2);
    }

    fn spawn_missile(stage: &mut Stage, at: Vec2) {
        let t = now(stage);
        let (world, roster) = stage.world_mut();
        spawn_filed(world, roster, projectile::missile(at, ArmSide::Right, t));
    }

    fn count_events(snap: &StageSnapshot, pred: impl Fn(&StageEvent) -> bool) -> usize {
        snap.events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_missile_killing_blow_on_core_credits_once() {
        let mut stage = stage_with_boss_in_phase1();
        let core = with_boss(&mut stage, |boss| {
            for side in [ArmSide::Left, ArmSide::Right] {
                let at = boss.arm(side).body.position;
                for _ in 0..BOSS_ARM_STARTING_HEALTH {
                    boss.take_damage(at);
                }
            }
            let core = boss.core().body.position;
            for _ in 1..BOSS_CORE_STARTING_HEALTH {
                boss.take_damage(core);
            }
            core
        });
        assert_eq!(stage.boss().unwrap().core().health, 1);

        let before = stage.score().points;
        spawn_missile(&mut stage, core);
        let snap = idle(&mut stage);

        assert_eq!(snap.state, StageState::Win);
        assert_eq!(
            stage.score().points - before,
            SCORE_BOSS_ARM_KILL_ADDITION + SCORE_BOSS_KILL_ADDITION
        );
        assert_eq!(
            count_events(&snap, |e| matches!(e, StageEvent::BossPartDestroyed { .. })),
            1
        );
        assert_eq!(
            count_events(&snap, |e| matches!(e, StageEvent::BossDefeated)),
            1
        );
        assert_eq!(snap.count(EntityKind::MissileExplosion), 1);
    }

    #[test]
    fn test_missile_killing_blow_on_arm_credits_once() {
        let mut stage = stage_with_boss_in_phase1();
        let arm = with_boss(&mut stage, |boss| {
            let at = boss.arm(ArmSide::Right).body.position;
            for _ in 1..BOSS_ARM_STARTING_HEALTH {
                boss.take_damage(at);
            }
            at
        });
        assert_eq!(stage.boss().unwrap().arm(ArmSide::Right).health, 1);

        let before = stage.score().points;
        spawn_missile(&mut stage, arm);
        let snap = idle(&mut stage);

        assert_eq!(snap.state, StageState::Playing);
        assert_eq!(stage.score().points - before, SCORE_BOSS_ARM_KILL_ADDITION);
        let destroyed: Vec<_> = snap
            .events
            .iter()
            .filter(|e| matches!(e, StageEvent::BossPartDestroyed { .. }))
            .collect();
        assert_eq!(
            destroyed,
            [&StageEvent::BossPartDestroyed {
                part: BossPart::RightArm
            }]
        );
        let boss = stage.boss().unwrap();
        assert!(!boss.arm(ArmSide::Right).active);
        assert_eq!(boss.arm(ArmSide::Left).health, BOSS_ARM_STARTING_HEALTH);
        assert_eq!(boss.core().health, BOSS_CORE_STARTING_HEALTH);
    }

    #[test]
    fn test_boss_core_kill_wins_stage() {
        let mut stage = stage_with_boss_in_phase1();
        let core = with_boss(&mut stage, |boss| {
            for side in [ArmSide::Left, ArmSide::Right] {
                let at = boss.arm(side).body.position;
                for _ in 0..BOSS_ARM_STARTING_HEALTH {
                    boss.take_damage(at);
                }
            }
            let core = boss.core().body.position;
            for _ in 1..BOSS_CORE_STARTING_HEALTH {
                boss.take_damage(core);
            }
            core
        });
        assert_eq!(stage.boss().unwrap().core().health, 1);

        let before = stage.score().points;
        spawn_laser(&mut stage, core, LaserOwner::Player);
        let snap = idle(&mut stage);

        assert_eq!(snap.state, StageState::Win);
        assert_eq!(
            stage.score().points - before,
            SCORE_BOSS_ARM_KILL_ADDITION + SCORE_BOSS_KILL_ADDITION
        );
        assert!(snap.events.contains(&StageEvent::BossPartDestroyed {
            part: BossPart::Core
        }));
        assert!(snap.events.contains(&StageEvent::BossDefeated));
        assert!(snap.events.contains(&StageEvent::BossPhaseChanged {
            from: BossPhase::Phase3,
            to: BossPhase::Dead,
        }));
        assert_eq!(snap.hud.boss_phase, Some(BossPhase::Dead));
    }

    #[test]
    fn test_boss_views_include_turrets() {
        let mut stage = stage_with_boss_in_phase1();
        let snap = idle(&mut stage);
        let boss_views: Vec<_> = snap
            .entities
            .iter()
            .filter(|e| e.kind == EntityKind::Boss)
            .collect();
        // Hull, core turret, two arm turrets.
        assert_eq!(boss_views.len(), 4);
        assert_eq!(boss_views[0].visual, VisualKey::BossWhole);
        assert!(boss_views[1..]
            .iter()
            .all(|v| matches!(v.visual, VisualKey::TurretNeutral | VisualKey::TurretFiring)));
    }

    // ---- Spawning and lifecycle ----

    #[test]
    fn test_spawn_queue_released_by_height() {
        let queue = SpawnQueue::new(
            vec![EnemySpawn::basic(100.0, 7600.0), EnemySpawn::basic(300.0, 7000.0)],
            vec![PowerupSpawn {
                x: 200.0,
                level_y: 7640.0,
                kind: PowerupType::ExtraMissiles,
            }],
        );
        let mut stage = Stage::new(StageConfig::default(), queue);

        // 40 units after 0.5 s: the powerup is due, the enemies are not.
        for _ in 0..31 {
            idle(&mut stage);
        }
        assert_eq!(stage.roster().of(EntityKind::Powerup).len(), 1);
        assert_eq!(stage.roster().of(EntityKind::EnemyShip).len(), 0);

        for _ in 0..40 {
            idle(&mut stage);
        }
        assert_eq!(stage.roster().of(EntityKind::EnemyShip).len(), 1);
        assert_eq!(stage.spawn_queue().enemies_remaining(), 1);

        let enemy = stage.roster().of(EntityKind::EnemyShip)[0];
        let x = stage.world().get::<&Body>(enemy).unwrap().position.x;
        assert_eq!(x, 100.0);
    }

    #[test]
    fn test_reset_restores_initial_stage() {
        let queue = SpawnQueue::new(vec![EnemySpawn::basic(100.0, 7600.0)], Vec::new());
        let mut stage = Stage::new(StageConfig::default(), queue);
        for _ in 0..90 {
            stage.tick(DT, &PlayerIntent::idle().with_laser());
        }
        assert!(stage.roster().len() > 1);
        assert_eq!(stage.spawn_queue().enemies_remaining(), 0);

        stage.reset();
        assert_eq!(stage.time().tick, 0);
        assert_eq!(stage.roster().len(), 1);
        assert_eq!(stage.world().len(), 1);
        assert_eq!(stage.score().points, 0);
        assert_eq!(stage.spawn_queue().enemies_remaining(), 1);
        assert_eq!(stage.level_height(), INIT_LEVEL_HEIGHT);
        assert_eq!(stage.state(), StageState::Playing);
    }

    #[test]
    fn test_display_score_counts_whole_seconds() {
        let mut stage = empty_stage();
        let mut snap = StageSnapshot::default();
        for _ in 0..150 {
            snap = idle(&mut stage);
        }
        assert_eq!(snap.hud.score, 0);
        assert_eq!(snap.hud.display_score, 2 * SCORE_PER_SECOND);
    }
}
