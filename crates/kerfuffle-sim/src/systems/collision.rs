//! Collision resolution.
//!
//! Runs once per frame after movement, firing and lifetime. The passes run
//! in a fixed order and walk roster buckets in insertion order:
//!
//! a. player lasers vs enemies, then the boss (single damage)
//! b. player missiles vs enemies, then the boss (double damage)
//! c. enemy lasers vs player
//! d. powerups vs player
//! e. missile explosions vs remaining enemies
//! f. enemies rammed by the player
//!
//! Anything killed is marked in the despawn buffer and skipped by later
//! passes. Explosions spawned here are live immediately, so a missile
//! explosion created in pass (b) already consumes enemies in pass (e).

use glam::Vec2;
use hecs::{Entity, World};
use log::{debug, info};

use kerfuffle_boss::BossEncounter;
use kerfuffle_core::components::*;
use kerfuffle_core::constants::*;
use kerfuffle_core::enums::*;
use kerfuffle_core::events::StageEvent;
use kerfuffle_core::projectile;

use super::cleanup::DespawnBuffer;
use super::Frame;
use crate::roster::Roster;
use crate::score::ScoreState;
use crate::world_setup::{apply_powerup, respawn_player, spawn_filed};

/// Mutable stage state the collision passes act on.
pub struct CollisionContext<'a> {
    pub world: &'a mut World,
    pub roster: &'a mut Roster,
    pub frame: &'a Frame,
    pub despawn_buffer: &'a mut DespawnBuffer,
    pub score: &'a mut ScoreState,
    pub events: &'a mut Vec<StageEvent>,
    pub state: &'a mut StageState,
}

pub fn run(ctx: &mut CollisionContext<'_>) {
    ctx.player_lasers();
    ctx.player_missiles();
    ctx.enemy_lasers();
    ctx.powerups();
    ctx.missile_explosions();
    ctx.rammed_enemies();
}

impl CollisionContext<'_> {
    // --- Passes ---

    fn player_lasers(&mut self) {
        for laser in self.live(EntityKind::PlayerLaser) {
            let Some(point) = self.position(laser) else {
                continue;
            };
            if let Some(enemy) = self.first_enemy_hit(point) {
                self.kill_enemy(enemy, EntityKind::PlayerLaser, SCORE_ENEMY_KILL_ADDITION);
                self.despawn_buffer.mark(laser);
                continue;
            }
            if self.boss_hit(point) {
                self.damage_boss(point, 1);
                self.despawn_buffer.mark(laser);
            }
        }
    }

    fn player_missiles(&mut self) {
        for missile in self.live(EntityKind::Missile) {
            let Some(point) = self.position(missile) else {
                continue;
            };
            if let Some(enemy) = self.first_enemy_hit(point) {
                self.kill_enemy(enemy, EntityKind::Missile, SCORE_ENEMY_KILL_ADDITION);
                self.despawn_buffer.mark(missile);
                self.spawn(projectile::missile_explosion(point, self.frame.now));
                continue;
            }
            if self.boss_hit(point) {
                self.damage_boss(point, 2);
                self.despawn_buffer.mark(missile);
                self.spawn(projectile::missile_explosion(point, self.frame.now));
            }
        }
    }

    fn enemy_lasers(&mut self) {
        for laser in self.live(EntityKind::EnemyLaser) {
            let Some(point) = self.position(laser) else {
                continue;
            };
            if self.player_hit(point) {
                self.despawn_buffer.mark(laser);
                self.score.deduct(SCORE_DEATH_DEDUCTION);
                self.kill_player();
            }
        }
    }

    fn powerups(&mut self) {
        let Some(player) = self.roster.player() else {
            return;
        };
        for powerup in self.live(EntityKind::Powerup) {
            let Some(point) = self.position(powerup) else {
                continue;
            };
            if !self.player_hit(point) {
                continue;
            }
            let Some(kind) = self.world.get::<&Powerup>(powerup).ok().map(|p| p.kind) else {
                continue;
            };
            if let Ok(ship) = self.world.query_one_mut::<&mut PlayerShip>(player) {
                apply_powerup(ship, kind, self.frame.now);
            }
            self.despawn_buffer.mark(powerup);
            self.score.award(SCORE_POWERUP_ADDITION);
            self.score.powerups_collected += 1;
            self.events.push(StageEvent::PowerupCollected { kind });
        }
    }

    fn missile_explosions(&mut self) {
        for blast in self.live(EntityKind::MissileExplosion) {
            let Some(area) = self.world.get::<&Body>(blast).ok().map(|b| (*b).clone()) else {
                continue;
            };
            let consumed: Vec<Entity> = self
                .live(EntityKind::EnemyShip)
                .into_iter()
                .filter(|&enemy| {
                    self.position(enemy)
                        .map_or(false, |at| area.hit_test_circle(at))
                })
                .collect();
            if consumed.is_empty() {
                continue;
            }
            for &enemy in &consumed {
                self.kill_enemy(enemy, EntityKind::MissileExplosion, SCORE_ENEMY_KILL_ADDITION);
            }
            if let Ok(mut explosion) = self.world.get::<&mut MissileExplosion>(blast) {
                explosion.kills += consumed.len() as u32;
            }
        }
    }

    /// Enemies touching the player die with it. Invulnerability does not
    /// protect against a collision.
    fn rammed_enemies(&mut self) {
        let Some(player) = self.roster.player() else {
            return;
        };
        for enemy in self.live(EntityKind::EnemyShip) {
            let Some(point) = self.position(player) else {
                return;
            };
            let touching = self
                .world
                .get::<&Body>(enemy)
                .map_or(false, |body| body.hit_test(point));
            if touching {
                self.kill_enemy(enemy, EntityKind::Player, 0);
                self.kill_player();
            }
        }
    }

    // --- Helpers ---

    /// Entities of `kind` not yet marked dead, in roster order.
    fn live(&self, kind: EntityKind) -> Vec<Entity> {
        self.roster
            .of(kind)
            .iter()
            .copied()
            .filter(|&e| !self.despawn_buffer.contains(e))
            .collect()
    }

    fn position(&self, entity: Entity) -> Option<Vec2> {
        self.world.get::<&Body>(entity).ok().map(|body| body.position)
    }

    fn spawn<P: hecs::Component>(&mut self, bundle: (EntityKind, Body, P)) -> Entity {
        spawn_filed(self.world, self.roster, bundle)
    }

    fn first_enemy_hit(&self, point: Vec2) -> Option<Entity> {
        self.live(EntityKind::EnemyShip).into_iter().find(|&enemy| {
            self.world
                .get::<&Body>(enemy)
                .map_or(false, |body| body.hit_test(point))
        })
    }

    fn kill_enemy(&mut self, enemy: Entity, cause: EntityKind, points: i64) {
        if !self.despawn_buffer.mark(enemy) {
            return;
        }
        let Some(at) = self.position(enemy) else {
            return;
        };
        self.spawn(projectile::explosion(at, self.frame.now));
        self.score.award(points);
        self.score.enemies_destroyed += 1;
        self.events.push(StageEvent::EnemyDestroyed {
            position: at,
            cause,
        });
    }

    fn player_hit(&self, point: Vec2) -> bool {
        let Some(player) = self.roster.player() else {
            return false;
        };
        let Ok(mut query) = self.world.query_one::<(&Body, &PlayerShip)>(player) else {
            return false;
        };
        query
            .get()
            .map_or(false, |(body, ship)| !ship.invulnerable && body.hit_test(point))
    }

    /// At most one death per stage once lives run out: a ship already on its
    /// last wreck, or a stage already decided, ignores further hits.
    fn kill_player(&mut self) {
        if *self.state != StageState::Playing {
            return;
        }
        let Some(player) = self.roster.player() else {
            return;
        };
        let now = self.frame.now;
        let viewport = self.frame.viewport;
        let Ok((body, ship)) = self.world.query_one_mut::<(&mut Body, &mut PlayerShip)>(player)
        else {
            return;
        };
        if ship.lives == 0 {
            return;
        }
        let wreck = body.position;
        let lives = respawn_player(body, ship, &viewport, now);

        self.spawn(projectile::explosion(wreck, now));
        self.score.deaths += 1;
        self.events.push(StageEvent::PlayerHit {
            lives_remaining: lives,
        });
        if lives == 0 {
            info!("player out of lives at {now:.2}s");
            *self.state = StageState::Lose;
        }
    }

    fn boss_hit(&self, point: Vec2) -> bool {
        self.roster.boss().map_or(false, |boss| {
            self.world
                .get::<&BossEncounter>(boss)
                .map_or(false, |encounter| encounter.hit(point))
        })
    }

    /// Apply `applications` points of damage at `point`, credit every part
    /// destroyed, then check for the win once.
    fn damage_boss(&mut self, point: Vec2, applications: u32) {
        let Some(boss) = self.roster.boss() else {
            return;
        };
        let Ok(encounter) = self.world.query_one_mut::<&mut BossEncounter>(boss) else {
            return;
        };
        let before = encounter.phase();
        let destroyed: Vec<BossPart> = (0..applications)
            .filter_map(|_| encounter.take_damage(point))
            .collect();
        let dead = encounter.is_dead();

        for &part in &destroyed {
            debug!("boss part destroyed: {part:?}");
            self.score.award(SCORE_BOSS_ARM_KILL_ADDITION);
            self.score.boss_parts_destroyed += 1;
            self.events.push(StageEvent::BossPartDestroyed { part });
        }
        if dead && before != BossPhase::Dead {
            self.events.push(StageEvent::BossPhaseChanged {
                from: before,
                to: BossPhase::Dead,
            });
        }
        if !destroyed.is_empty() && dead && *self.state == StageState::Playing {
            info!("boss defeated at {:.2}s", self.frame.now);
            *self.state = StageState::Win;
            self.score.award(SCORE_BOSS_KILL_ADDITION);
            self.events.push(StageEvent::BossDefeated);
        }
    }
}
