//! Enemy brain: один тик поведения врага
//!
//! Архитектура:
//! - Без ECS: работает с `&mut` на компоненты одного врага, поэтому
//!   тестируется напрямую (см. brain_tests.rs)
//! - Порядок тика: perception → memory → nav recovery → действие
//!   текущего состояния → transition (`next_state`) → on-enter эффекты
//! - Всё, что видно снаружи (атака, смена состояния), возвращается в
//!   `TickOutcome`; события пишет система

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::components::{AlertWindow, AttackTimer, EnemyState, LookAround, PursuitMemory};
use super::patrol::PatrolRoute;
use super::perception::{perceive, PerceptionSnapshot};
use super::transition::next_state;
use crate::components::{NavAgent, PathStatus};
use crate::config::EnemyConfig;
use crate::navigation::yaw_towards;
use crate::spatial::SpatialQuery;

/// Агент считается на surface, если walkable точка есть в этом радиусе
const ON_SURFACE_TOLERANCE: f32 = 0.5;

/// Slerp factors (× delta)
const LOOK_AROUND_TURN_RATE: f32 = 3.0;
const CHASE_TURN_RATE: f32 = 5.0;
const SCAN_TURN_RATE: f32 = 3.0;

/// Что brain знает о цели в этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetView {
    pub entity: Entity,
    pub position: Vec3,
}

/// Время симуляции (Time<Fixed>)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    pub now: f32,
    pub delta: f32,
}

/// Результат тика
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickOutcome {
    pub perception: PerceptionSnapshot,
    /// (from, to)
    pub transition: Option<(EnemyState, EnemyState)>,
    /// Урон атаки, выполненной в этом тике
    pub attack_damage: Option<f32>,
    /// Агент был вне surface: телепорт, остаток тика пропущен
    pub nav_recovered: bool,
}

/// Mutable view на компоненты одного врага
pub struct EnemyBrain<'a> {
    pub entity: Entity,
    pub config: &'a EnemyConfig,
    pub transform: &'a mut Transform,
    pub agent: &'a mut NavAgent,
    pub state: &'a mut EnemyState,
    pub memory: &'a mut PursuitMemory,
    pub timer: &'a mut AttackTimer,
    pub alert: &'a mut AlertWindow,
    pub route: &'a mut PatrolRoute,
}

impl EnemyBrain<'_> {
    pub fn tick<S, R>(&mut self, target: TargetView, clock: TickClock, rng: &mut R, spatial: &S) -> TickOutcome
    where
        S: SpatialQuery + ?Sized,
        R: Rng,
    {
        let perception = perceive(self.transform, target.entity, target.position, self.config, spatial);
        self.memory.observe(perception.visible, target.position, clock.now);

        let mut outcome = TickOutcome {
            perception,
            ..default()
        };

        if self.recover_if_off_surface(spatial) {
            outcome.nav_recovered = true;
            return outcome;
        }

        match *self.state {
            EnemyState::Patrolling { .. } => self.patrol(clock, rng),
            EnemyState::Chasing => self.chase(target, clock),
            EnemyState::Pursuing => self.pursue(clock, rng, spatial),
            EnemyState::Attacking => outcome.attack_damage = self.attack(target, clock),
        }

        if self.config.log_decisions {
            crate::log(&format!(
                "🧠 Enemy {:?} [{}] visible={} distance={:.2} remaining={:.2} path={:?}",
                self.entity,
                self.state,
                perception.visible,
                perception.distance,
                self.agent.remaining_distance(),
                self.agent.path_status()
            ));
        }

        if let Some(next) = next_state(self.state, &perception, self.memory, self.alert, clock.now, self.config) {
            let from = std::mem::replace(self.state, next.clone());
            self.enter_state(&from, clock.now);
            outcome.transition = Some((from, next));
        }

        outcome
    }

    /// On-enter эффекты нового состояния
    pub fn enter_state(&mut self, from: &EnemyState, now: f32) {
        match *self.state {
            EnemyState::Chasing => {
                self.agent.set_speed(self.config.chase_speed);
                self.agent.resume();
                self.agent.stopping_distance = self.config.chase_stopping_distance();
                if from.is_patrolling() {
                    self.alert.start(now);
                }
            }
            EnemyState::Attacking => {
                self.agent.stop();
            }
            EnemyState::Pursuing => {
                self.agent.set_speed(self.config.pursuit_speed);
                self.agent.resume();
                self.agent.stopping_distance = 0.0;
                self.agent.set_goal(self.memory.last_known_position());
            }
            EnemyState::Patrolling { .. } => {
                self.agent.set_speed(self.config.patrol_speed);
                self.agent.resume();
                self.agent.stopping_distance = 0.0;
                self.agent.set_goal(self.route.current_goal());
            }
        }
    }

    /// Вне surface → телепорт на ближайшую walkable точку
    ///
    /// true если тик надо пропустить. Если точки нет вовсе (surface
    /// пустая или слишком далеко): тик идёт как обычно.
    fn recover_if_off_surface<S: SpatialQuery + ?Sized>(&mut self, spatial: &S) -> bool {
        let position = self.transform.translation;
        if spatial.sample_navigable_point(position, ON_SURFACE_TOLERANCE).is_some() {
            return false;
        }

        match spatial.sample_navigable_point(position, self.config.nav_recovery_radius) {
            Some(recovered) => {
                self.transform.translation = recovered;
                if let Some(goal) = self.agent.goal() {
                    self.agent.set_goal(goal);
                }
                crate::log_warning(&format!(
                    "Enemy {:?} off navigable surface at {:?}, recovered to {:?}",
                    self.entity, position, recovered
                ));
                true
            }
            None => {
                if self.config.log_decisions {
                    crate::log_error(&format!(
                        "Enemy {:?}: no navigable point within {}m of {:?}",
                        self.entity, self.config.nav_recovery_radius, position
                    ));
                }
                false
            }
        }
    }

    fn patrol<R: Rng>(&mut self, clock: TickClock, rng: &mut R) {
        let alert = self.memory.time_since_last_seen(clock.now) < self.config.alert_cooldown;
        let speed = if alert {
            self.config.patrol_speed * self.config.alert_speed_multiplier
        } else {
            self.config.patrol_speed
        };
        self.agent.set_speed(speed);

        let EnemyState::Patrolling { look_around } = &mut *self.state else {
            return;
        };

        // Пауза на точке: стоим, крутим головой, потом к следующей точке
        if let Some(look) = look_around.as_mut() {
            self.agent.stop();
            let finished = look.advance(clock.delta);
            let facing = Quat::from_rotation_y(look.look_yaw());
            self.transform.rotation = self
                .transform
                .rotation
                .slerp(facing, (clock.delta * LOOK_AROUND_TURN_RATE).min(1.0));

            if finished {
                *look_around = None;
                self.agent.resume();
                self.route.advance();
                self.agent.set_goal(self.route.current_goal());
            }
            return;
        }

        self.agent.resume();

        if self.agent.path_status().is_broken() {
            crate::log(&format!(
                "Enemy {:?}: no path to patrol point {} ({:?}), trying next",
                self.entity,
                self.route.index(),
                self.agent.path_status()
            ));
            self.route.advance();
            self.agent.set_goal(self.route.current_goal());
            return;
        }

        let arrived = !self.agent.is_path_pending()
            && self.agent.remaining_distance() < self.config.patrol_arrival_threshold;
        if !arrived {
            return;
        }

        if rng.gen::<f32>() < self.config.look_around_chance {
            let duration = if self.config.look_around_max > self.config.look_around_min {
                rng.gen_range(self.config.look_around_min..self.config.look_around_max)
            } else {
                self.config.look_around_min
            };
            *look_around = Some(LookAround::new(duration));
            self.agent.stop();
        } else {
            self.route.advance();
            self.agent.set_goal(self.route.current_goal());
        }
    }

    fn chase(&mut self, target: TargetView, clock: TickClock) {
        self.agent.resume();

        if self.agent.path_status().is_broken() {
            self.agent.reset_path();
        }
        self.agent.set_goal(target.position);

        if let Some(facing) = yaw_towards(target.position - self.transform.translation) {
            self.transform.rotation = self
                .transform
                .rotation
                .slerp(facing, (clock.delta * CHASE_TURN_RATE).min(1.0));
        }
    }

    /// Sweep search вокруг последней известной позиции
    fn pursue<S, R>(&mut self, clock: TickClock, rng: &mut R, spatial: &S)
    where
        S: SpatialQuery + ?Sized,
        R: Rng,
    {
        let needs_new_point = !self.agent.is_path_pending()
            && (self.agent.remaining_distance() < self.config.pursuit_retarget_distance
                || self.agent.path_status() == PathStatus::Invalid);

        if needs_new_point {
            let point = sweep_point(
                self.memory.last_known_position(),
                self.transform.translation.y,
                clock.now,
                self.config,
            );
            if let Some(goal) = spatial.sample_navigable_point(point, self.config.pursuit_search_radius) {
                self.agent.set_goal(goal);
            }
        }

        if rng.gen::<f32>() < self.config.pursuit_scan_chance {
            let facing = Quat::from_rotation_y(rng.gen_range(0.0..TAU));
            self.transform.rotation = self
                .transform
                .rotation
                .slerp(facing, (clock.delta * SCAN_TURN_RATE).min(1.0));
        }
    }

    /// Стоим, смотрим на цель, бьём по cooldown
    fn attack(&mut self, target: TargetView, clock: TickClock) -> Option<f32> {
        self.agent.stop();

        if let Some(facing) = yaw_towards(target.position - self.transform.translation) {
            self.transform.rotation = facing;
        }

        if !self.timer.is_ready(clock.now, self.config.attack_cooldown) {
            return None;
        }

        self.timer.record(clock.now);
        Some(self.config.attack_damage)
    }
}

/// Точка поиска: offset радиуса `pursuit_search_radius`, вращающийся со
/// скоростью `pursuit_search_rate` °/сек вокруг `center`
pub fn sweep_point(center: Vec3, height: f32, now: f32, config: &EnemyConfig) -> Vec3 {
    let angle = (now * config.pursuit_search_rate).rem_euclid(360.0).to_radians();
    let offset = Vec3::new(angle.sin(), 0.0, angle.cos()) * config.pursuit_search_radius;
    let mut point = center + offset;
    point.y = height;
    point
}
