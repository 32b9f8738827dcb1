//! Enemy brain systems (per-tick decision for every enemy).

use bevy::ecs::query::QueryData;
use bevy::prelude::*;

use crate::ai::brain::{EnemyBrain, TargetView, TickClock};
use crate::ai::components::{AlertWindow, AttackTimer, EnemyState, PursuitMemory};
use crate::ai::events::{EnemyAttacked, EnemyStateChanged};
use crate::ai::patrol::PatrolRoute;
use crate::ai::perception::{Perception, PerceptionSnapshot};
use crate::components::{Enemy, NavAgent, Player};
use crate::config::EnemyConfig;
use crate::navigation::NavSurface;
use crate::spatial::{SceneGeometry, SceneQuery, SpatialQuery};
use crate::DeterministicRng;

/// Как часто напоминать в лог, что цели нет (в тиках)
const MISSING_TARGET_LOG_INTERVAL: u32 = 300;

/// Всё, что brain меняет у врага
#[derive(QueryData)]
#[query_data(mutable)]
pub struct EnemyBrainQuery {
    entity: Entity,
    config: &'static EnemyConfig,
    transform: &'static mut Transform,
    agent: &'static mut NavAgent,
    state: &'static mut EnemyState,
    memory: &'static mut PursuitMemory,
    timer: &'static mut AttackTimer,
    alert: &'static mut AlertWindow,
    route: &'static mut PatrolRoute,
    perception: &'static mut Perception,
}

/// Цель (единственный Player) или None: тогда тик пропускается
fn find_target(
    players: &Query<(Entity, &Transform), (With<Player>, Without<Enemy>)>,
    missing_ticks: &mut u32,
) -> Option<TargetView> {
    match players.single() {
        Ok((entity, transform)) => {
            if *missing_ticks > 0 {
                crate::log(&format!("🎯 Target {:?} found, enemy AI resumed", entity));
            }
            *missing_ticks = 0;
            Some(TargetView {
                entity,
                position: transform.translation,
            })
        }
        Err(error) => {
            if *missing_ticks % MISSING_TARGET_LOG_INTERVAL == 0 {
                crate::log(&format!("⏸️ Enemy AI idle: no single target ({})", error));
            }
            *missing_ticks = missing_ticks.wrapping_add(1);
            None
        }
    }
}

/// Цели нет: сбрасываем perception, чтобы overlay не показывал старые данные
fn forget_target(enemies: &mut Query<EnemyBrainQuery, With<Enemy>>) {
    for mut enemy in enemies.iter_mut() {
        enemy.perception.last = PerceptionSnapshot::default();
    }
}

/// Тик всех врагов против одной цели
///
/// `spatial_for` строит spatial query для конкретного врага (Rapier
/// backend исключает коллайдер самого врага).
fn run_enemy_brains<S, F>(
    enemies: &mut Query<EnemyBrainQuery, With<Enemy>>,
    target: TargetView,
    clock: TickClock,
    rng: &mut DeterministicRng,
    spatial_for: F,
    attacks: &mut EventWriter<EnemyAttacked>,
    transitions: &mut EventWriter<EnemyStateChanged>,
) where
    S: SpatialQuery,
    F: Fn(Entity) -> S,
{
    for mut enemy in enemies.iter_mut() {
        let spatial = spatial_for(enemy.entity);

        let mut brain = EnemyBrain {
            entity: enemy.entity,
            config: enemy.config,
            transform: &mut *enemy.transform,
            agent: &mut *enemy.agent,
            state: &mut *enemy.state,
            memory: &mut *enemy.memory,
            timer: &mut *enemy.timer,
            alert: &mut *enemy.alert,
            route: &mut *enemy.route,
        };
        let outcome = brain.tick(target, clock, &mut rng.rng, &spatial);

        enemy.perception.last = outcome.perception;

        if outcome.nav_recovered {
            continue;
        }

        if let Some((from, to)) = outcome.transition {
            crate::log(&format!(
                "🔄 Enemy {:?}: {} → {} (distance {:.1}, visible {})",
                enemy.entity, from, to, outcome.perception.distance, outcome.perception.visible
            ));
            transitions.write(EnemyStateChanged {
                entity: enemy.entity,
                from,
                to,
            });
        }

        if let Some(damage) = outcome.attack_damage {
            crate::log(&format!(
                "⚔️ Enemy {:?} attacks {:?} for {} damage",
                enemy.entity, target.entity, damage
            ));
            attacks.write(EnemyAttacked {
                attacker: enemy.entity,
                target: target.entity,
                damage,
            });
        }
    }
}

/// Система: enemy brain tick (scene index backend)
pub fn enemy_brain_tick(
    mut enemies: Query<EnemyBrainQuery, With<Enemy>>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Enemy>)>,
    geometry: Res<SceneGeometry>,
    surface: Res<NavSurface>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut attacks: EventWriter<EnemyAttacked>,
    mut transitions: EventWriter<EnemyStateChanged>,
    mut missing_ticks: Local<u32>,
) {
    let Some(target) = find_target(&players, &mut missing_ticks) else {
        forget_target(&mut enemies);
        return;
    };

    let clock = TickClock {
        now: time.elapsed_secs(),
        delta: time.delta_secs(),
    };

    run_enemy_brains(
        &mut enemies,
        target,
        clock,
        &mut rng,
        |_| SceneQuery::new(&geometry, &surface),
        &mut attacks,
        &mut transitions,
    );
}

/// Система: enemy brain tick (Rapier backend)
#[cfg(feature = "rapier")]
pub fn enemy_brain_tick_rapier(
    mut enemies: Query<EnemyBrainQuery, With<Enemy>>,
    players: Query<(Entity, &Transform), (With<Player>, Without<Enemy>)>,
    rapier: bevy_rapier3d::prelude::ReadRapierContext,
    surface: Res<NavSurface>,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut attacks: EventWriter<EnemyAttacked>,
    mut transitions: EventWriter<EnemyStateChanged>,
    mut missing_ticks: Local<u32>,
) {
    use crate::spatial::RapierSpatialQuery;

    let Some(target) = find_target(&players, &mut missing_ticks) else {
        forget_target(&mut enemies);
        return;
    };

    let Ok(context) = rapier.single() else {
        crate::log_warning("Enemy AI: no Rapier context, skipping tick");
        return;
    };

    let clock = TickClock {
        now: time.elapsed_secs(),
        delta: time.delta_secs(),
    };

    run_enemy_brains(
        &mut enemies,
        target,
        clock,
        &mut rng,
        |entity| RapierSpatialQuery::new(&context, &surface).excluding(entity),
        &mut attacks,
        &mut transitions,
    );
}
