//! DUSTRUN Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: охотник-робот патрулирует арену, замечает
//! пылесос игрока, преследует, ищет потерянную цель и атакует.
//!
//! Архитектура:
//! - ECS = strategic layer (perception, FSM решения, урон)
//! - Locomotion driver = tactical layer (движение по NavSurface); встроенный
//!   headless driver или внешний движок через `NavAgent`
//!
//! Порядок тика (FixedUpdate, 60Hz):
//! Sense (scene index) → Decide (enemy AI) → Resolve (урон) → Locomotion

use bevy::ecs::event::event_update_system;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod navigation;
pub mod spatial;

// Re-export базовых компонентов для удобства
pub use ai::{
    EnemyAiPlugin, EnemyAttacked, EnemyDiagnostics, EnemyState, EnemyStateChanged, PatrolRoute,
    Perception, PursuitMemory, SpatialBackend,
};
pub use combat::{CombatPlugin, TargetDamaged, TargetDefeated};
pub use components::*;
pub use config::{ConfigError, EnemyConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use navigation::{NavRegion, NavSurface, NavigationPlugin};
pub use spatial::{SceneGeometry, SpatialQuery};

/// Фазы тика симуляции (FixedUpdate, выполняются по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Снимок мира для запросов (scene index)
    Sense,
    /// AI решения
    Decide,
    /// Последствия решений (урон)
    Resolve,
    /// Исполнение движения
    Locomotion,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin {
    pub spatial_backend: SpatialBackend,
    /// false: движением управляет внешний движок через NavAgent
    pub builtin_driver: bool,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self {
            spatial_backend: SpatialBackend::default(),
            builtin_driver: true,
        }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
        if !app.world().contains_resource::<Time<Fixed>>() {
            app.insert_resource(Time::<Fixed>::from_hz(60.0));
        }
        // Детерминистичный RNG (seed по умолчанию, если app не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Sense,
                SimulationSet::Decide,
                SimulationSet::Resolve,
                SimulationSet::Locomotion,
            )
                .chain(),
        )
        .init_resource::<SceneGeometry>()
        .register_type::<EnemyConfig>()
        .register_type::<NavAgent>()
        .register_type::<Health>()
        .add_systems(
            FixedUpdate,
            spatial::rebuild_scene_geometry.in_set(SimulationSet::Sense),
        )
        // Подсистемы (ECS strategic layer)
        .add_plugins((
            NavigationPlugin {
                builtin_driver: self.builtin_driver,
            },
            EnemyAiPlugin {
                backend: self.spatial_backend,
            },
            CombatPlugin,
        ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Один fixed тик с заданным шагом времени
///
/// Время двигаем вручную: результат не зависит от wall clock.
/// После тика event буферы ротируются (как в `First` при `app.update()`):
/// событие живёт два тика, reader'ы должны читать каждый тик.
pub fn step_fixed(app: &mut App, delta: Duration) {
    let world = app.world_mut();
    world.resource_mut::<Time<Fixed>>().advance_by(delta);
    world.run_schedule(FixedUpdate);

    if let Err(error) = world.run_system_cached(event_update_system) {
        log_error(&format!("Event buffers not rotated: {}", error));
    }
}

/// Snapshot мира для сравнения детерминизма
/// (упрощённая версия через Debug формат)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    // Собираем все компоненты в детерминированный формат
    let mut snapshot = Vec::new();
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
