//! Enemy AI: perception, patrol, pursuit memory, FSM
//!
//! Архитектура:
//! - `perception` / `transition` / `patrol`: чистые функции и данные
//! - `brain`: один тик одного врага поверх `&mut` компонентов
//! - `systems`: ECS обвязка (маршруты, тик всех врагов, события)
//! - `diagnostics`: опциональный observer для debug overlay

use bevy::prelude::*;

pub mod brain;
pub mod components;
pub mod diagnostics;
pub mod events;
pub mod patrol;
pub mod perception;
pub mod systems;
pub mod transition;


// Re-export основных типов
pub use brain::{sweep_point, EnemyBrain, TargetView, TickClock, TickOutcome};
pub use components::{AlertWindow, AttackTimer, EnemyState, LookAround, PursuitMemory};
pub use diagnostics::{update_enemy_diagnostics, EnemyDiagnostics};
pub use events::{EnemyAttacked, EnemyStateChanged};
pub use patrol::PatrolRoute;
pub use perception::{can_see_target, distance_to, perceive, Perception, PerceptionSnapshot};
pub use transition::next_state;

use crate::SimulationSet;

/// Кто отвечает на LOS raycasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpatialBackend {
    /// Встроенный scene index (BodyCollider AABB)
    #[default]
    Scene,
    /// Query pipeline bevy_rapier3d
    #[cfg(feature = "rapier")]
    Rapier,
}

/// Enemy AI Plugin
///
/// Регистрирует AI системы в FixedUpdate (`SimulationSet::Decide`).
/// Порядок выполнения:
/// 1. init_patrol_routes: маршрут + первая цель для новых врагов
/// 2. enemy_brain_tick: perception → action → transition
/// 3. update_enemy_diagnostics: overlay данные (если есть компонент)
#[derive(Default)]
pub struct EnemyAiPlugin {
    pub backend: SpatialBackend,
}

impl Plugin for EnemyAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyAttacked>()
            .add_event::<EnemyStateChanged>()
            .register_type::<EnemyState>()
            .register_type::<PursuitMemory>()
            .register_type::<AttackTimer>()
            .register_type::<AlertWindow>()
            .register_type::<PatrolRoute>()
            .register_type::<Perception>()
            .register_type::<EnemyDiagnostics>();

        match self.backend {
            SpatialBackend::Scene => {
                app.add_systems(
                    FixedUpdate,
                    (
                        systems::init_patrol_routes,
                        systems::enemy_brain_tick,
                        update_enemy_diagnostics,
                    )
                        .chain() // Последовательное выполнение для детерминизма
                        .in_set(SimulationSet::Decide),
                );
            }
            #[cfg(feature = "rapier")]
            SpatialBackend::Rapier => {
                app.add_systems(
                    FixedUpdate,
                    (
                        systems::init_patrol_routes,
                        systems::enemy_brain_tick_rapier,
                        update_enemy_diagnostics,
                    )
                        .chain()
                        .in_set(SimulationSet::Decide),
                );
            }
        }
    }
}
