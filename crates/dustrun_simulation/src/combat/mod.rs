//! Combat module: применение урона от атак врагов
//!
//! ECS ответственность:
//! - Game state: Health цели
//! - Events: TargetDamaged, TargetDefeated
//!
//! Решение "когда бить" принимает enemy brain (ai), здесь только
//! последствия.

use bevy::prelude::*;

pub mod damage;


// Re-export основных типов
pub use damage::{apply_enemy_attacks, TargetDamaged, TargetDefeated};

use crate::SimulationSet;

/// Combat Plugin
///
/// Регистрирует события урона и `apply_enemy_attacks` в
/// `SimulationSet::Resolve` (после решений AI в том же тике).
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<TargetDamaged>()
            .add_event::<TargetDefeated>();

        app.add_systems(
            FixedUpdate,
            damage::apply_enemy_attacks.in_set(SimulationSet::Resolve),
        );
    }
}
