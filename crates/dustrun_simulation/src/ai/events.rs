//! AI Events: fire-and-forget уведомления от enemy brain
//!
//! Brain не знает, кто слушает: урон применяет combat, счёт/UI/звук
//! и любые внешние системы через EventReader.

use bevy::prelude::*;

use super::components::EnemyState;

/// Враг выполнил атаку (цель ещё не получила урон: это делает combat)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyAttacked {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: f32,
}

/// Смена состояния FSM врага
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyStateChanged {
    pub entity: Entity,
    pub from: EnemyState,
    pub to: EnemyState,
}
