//! Damage application система
//!
//! Обрабатывает EnemyAttacked события: снимает Health цели и сообщает
//! результат (для UI полосок здоровья, звуков, счёта).

use bevy::prelude::*;

use crate::ai::EnemyAttacked;
use crate::components::Health;

/// Событие: урон нанесен
///
/// Генерируется после применения damage к Health.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TargetDamaged {
    pub attacker: Entity,
    pub target: Entity,
    /// Фактически снятое здоровье (≤ урона атаки)
    pub damage: f32,
    pub remaining_health: f32,
}

/// Событие: здоровье цели упало до нуля
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TargetDefeated {
    pub target: Entity,
    pub killer: Entity,
}

/// Система: apply damage от EnemyAttacked событий
///
/// 1. Читаем EnemyAttacked
/// 2. Применяем damage к Health (мёртвых не бьём)
/// 3. Генерируем TargetDamaged и TargetDefeated события
pub fn apply_enemy_attacks(
    mut attacks: EventReader<EnemyAttacked>,
    mut targets: Query<&mut Health>,
    mut damaged_events: EventWriter<TargetDamaged>,
    mut defeated_events: EventWriter<TargetDefeated>,
) {
    for attack in attacks.read() {
        let Ok(mut health) = targets.get_mut(attack.target) else {
            crate::log_warning(&format!(
                "EnemyAttacked: target {:?} has no Health component",
                attack.target
            ));
            continue;
        };

        if !health.is_alive() {
            continue;
        }

        let dealt = health.take_damage(attack.damage);

        damaged_events.write(TargetDamaged {
            attacker: attack.attacker,
            target: attack.target,
            damage: dealt,
            remaining_health: health.current,
        });

        if !health.is_alive() {
            crate::log_info(&format!(
                "💀 Target {:?} defeated by {:?}",
                attack.target, attack.attacker
            ));
            defeated_events.write(TargetDefeated {
                target: attack.target,
                killer: attack.attacker,
            });
        }
    }
}
