//! Базовые компоненты акторов: Enemy, Player, Health

use bevy::prelude::*;

use crate::ai::{AlertWindow, AttackTimer, EnemyState, Perception, PursuitMemory};
use crate::components::{BodyCollider, NavAgent};
use crate::config::EnemyConfig;

/// Враг-охотник (патруль → погоня → поиск → атака)
///
/// Required Components подтягивают всё состояние AI.
/// PatrolRoute вставляется системой init_patrol_routes на первом тике.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    EnemyConfig,
    EnemyState,
    PursuitMemory,
    AttackTimer,
    AlertWindow,
    Perception,
    NavAgent,
    BodyCollider = BodyCollider::enemy()
)]
pub struct Enemy;

/// Робот-пылесос игрока (цель врага)
///
/// Ровно один в сцене; если его нет: AI врагов заморожен.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform, Health, BodyCollider = BodyCollider::player())]
pub struct Player;

/// Здоровье
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Возвращает фактически снятое здоровье
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount.max(0.0)).clamp(0.0, self.max);
        before - self.current
    }

    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount.max(0.0)).clamp(0.0, self.max);
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100.0);
        assert_eq!(health.current, 100.0);

        let dealt = health.take_damage(15.0);
        assert_eq!(dealt, 15.0);
        assert_eq!(health.current, 85.0);
        assert!(health.is_alive());

        let dealt = health.take_damage(200.0); // Clamp к нулю
        assert_eq!(dealt, 85.0);
        assert_eq!(health.current, 0.0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_heal() {
        let mut health = Health::new(100.0);
        health.take_damage(50.0);
        assert_eq!(health.fraction(), 0.5);

        health.heal(30.0);
        assert_eq!(health.current, 80.0);

        health.heal(100.0); // Clamp к max
        assert_eq!(health.current, 100.0);
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut health = Health::new(50.0);
        assert_eq!(health.take_damage(-10.0), 0.0);
        assert_eq!(health.current, 50.0);
    }
}
