//! Perception: видит ли враг цель прямо сейчас
//!
//! Чистые функции: никаких side effects, можно звать каждый тик.
//!
//! Порядок проверок:
//! 1. distance ≤ attack_range × close_range_factor → видим (auto-detect вплотную)
//! 2. горизонтальный угол ≥ fov/2 → не видим (луч не бросаем)
//! 3. LOS raycast с высоты глаз до центра цели, max = detection_range;
//!    видим только если первое попадание: сама цель

use bevy::prelude::*;

use crate::config::EnemyConfig;
use crate::spatial::SpatialQuery;

/// Результат восприятия за тик
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct PerceptionSnapshot {
    pub visible: bool,
    pub distance: f32,
    pub target_position: Vec3,
}

impl Default for PerceptionSnapshot {
    fn default() -> Self {
        Self {
            visible: false,
            distance: f32::INFINITY,
            target_position: Vec3::ZERO,
        }
    }
}

/// Последний snapshot восприятия (пишет brain, читают diagnostics/тесты)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Perception {
    pub last: PerceptionSnapshot,
}

pub fn distance_to(agent_position: Vec3, target_position: Vec3) -> f32 {
    agent_position.distance(target_position)
}

/// Горизонтальный угол (градусы) между forward агента и направлением на цель
pub fn horizontal_angle_to(agent: &Transform, target_position: Vec3) -> f32 {
    let forward = agent.forward();
    let forward = Vec3::new(forward.x, 0.0, forward.z);
    let to_target = target_position - agent.translation;
    let to_target = Vec3::new(to_target.x, 0.0, to_target.z);

    if to_target.length_squared() <= f32::EPSILON || forward.length_squared() <= f32::EPSILON {
        return 0.0;
    }

    forward.angle_between(to_target).to_degrees()
}

/// Видит ли агент цель
pub fn can_see_target<S: SpatialQuery + ?Sized>(
    agent: &Transform,
    target: Entity,
    target_position: Vec3,
    config: &EnemyConfig,
    spatial: &S,
) -> bool {
    let distance = distance_to(agent.translation, target_position);

    if distance <= config.close_detection_range() {
        return true;
    }

    if horizontal_angle_to(agent, target_position) >= config.field_of_view * 0.5 {
        return false;
    }

    if distance > config.detection_range {
        return false;
    }

    let eye = agent.translation + Vec3::Y * config.eye_height;
    let aim = target_position + Vec3::Y * config.target_aim_height;
    let direction = aim - eye;

    match spatial.raycast(eye, direction, config.detection_range) {
        Some(hit) => hit.entity == target,
        None => false,
    }
}

/// Полный snapshot за тик
pub fn perceive<S: SpatialQuery + ?Sized>(
    agent: &Transform,
    target: Entity,
    target_position: Vec3,
    config: &EnemyConfig,
    spatial: &S,
) -> PerceptionSnapshot {
    PerceptionSnapshot {
        visible: can_see_target(agent, target, target_position, config, spatial),
        distance: distance_to(agent.translation, target_position),
        target_position,
    }
}
