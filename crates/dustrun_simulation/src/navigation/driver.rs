//! Headless locomotion driver
//!
//! Исполняет intent из NavAgent: пересчитывает путь при новой цели,
//! двигает Transform по прямой к концу пути с заданной скоростью,
//! держит агента на высоте пола и поворачивает по направлению движения.
//!
//! Внешний движок (с настоящим NavMesh) может заменить этот driver,
//! см. `NavigationPlugin::builtin_driver`.

use bevy::prelude::*;

use super::surface::NavSurface;
use crate::components::{NavAgent, PathStatus};

/// Минимальный шаг, ниже которого считаем что стоим
const MIN_STEP: f32 = 1e-4;

/// Расчёт пути к цели по surface
///
/// - Цель над surface → Valid, конец пути = цель на высоте пола
/// - Цель вне surface → Partial, конец пути = ближайшая точка surface
/// - Surface пустая → Invalid
pub fn resolve_path(surface: &NavSurface, goal: Vec3) -> (PathStatus, Option<Vec3>) {
    if let Some(height) = surface.height_at(goal) {
        return (PathStatus::Valid, Some(Vec3::new(goal.x, height, goal.z)));
    }

    match surface.closest_point(goal) {
        Some(end) => (PathStatus::Partial, Some(end)),
        None => (PathStatus::Invalid, None),
    }
}

/// Горизонтальная дистанция (XZ)
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x - b.x, a.z - b.z).length()
}

/// Yaw-поворот, смотрящий вдоль `direction` (Bevy forward = -Z)
pub fn yaw_towards(direction: Vec3) -> Option<Quat> {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length_squared() < MIN_STEP * MIN_STEP {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Один шаг агента (без ECS: тестируется напрямую)
pub fn step_agent(transform: &mut Transform, agent: &mut NavAgent, surface: &NavSurface, delta: f32) {
    if agent.is_path_pending() {
        match agent.goal() {
            Some(goal) => {
                let (status, end) = resolve_path(surface, goal);
                agent.report_path(status, end);
            }
            None => agent.report_path(PathStatus::Valid, None),
        }
    }

    let Some(end) = agent.path_end() else {
        if agent.path_status() != PathStatus::Invalid {
            agent.report_remaining(0.0);
        }
        return;
    };

    let position = transform.translation;
    let remaining = horizontal_distance(position, end);

    if !agent.is_stopped() && remaining > agent.stopping_distance {
        let travel = remaining - agent.stopping_distance;
        let step = (agent.speed() * delta).min(travel);

        if step > MIN_STEP {
            let direction = Vec3::new(end.x - position.x, 0.0, end.z - position.z) / remaining;
            let mut next = position + direction * step;

            // Держимся surface (KeepOnGround)
            match surface.height_at(next) {
                Some(height) => next.y = height,
                None => {
                    if let Some(clamped) = surface.closest_point(next) {
                        next = clamped;
                    }
                }
            }

            transform.translation = next;

            if agent.update_rotation {
                if let Some(rotation) = yaw_towards(direction) {
                    transform.rotation = rotation;
                }
            }
        }
    }

    agent.report_remaining(horizontal_distance(transform.translation, end));
}

/// Система: движение всех NavAgent по NavSurface
pub fn drive_nav_agents(
    mut agents: Query<(&mut Transform, &mut NavAgent)>,
    surface: Res<NavSurface>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut agent) in agents.iter_mut() {
        step_agent(&mut transform, &mut agent, &surface, delta);
    }
}
