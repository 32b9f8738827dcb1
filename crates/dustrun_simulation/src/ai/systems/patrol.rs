//! Patrol route initialization.

use bevy::prelude::*;

use crate::ai::patrol::PatrolRoute;
use crate::components::{Enemy, NavAgent, PatrolMarker};
use crate::config::EnemyConfig;
use crate::navigation::NavSurface;
use crate::spatial::{SceneGeometry, SceneQuery};
use crate::DeterministicRng;

/// Система: строит PatrolRoute для новых врагов
///
/// Маркеры сцены (по `order`) общие для всех врагов; без маркеров каждый
/// враг генерирует свой маршрут вокруг точки спавна. Сразу после
/// построения враг получает patrol speed и первую цель.
pub fn init_patrol_routes(
    mut commands: Commands,
    mut enemies: Query<(Entity, &Transform, &EnemyConfig, &mut NavAgent), (With<Enemy>, Without<PatrolRoute>)>,
    markers: Query<(&PatrolMarker, &Transform)>,
    geometry: Res<SceneGeometry>,
    surface: Res<NavSurface>,
    mut rng: ResMut<DeterministicRng>,
) {
    if enemies.is_empty() {
        return;
    }

    let mut ordered: Vec<(u32, Vec3)> = markers
        .iter()
        .map(|(marker, transform)| (marker.order, transform.translation))
        .collect();
    ordered.sort_by_key(|(order, _)| *order);
    let marker_points: Vec<Vec3> = ordered.into_iter().map(|(_, position)| position).collect();
    let markers = (!marker_points.is_empty()).then_some(marker_points.as_slice());

    let spatial = SceneQuery::new(&geometry, &surface);

    for (entity, transform, config, mut agent) in enemies.iter_mut() {
        let route = PatrolRoute::initialize(markers, transform.translation, config, &mut rng.rng, &spatial);

        agent.set_speed(config.patrol_speed);
        agent.stopping_distance = 0.0;
        agent.resume();
        agent.set_goal(route.current_goal());

        crate::log(&format!(
            "🗺️ Enemy {:?}: patrol route with {} points ({}), first goal {:?}",
            entity,
            route.len(),
            if markers.is_some() { "scene markers" } else { "generated" },
            route.current_goal()
        ));

        commands.entity(entity).insert(route);
    }
}
