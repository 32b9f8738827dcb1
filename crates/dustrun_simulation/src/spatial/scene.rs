//! Scene index: AABB коллайдеры всех BodyCollider, пересобирается каждый тик
//!
//! Raycast = slab test по всем коробкам (сцены маленькие: враг, игрок, стены).

use bevy::prelude::*;

use super::{RayHit, SpatialQuery};
use crate::components::BodyCollider;
use crate::navigation::NavSurface;

const PARALLEL_EPSILON: f32 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
struct SceneBox {
    entity: Entity,
    min: Vec3,
    max: Vec3,
}

/// Snapshot коллайдеров сцены (resource)
#[derive(Resource, Debug, Clone, Default)]
pub struct SceneGeometry {
    boxes: Vec<SceneBox>,
}

impl SceneGeometry {
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    pub fn insert(&mut self, entity: Entity, collider: &BodyCollider, translation: Vec3) {
        let (min, max) = collider.aabb(translation);
        self.boxes.push(SceneBox { entity, min, max });
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Raycast по коробкам; `direction` нормализуется
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        self.boxes
            .iter()
            .filter_map(|scene_box| {
                ray_enter_distance(origin, direction, scene_box.min, scene_box.max)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| RayHit {
                        entity: scene_box.entity,
                        distance,
                        point: origin + direction * distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Дистанция входа луча в AABB
///
/// None если промах, коробка позади, или origin внутри коробки.
fn ray_enter_distance(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < PARALLEL_EPSILON {
            // Луч параллелен slab: промах, если origin вне него
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let t1 = (min[axis] - o) / d;
        let t2 = (max[axis] - o) / d;
        t_enter = t_enter.max(t1.min(t2));
        t_exit = t_exit.min(t1.max(t2));

        if t_enter > t_exit {
            return None;
        }
    }

    // t_enter < 0 → origin внутри (или коробка позади)
    if t_enter < 0.0 || !t_enter.is_finite() {
        return None;
    }
    Some(t_enter)
}

/// SpatialQuery поверх scene index + NavSurface
pub struct SceneQuery<'a> {
    pub geometry: &'a SceneGeometry,
    pub surface: &'a NavSurface,
}

impl<'a> SceneQuery<'a> {
    pub fn new(geometry: &'a SceneGeometry, surface: &'a NavSurface) -> Self {
        Self { geometry, surface }
    }
}

impl SpatialQuery for SceneQuery<'_> {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.geometry.raycast(origin, direction, max_distance)
    }

    fn sample_navigable_point(&self, near: Vec3, radius: f32) -> Option<Vec3> {
        self.surface.sample(near, radius)
    }
}

/// Система: пересборка scene index из BodyCollider
pub fn rebuild_scene_geometry(
    colliders: Query<(Entity, &BodyCollider, &Transform)>,
    mut geometry: ResMut<SceneGeometry>,
) {
    geometry.clear();
    for (entity, collider, transform) in colliders.iter() {
        geometry.insert(entity, collider, transform.translation);
    }
}
