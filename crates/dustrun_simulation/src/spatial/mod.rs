//! Spatial queries: line-of-sight raycasts + navigable point sampling
//!
//! AI не знает, кто отвечает на запросы: встроенный scene index
//! (`SceneQuery`) или физический движок (`rapier` feature).

use bevy::prelude::*;

pub mod scene;
#[cfg(feature = "rapier")]
pub mod rapier;

pub use scene::{rebuild_scene_geometry, SceneGeometry, SceneQuery};
#[cfg(feature = "rapier")]
pub use rapier::RapierSpatialQuery;

/// Первое пересечение луча
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f32,
    pub point: Vec3,
}

/// Контракт spatial query service
pub trait SpatialQuery {
    /// Первое пересечение луча в пределах `max_distance`.
    /// Коллайдер, внутри которого начинается луч, не считается.
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;

    /// Ближайшая navigable точка в радиусе `radius` от `near`
    fn sample_navigable_point(&self, near: Vec3, radius: f32) -> Option<Vec3>;
}
