//! Rapier backend для LOS raycasts (feature `rapier`)
//!
//! Raycast идёт через query pipeline bevy_rapier3d; sampling navigable точек
//! остаётся за NavSurface (у Rapier нет понятия walkable поверхности).

use bevy::prelude::*;
use bevy_rapier3d::prelude::{QueryFilter, RapierContext};

use super::{RayHit, SpatialQuery};
use crate::navigation::NavSurface;

pub struct RapierSpatialQuery<'a> {
    context: &'a RapierContext<'a>,
    surface: &'a NavSurface,
    /// Тело, из которого стреляем (не должно перекрывать свой же луч)
    exclude: Option<Entity>,
}

impl<'a> RapierSpatialQuery<'a> {
    pub fn new(context: &'a RapierContext<'a>, surface: &'a NavSurface) -> Self {
        Self {
            context,
            surface,
            exclude: None,
        }
    }

    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl SpatialQuery for RapierSpatialQuery<'_> {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        let mut filter = QueryFilter::default().exclude_sensors();
        if let Some(entity) = self.exclude {
            filter = filter.exclude_rigid_body(entity).exclude_collider(entity);
        }

        self.context
            .cast_ray(origin, direction, max_distance, true, filter)
            .map(|(entity, distance)| RayHit {
                entity,
                distance,
                point: origin + direction * distance,
            })
    }

    fn sample_navigable_point(&self, near: Vec3, radius: f32) -> Option<Vec3> {
        self.surface.sample(near, radius)
    }
}
