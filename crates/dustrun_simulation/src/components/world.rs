//! World компоненты: коллайдеры для LOS raycast, маркеры патруля

use bevy::prelude::*;

/// Axis-aligned коллайдер для scene index (LOS raycasts)
///
/// Box с центром в `translation + offset`. Rotation игнорируется,
/// для капсул акторов и стен-коробок этого достаточно.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct BodyCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl Default for BodyCollider {
    fn default() -> Self {
        Self::new(Vec3::splat(0.5), Vec3::ZERO)
    }
}

impl BodyCollider {
    pub fn new(half_extents: Vec3, offset: Vec3) -> Self {
        Self {
            half_extents: half_extents.abs(),
            offset,
        }
    }

    /// Робот-охотник: 1 × 2 × 1 м, стоит на земле
    pub fn enemy() -> Self {
        Self::new(Vec3::new(0.5, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0))
    }

    /// Робот-пылесос: 0.8 × 1.8 × 0.8 м
    pub fn player() -> Self {
        Self::new(Vec3::new(0.4, 0.9, 0.4), Vec3::new(0.0, 0.9, 0.0))
    }

    /// Стена/ящик заданного размера, центр в translation
    pub fn obstacle(half_extents: Vec3) -> Self {
        Self::new(half_extents, Vec3::ZERO)
    }

    /// World-space AABB (min, max)
    pub fn aabb(&self, translation: Vec3) -> (Vec3, Vec3) {
        let center = translation + self.offset;
        (center - self.half_extents, center + self.half_extents)
    }
}

/// Маркер точки патруля, расставленный в сцене
///
/// Маршрут идёт по возрастанию `order`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct PatrolMarker {
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_collider_stands_on_ground() {
        let (min, max) = BodyCollider::enemy().aabb(Vec3::new(2.0, 0.0, -1.0));
        assert_eq!(min, Vec3::new(1.5, 0.0, -1.5));
        assert_eq!(max, Vec3::new(2.5, 2.0, -0.5));
    }

    #[test]
    fn test_negative_extents_normalized() {
        let collider = BodyCollider::obstacle(Vec3::new(-1.0, 2.0, -3.0));
        assert_eq!(collider.half_extents, Vec3::new(1.0, 2.0, 3.0));
    }
}
