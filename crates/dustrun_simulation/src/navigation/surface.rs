//! Navigable surface: union прямоугольных walkable регионов
//!
//! Упрощённый NavMesh для headless симуляции: пол уровня задаётся набором
//! axis-aligned прямоугольников (XZ) с высотой пола. Связность регионов
//! не проверяется: перекрывающиеся/соседние регионы считаются одним полом.

use bevy::prelude::*;

/// Walkable прямоугольник в плоскости XZ
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct NavRegion {
    /// (x, z) минимум
    pub min: Vec2,
    /// (x, z) максимум
    pub max: Vec2,
    /// Высота пола (Y)
    pub height: f32,
}

impl NavRegion {
    pub fn new(a: Vec2, b: Vec2, height: f32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            height,
        }
    }

    /// Квадратная арена с центром `center` (x, z)
    pub fn square(center: Vec2, half_size: f32, height: f32) -> Self {
        let half = Vec2::splat(half_size.abs());
        Self::new(center - half, center + half, height)
    }

    pub fn contains_xz(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.y
            && point.z <= self.max.y
    }

    /// Ближайшая точка региона (на высоте пола)
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            self.height,
            point.z.clamp(self.min.y, self.max.y),
        )
    }
}

/// Navigable surface уровня (resource)
#[derive(Resource, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct NavSurface {
    pub regions: Vec<NavRegion>,
}

impl NavSurface {
    pub fn new(regions: Vec<NavRegion>) -> Self {
        Self { regions }
    }

    /// Одна квадратная арена (тесты, headless demo)
    pub fn open_field(half_size: f32) -> Self {
        Self::new(vec![NavRegion::square(Vec2::ZERO, half_size, 0.0)])
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Точка над walkable регионом (по XZ)
    pub fn contains(&self, point: Vec3) -> bool {
        self.regions.iter().any(|region| region.contains_xz(point))
    }

    /// Высота пола под точкой (первый подходящий регион)
    pub fn height_at(&self, point: Vec3) -> Option<f32> {
        self.regions
            .iter()
            .find(|region| region.contains_xz(point))
            .map(|region| region.height)
    }

    /// Ближайшая точка surface (3D расстояние), None если surface пустая
    pub fn closest_point(&self, point: Vec3) -> Option<Vec3> {
        self.regions
            .iter()
            .map(|region| region.closest_point(point))
            .min_by(|a, b| a.distance_squared(point).total_cmp(&b.distance_squared(point)))
    }

    /// Ближайшая walkable точка в радиусе `radius` от `near`
    pub fn sample(&self, near: Vec3, radius: f32) -> Option<Vec3> {
        self.closest_point(near)
            .filter(|point| point.distance(near) <= radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> NavSurface {
        NavSurface::new(vec![
            NavRegion::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0), 0.0),
            NavRegion::new(Vec2::new(20.0, 0.0), Vec2::new(30.0, 10.0), 1.0),
        ])
    }

    #[test]
    fn test_contains_and_height() {
        let surface = two_rooms();
        assert!(surface.contains(Vec3::new(5.0, 3.0, 5.0)));
        assert!(!surface.contains(Vec3::new(15.0, 0.0, 5.0)));
        assert_eq!(surface.height_at(Vec3::new(25.0, 0.0, 5.0)), Some(1.0));
        assert_eq!(surface.height_at(Vec3::new(15.0, 0.0, 5.0)), None);
    }

    #[test]
    fn test_closest_point_picks_nearest_region() {
        let surface = two_rooms();
        // Ближе к первой комнате
        let closest = surface.closest_point(Vec3::new(12.0, 0.0, 5.0)).unwrap();
        assert_eq!(closest, Vec3::new(10.0, 0.0, 5.0));
        // Ближе ко второй
        let closest = surface.closest_point(Vec3::new(19.0, 1.0, 5.0)).unwrap();
        assert_eq!(closest, Vec3::new(20.0, 1.0, 5.0));
    }

    #[test]
    fn test_sample_respects_radius() {
        let surface = two_rooms();
        assert_eq!(
            surface.sample(Vec3::new(12.0, 0.0, 5.0), 5.0),
            Some(Vec3::new(10.0, 0.0, 5.0))
        );
        assert_eq!(surface.sample(Vec3::new(15.0, 0.0, 50.0), 5.0), None);
    }

    #[test]
    fn test_empty_surface_samples_nothing() {
        let surface = NavSurface::default();
        assert!(surface.is_empty());
        assert_eq!(surface.closest_point(Vec3::ZERO), None);
        assert_eq!(surface.sample(Vec3::ZERO, 100.0), None);
    }
}
