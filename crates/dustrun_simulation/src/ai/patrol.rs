//! Patrol route: циклический маршрут из waypoints
//!
//! Маршрут строится один раз при спавне:
//! - есть PatrolMarker в сцене → их позиции как есть (по `order`)
//! - нет → N случайных точек вокруг spawn, спроецированных на surface
//!
//! Дальше меняется только курсор.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::EnemyConfig;
use crate::spatial::SpatialQuery;

/// Диапазон случайного количества точек [MIN, MAX)
const MIN_GENERATED_POINTS: usize = 3;
const MAX_GENERATED_POINTS: usize = 6;

/// Маршрут патруля
///
/// Инвариант: `points` не пустой, `index < points.len()`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    points: Vec<Vec3>,
    index: usize,
}

impl PatrolRoute {
    /// Маршрут из готовых точек; пустой список → одна точка `fallback`
    pub fn from_points(points: Vec<Vec3>, fallback: Vec3) -> Self {
        let points = if points.is_empty() { vec![fallback] } else { points };
        Self { points, index: 0 }
    }

    /// Построить маршрут для врага
    pub fn initialize<S, R>(
        markers: Option<&[Vec3]>,
        spawn: Vec3,
        config: &EnemyConfig,
        rng: &mut R,
        spatial: &S,
    ) -> Self
    where
        S: SpatialQuery + ?Sized,
        R: Rng,
    {
        if let Some(markers) = markers.filter(|markers| !markers.is_empty()) {
            return Self::from_points(markers.to_vec(), spawn);
        }

        let count = config
            .patrol_point_count
            .unwrap_or_else(|| rng.gen_range(MIN_GENERATED_POINTS..MAX_GENERATED_POINTS));

        let points = (0..count)
            .map(|_| generate_point(spawn, config, rng, spatial))
            .collect();

        Self::from_points(points, spawn)
    }

    pub fn current_goal(&self) -> Vec3 {
        self.points[self.index]
    }

    /// Следующая точка (по кругу)
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % self.points.len();
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Всегда false: маршрут не бывает пустым
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }
}

/// Случайная точка в кольце [radius_min, radius_max) вокруг spawn
fn generate_point<S, R>(spawn: Vec3, config: &EnemyConfig, rng: &mut R, spatial: &S) -> Vec3
where
    S: SpatialQuery + ?Sized,
    R: Rng,
{
    let angle = rng.gen_range(0.0..TAU);
    let radius = if config.patrol_radius_max > config.patrol_radius_min {
        rng.gen_range(config.patrol_radius_min..config.patrol_radius_max)
    } else {
        config.patrol_radius_min
    };

    let candidate = spawn + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius);

    spatial
        .sample_navigable_point(candidate, radius)
        .unwrap_or(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavSurface;
    use crate::spatial::{SceneGeometry, SceneQuery};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_markers_used_verbatim() {
        let markers = [Vec3::new(1.0, 0.0, 1.0), Vec3::new(-4.0, 0.0, 2.0)];
        let geometry = SceneGeometry::default();
        let surface = NavSurface::default();
        let spatial = SceneQuery::new(&geometry, &surface);

        let route = PatrolRoute::initialize(
            Some(&markers),
            Vec3::ZERO,
            &EnemyConfig::default(),
            &mut rng(),
            &spatial,
        );

        assert_eq!(route.points(), &markers);
        assert_eq!(route.current_goal(), markers[0]);
    }

    #[test]
    fn test_generated_points_in_ring_and_on_surface() {
        let geometry = SceneGeometry::default();
        let surface = NavSurface::open_field(100.0);
        let spatial = SceneQuery::new(&geometry, &surface);
        let config = EnemyConfig::default();
        let spawn = Vec3::new(3.0, 0.0, -2.0);

        let mut rng = rng();
        for _ in 0..20 {
            let route = PatrolRoute::initialize(None, spawn, &config, &mut rng, &spatial);

            assert!((MIN_GENERATED_POINTS..MAX_GENERATED_POINTS).contains(&route.len()));
            for point in route.points() {
                let radius = Vec2::new(point.x - spawn.x, point.z - spawn.z).length();
                assert!(radius >= config.patrol_radius_min - 1e-3);
                assert!(radius < config.patrol_radius_max + 1e-3);
                assert!(surface.contains(*point));
            }
        }
    }

    #[test]
    fn test_configured_point_count() {
        let geometry = SceneGeometry::default();
        let surface = NavSurface::open_field(100.0);
        let spatial = SceneQuery::new(&geometry, &surface);
        let config = EnemyConfig {
            patrol_point_count: Some(8),
            ..default()
        };

        let route = PatrolRoute::initialize(None, Vec3::ZERO, &config, &mut rng(), &spatial);
        assert_eq!(route.len(), 8);
    }

    #[test]
    fn test_no_surface_falls_back_to_raw_candidates() {
        let geometry = SceneGeometry::default();
        let surface = NavSurface::default();
        let spatial = SceneQuery::new(&geometry, &surface);
        let config = EnemyConfig {
            patrol_point_count: Some(4),
            ..default()
        };

        let route = PatrolRoute::initialize(None, Vec3::ZERO, &config, &mut rng(), &spatial);
        assert_eq!(route.len(), 4);
        assert!(route.points().iter().all(|point| point.length() >= 5.0 - 1e-3));
    }

    #[test]
    fn test_empty_points_fall_back_to_spawn() {
        let spawn = Vec3::new(2.0, 0.0, 2.0);
        let route = PatrolRoute::from_points(Vec::new(), spawn);

        assert_eq!(route.len(), 1);
        assert!(!route.is_empty());
        assert_eq!(route.current_goal(), spawn);
    }

    #[test]
    fn test_advance_wraps_cursor() {
        let mut route = PatrolRoute::from_points(vec![Vec3::X, Vec3::Y, Vec3::Z], Vec3::ZERO);

        for step in 1..=10 {
            route.advance();
            assert_eq!(route.index(), step % 3);
            assert!(route.index() < route.len());
        }
    }

    #[test]
    fn test_single_point_route_idles() {
        let mut route = PatrolRoute::from_points(vec![Vec3::X], Vec3::ZERO);
        route.advance();
        route.advance();
        assert_eq!(route.index(), 0);
        assert_eq!(route.current_goal(), Vec3::X);
    }
}
