//! Navigation domain: navigable surface + headless locomotion driver
//!
//! # Architecture
//!
//! AI (strategic layer) пишет intent в `NavAgent`; driver (tactical layer)
//! исполняет. Встроенный driver двигает агентов напрямую по `NavSurface`;
//! при встраивании в движок с настоящим NavMesh driver отключается и
//! движок сам читает/пишет `NavAgent`.

use bevy::prelude::*;

pub mod driver;
pub mod surface;

pub use driver::{drive_nav_agents, horizontal_distance, resolve_path, step_agent, yaw_towards};
pub use surface::{NavRegion, NavSurface};

use crate::SimulationSet;

/// Navigation Plugin
///
/// - `NavSurface` resource (пустая по умолчанию: уровень задаёт свою)
/// - `drive_nav_agents` в `SimulationSet::Locomotion` если `builtin_driver`
pub struct NavigationPlugin {
    pub builtin_driver: bool,
}

impl Default for NavigationPlugin {
    fn default() -> Self {
        Self { builtin_driver: true }
    }
}

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavSurface>();

        if self.builtin_driver {
            app.add_systems(
                FixedUpdate,
                drive_nav_agents.in_set(SimulationSet::Locomotion),
            );
        }
    }
}
