//! Debug overlay данные врага (опциональный observer)
//!
//! Добавь `EnemyDiagnostics` на врага: система будет обновлять его
//! каждый тик. Brain про него не знает; рендер (UI label над головой,
//! лог, тест) читает `overlay_lines()`.

use bevy::prelude::*;

use super::components::EnemyState;
use super::perception::Perception;
use crate::components::NavAgent;

#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct EnemyDiagnostics {
    pub state: String,
    /// None: цели нет в мире
    pub distance: Option<f32>,
    pub can_see_target: bool,
    pub destination: Option<Vec3>,
    pub speed: f32,
    pub stopped: bool,
}

impl EnemyDiagnostics {
    /// Пять строк overlay (state, distance, sight, destination, agent)
    pub fn overlay_lines(&self) -> [String; 5] {
        let distance = match self.distance {
            Some(distance) => format!("Distance: {:.1}", distance),
            None => "No Target".to_string(),
        };
        let destination = match self.destination {
            Some(dest) => format!("Dest: ({:.1}, {:.1}, {:.1})", dest.x, dest.y, dest.z),
            None => "Dest: No Path".to_string(),
        };

        [
            format!("State: {}", self.state),
            distance,
            format!("Can See Target: {}", self.can_see_target),
            destination,
            format!("Speed: {:.1} | Stopped: {}", self.speed, self.stopped),
        ]
    }
}

/// Система: обновление diagnostics из состояния врага
pub fn update_enemy_diagnostics(
    mut enemies: Query<(&mut EnemyDiagnostics, &EnemyState, &Perception, &NavAgent)>,
) {
    for (mut diagnostics, state, perception, agent) in enemies.iter_mut() {
        let snapshot = perception.last;
        diagnostics.state = state.label().to_string();
        diagnostics.distance = snapshot.distance.is_finite().then_some(snapshot.distance);
        diagnostics.can_see_target = snapshot.visible;
        diagnostics.destination = agent.goal();
        diagnostics.speed = agent.speed();
        diagnostics.stopped = agent.is_stopped();
    }
}
