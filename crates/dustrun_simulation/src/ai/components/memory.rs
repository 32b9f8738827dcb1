//! Pursuit memory: где и когда цель видели последний раз.

use bevy::prelude::*;

/// Последний контакт с целью
///
/// Пишется только когда perception сообщает visible; никогда не очищается.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PursuitMemory {
    last_seen_time: Option<f32>,
    last_known_position: Vec3,
}

impl PursuitMemory {
    /// Запомнить позицию цели, если она видна (иначе no-op)
    pub fn observe(&mut self, visible: bool, target_position: Vec3, now: f32) {
        if !visible {
            return;
        }
        self.last_seen_time = Some(now);
        self.last_known_position = target_position;
    }

    /// Секунд с последнего контакта (бесконечность если не видели)
    pub fn time_since_last_seen(&self, now: f32) -> f32 {
        self.last_seen_time
            .map(|seen| now - seen)
            .unwrap_or(f32::INFINITY)
    }

    pub fn last_seen_time(&self) -> Option<f32> {
        self.last_seen_time
    }

    pub fn last_known_position(&self) -> Vec3 {
        self.last_known_position
    }

    pub fn has_sighting(&self) -> bool {
        self.last_seen_time.is_some()
    }
}
