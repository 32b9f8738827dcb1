//! Enemy tuning (per-entity component, loadable from JSON)
//!
//! Defaults mirror the shipped enemy prefab. Every field is optional in the
//! file; missing keys fall back to `EnemyConfig::default()`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Ошибки загрузки tuning файла
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read enemy config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse enemy config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid enemy config: `{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Параметры поведения врага
///
/// Дистанции в метрах, время в секундах, углы в градусах.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct EnemyConfig {
    // --- Detection ---
    pub detection_range: f32,
    pub attack_range: f32,
    /// Полный угол обзора (градусы)
    pub field_of_view: f32,

    // --- Movement ---
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub pursuit_speed: f32,

    // --- Attack ---
    pub attack_cooldown: f32,
    pub attack_damage: f32,

    // --- Aggression ---
    /// Сколько преследуем после потери цели
    pub pursuit_time: f32,
    /// Дальше этого радиуса преследование бросаем
    pub pursuit_range: f32,
    /// Окно тревоги после последнего контакта
    pub alert_cooldown: f32,

    // --- Secondary tuning ---
    pub patrol_arrival_threshold: f32,
    /// None = случайное количество точек в [3, 6)
    pub patrol_point_count: Option<usize>,
    pub patrol_radius_min: f32,
    pub patrol_radius_max: f32,
    pub alert_speed_multiplier: f32,
    /// Auto-detect радиус = attack_range × close_range_factor
    pub close_range_factor: f32,
    /// Chasing → Pursuing только после этой паузы без контакта
    pub lost_sight_grace: f32,
    /// Chasing → Patrolling когда distance > detection_range × chase_give_up_factor
    pub chase_give_up_factor: f32,
    pub look_around_chance: f32,
    pub look_around_min: f32,
    pub look_around_max: f32,
    pub pursuit_search_radius: f32,
    /// Скорость вращения точки поиска (градусы/сек)
    pub pursuit_search_rate: f32,
    pub pursuit_retarget_distance: f32,
    pub pursuit_scan_chance: f32,
    pub nav_recovery_radius: f32,
    pub eye_height: f32,
    pub target_aim_height: f32,
    /// Stopping distance при погоне = attack_range × stopping_distance_factor
    pub stopping_distance_factor: f32,

    /// Подробный лог решений каждый тик (шумно)
    pub log_decisions: bool,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            detection_range: 15.0,
            attack_range: 3.0,
            field_of_view: 90.0,
            patrol_speed: 3.0,
            chase_speed: 6.0,
            pursuit_speed: 7.0,
            attack_cooldown: 1.2,
            attack_damage: 15.0,
            pursuit_time: 8.0,
            pursuit_range: 25.0,
            alert_cooldown: 3.0,

            patrol_arrival_threshold: 0.5,
            patrol_point_count: None,
            patrol_radius_min: 5.0,
            patrol_radius_max: 15.0,
            alert_speed_multiplier: 1.5,
            close_range_factor: 1.5,
            lost_sight_grace: 1.0,
            chase_give_up_factor: 2.0,
            look_around_chance: 0.1,
            look_around_min: 0.5,
            look_around_max: 2.0,
            pursuit_search_radius: 5.0,
            pursuit_search_rate: 90.0,
            pursuit_retarget_distance: 1.0,
            pursuit_scan_chance: 0.05,
            nav_recovery_radius: 5.0,
            eye_height: 0.5,
            target_aim_height: 1.0,
            stopping_distance_factor: 0.8,

            log_decisions: false,
        }
    }
}

impl EnemyConfig {
    /// Parse + validate JSON tuning
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("detection_range", self.detection_range),
            ("attack_range", self.attack_range),
            ("pursuit_range", self.pursuit_range),
            ("patrol_arrival_threshold", self.patrol_arrival_threshold),
            ("patrol_radius_max", self.patrol_radius_max),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be > 0 (got {})", value),
                });
            }
        }

        let non_negative = [
            ("patrol_speed", self.patrol_speed),
            ("chase_speed", self.chase_speed),
            ("pursuit_speed", self.pursuit_speed),
            ("attack_cooldown", self.attack_cooldown),
            ("attack_damage", self.attack_damage),
            ("pursuit_time", self.pursuit_time),
            ("alert_cooldown", self.alert_cooldown),
            ("patrol_radius_min", self.patrol_radius_min),
            ("lost_sight_grace", self.lost_sight_grace),
            ("look_around_min", self.look_around_min),
            ("pursuit_search_radius", self.pursuit_search_radius),
            ("nav_recovery_radius", self.nav_recovery_radius),
            ("look_around_max", self.look_around_max),
            ("pursuit_retarget_distance", self.pursuit_retarget_distance),
            ("alert_speed_multiplier", self.alert_speed_multiplier),
            ("close_range_factor", self.close_range_factor),
            ("chase_give_up_factor", self.chase_give_up_factor),
            ("stopping_distance_factor", self.stopping_distance_factor),
            ("eye_height", self.eye_height),
            ("target_aim_height", self.target_aim_height),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be >= 0 (got {})", value),
                });
            }
        }

        // Знак задаёт направление обхода, NaN/inf ломают sweep point
        if !self.pursuit_search_rate.is_finite() {
            return Err(ConfigError::Invalid {
                field: "pursuit_search_rate",
                reason: format!("must be finite (got {})", self.pursuit_search_rate),
            });
        }

        if !(self.field_of_view > 0.0 && self.field_of_view <= 360.0) {
            return Err(ConfigError::Invalid {
                field: "field_of_view",
                reason: format!("must be in (0, 360] degrees (got {})", self.field_of_view),
            });
        }

        if self.patrol_radius_min > self.patrol_radius_max {
            return Err(ConfigError::Invalid {
                field: "patrol_radius_min",
                reason: "must not exceed patrol_radius_max".to_string(),
            });
        }

        if self.look_around_min > self.look_around_max {
            return Err(ConfigError::Invalid {
                field: "look_around_min",
                reason: "must not exceed look_around_max".to_string(),
            });
        }

        if self.patrol_point_count == Some(0) {
            return Err(ConfigError::Invalid {
                field: "patrol_point_count",
                reason: "must be at least 1 when set".to_string(),
            });
        }

        let chances = [
            ("look_around_chance", self.look_around_chance),
            ("pursuit_scan_chance", self.pursuit_scan_chance),
        ];
        for (field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a probability in [0, 1] (got {})", value),
                });
            }
        }

        Ok(())
    }

    /// Радиус безусловного обнаружения
    pub fn close_detection_range(&self) -> f32 {
        self.attack_range * self.close_range_factor
    }

    pub fn chase_stopping_distance(&self) -> f32 {
        self.attack_range * self.stopping_distance_factor
    }
}
