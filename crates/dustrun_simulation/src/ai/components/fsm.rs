//! FSM AI components (state, attack timer, alert window).

use bevy::prelude::*;
use std::f32::consts::PI;

/// Угловая частота осмотра на точке патруля (рад/сек аргумента синуса)
const LOOK_AROUND_SWEEP_RATE: f32 = 3.0;

/// Пауза "осмотреться" на точке патруля
///
/// Sub-state Patrolling: живёт несколько тиков, агент стоит и крутит
/// головой. Любой переход из Patrolling его отбрасывает.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LookAround {
    pub elapsed: f32,
    pub duration: f32,
}

impl LookAround {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration: duration.max(0.0),
        }
    }

    /// Продвинуть таймер; true когда пауза закончилась
    pub fn advance(&mut self, delta: f32) -> bool {
        self.elapsed += delta;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// World yaw (радианы), куда смотреть сейчас: ±180° синусоидой
    pub fn look_yaw(&self) -> f32 {
        (self.elapsed * LOOK_AROUND_SWEEP_RATE).sin() * PI
    }
}

/// AI FSM состояния врага
///
/// Переходы: только через `ai::transition::next_state`.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum EnemyState {
    /// Обход маршрута; `look_around`: пауза на точке
    Patrolling { look_around: Option<LookAround> },

    /// Цель видна: бежим к её текущей позиции
    Chasing,

    /// Цель потеряна: прочёсываем окрестности последней известной позиции
    Pursuing,

    /// Цель в радиусе атаки: стоим и бьём
    Attacking,
}

impl Default for EnemyState {
    fn default() -> Self {
        Self::patrolling()
    }
}

impl EnemyState {
    pub fn patrolling() -> Self {
        Self::Patrolling { look_around: None }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnemyState::Patrolling { .. } => "Patrolling",
            EnemyState::Chasing => "Chasing",
            EnemyState::Pursuing => "Pursuing",
            EnemyState::Attacking => "Attacking",
        }
    }

    pub fn is_patrolling(&self) -> bool {
        matches!(self, EnemyState::Patrolling { .. })
    }

    /// То же состояние верхнего уровня (sub-state не учитывается)
    pub fn same_kind(&self, other: &EnemyState) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl std::fmt::Display for EnemyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Таймер атаки
///
/// Меняется только действием Attacking.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackTimer {
    pub last_attack_time: Option<f32>,
}

impl AttackTimer {
    /// Готов бить: ещё не бил, или cooldown прошёл
    pub fn is_ready(&self, now: f32, cooldown: f32) -> bool {
        match self.last_attack_time {
            None => true,
            Some(last) => now - last >= cooldown,
        }
    }

    pub fn record(&mut self, now: f32) {
        self.last_attack_time = Some(now);
    }
}

/// Alert window: когда враг перешёл в погоню из патруля
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AlertWindow {
    pub started_at: Option<f32>,
}

impl AlertWindow {
    pub fn start(&mut self, now: f32) {
        self.started_at = Some(now);
    }

    /// Время в тревоге; бесконечность если тревоги не было
    pub fn elapsed(&self, now: f32) -> f32 {
        self.started_at
            .map(|started| now - started)
            .unwrap_or(f32::INFINITY)
    }
}
