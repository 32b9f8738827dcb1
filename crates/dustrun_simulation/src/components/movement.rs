//! Movement компоненты: NavAgent (интерфейс к locomotion driver)

use bevy::prelude::*;

/// Статус пути до текущей цели
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum PathStatus {
    /// Путь до цели найден полностью
    #[default]
    Valid,
    /// Цель вне navigable surface: идём до ближайшей точки
    Partial,
    /// Пути нет (surface пустая / агент потерян)
    Invalid,
}

impl PathStatus {
    pub fn is_broken(self) -> bool {
        matches!(self, PathStatus::Partial | PathStatus::Invalid)
    }
}

/// Navigation agent: контракт между AI и locomotion driver
///
/// Архитектура:
/// - AI пишет intent: speed, goal, stop/resume
/// - Driver (встроенный headless или внешний движок) читает intent,
///   двигает Transform и отчитывается: remaining_distance, path_status, pending
/// - Отчёт виден AI на следующем тике
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    speed: f32,
    goal: Option<Vec3>,
    stopped: bool,
    /// Останавливаемся на этом расстоянии до конца пути
    pub stopping_distance: f32,
    /// Driver поворачивает агента по направлению движения
    pub update_rotation: bool,

    // --- Driver report ---
    path_pending: bool,
    path_status: PathStatus,
    /// Конец рассчитанного пути (проекция goal на surface)
    path_end: Option<Vec3>,
    remaining_distance: f32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            goal: None,
            stopped: false,
            stopping_distance: 0.0,
            update_rotation: true,
            path_pending: false,
            path_status: PathStatus::Valid,
            path_end: None,
            remaining_distance: 0.0,
        }
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.max(0.0);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Новая цель → путь пересчитывается driver'ом (pending до следующего прохода)
    pub fn set_goal(&mut self, goal: Vec3) {
        self.goal = Some(goal);
        self.path_pending = true;
    }

    pub fn goal(&self) -> Option<Vec3> {
        self.goal
    }

    pub fn stop(&mut self) {
        self.stopped = true;
    }

    pub fn resume(&mut self) {
        self.stopped = false;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    pub fn path_status(&self) -> PathStatus {
        self.path_status
    }

    pub fn is_path_pending(&self) -> bool {
        self.path_pending
    }

    pub fn path_end(&self) -> Option<Vec3> {
        self.path_end
    }

    /// Сбросить путь (цель остаётся пустой до следующего set_goal)
    pub fn reset_path(&mut self) {
        self.goal = None;
        self.path_pending = false;
        self.path_status = PathStatus::Valid;
        self.path_end = None;
        self.remaining_distance = 0.0;
    }

    /// Driver: результат расчёта пути
    pub fn report_path(&mut self, status: PathStatus, path_end: Option<Vec3>) {
        self.path_pending = false;
        self.path_status = status;
        self.path_end = path_end;
        if path_end.is_none() {
            self.remaining_distance = f32::INFINITY;
        }
    }

    /// Driver: остаток пути после шага
    pub fn report_remaining(&mut self, remaining: f32) {
        self.remaining_distance = remaining.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_goal_marks_pending() {
        let mut agent = NavAgent::new(3.0);
        assert!(!agent.is_path_pending());
        assert_eq!(agent.goal(), None);

        agent.set_goal(Vec3::new(1.0, 0.0, 2.0));
        assert!(agent.is_path_pending());
        assert_eq!(agent.goal(), Some(Vec3::new(1.0, 0.0, 2.0)));

        agent.report_path(PathStatus::Valid, Some(Vec3::new(1.0, 0.0, 2.0)));
        assert!(!agent.is_path_pending());
    }

    #[test]
    fn test_invalid_path_reports_infinite_remaining() {
        let mut agent = NavAgent::new(3.0);
        agent.set_goal(Vec3::X);
        agent.report_path(PathStatus::Invalid, None);

        assert!(agent.path_status().is_broken());
        assert!(agent.remaining_distance().is_infinite());

        agent.reset_path();
        assert_eq!(agent.path_status(), PathStatus::Valid);
        assert_eq!(agent.remaining_distance(), 0.0);
    }

    #[test]
    fn test_stop_resume_and_speed_clamp() {
        let mut agent = NavAgent::default();
        agent.stop();
        assert!(agent.is_stopped());
        agent.resume();
        assert!(!agent.is_stopped());

        agent.set_speed(-4.0);
        assert_eq!(agent.speed(), 0.0);
    }
}
