//! Transition function FSM врага
//!
//! `(state, perception, memory) -> state'` без side effects. Условия
//! проверяются в фиксированном порядке, первое выполненное побеждает:
//!
//! - Patrolling → Chasing (видим и в detection_range)
//! - Chasing → Attacking (в attack_range) → Pursuing (потеряли > grace)
//!   → Patrolling (далеко и тревога истекла)
//! - Pursuing → Chasing → Attacking → Patrolling (время/дистанция)
//! - Attacking → Chasing (вне range, видим) → Pursuing (вне range, не видим)

use super::components::{AlertWindow, EnemyState, PursuitMemory};
use super::perception::PerceptionSnapshot;
use crate::config::EnemyConfig;

/// Следующее состояние или None (остаёмся)
pub fn next_state(
    state: &EnemyState,
    perception: &PerceptionSnapshot,
    memory: &PursuitMemory,
    alert: &AlertWindow,
    now: f32,
    config: &EnemyConfig,
) -> Option<EnemyState> {
    let distance = perception.distance;
    let visible = perception.visible;
    let spotted = visible && distance <= config.detection_range;
    let in_attack_range = distance <= config.attack_range;
    let since_seen = memory.time_since_last_seen(now);

    match state {
        EnemyState::Patrolling { .. } => spotted.then_some(EnemyState::Chasing),

        EnemyState::Chasing => {
            if in_attack_range {
                Some(EnemyState::Attacking)
            } else if !visible && since_seen > config.lost_sight_grace {
                Some(EnemyState::Pursuing)
            } else if distance > config.detection_range * config.chase_give_up_factor
                && alert.elapsed(now) > config.alert_cooldown
            {
                Some(EnemyState::patrolling())
            } else {
                None
            }
        }

        EnemyState::Pursuing => {
            if spotted {
                Some(EnemyState::Chasing)
            } else if in_attack_range {
                Some(EnemyState::Attacking)
            } else if since_seen > config.pursuit_time || distance > config.pursuit_range {
                Some(EnemyState::patrolling())
            } else {
                None
            }
        }

        EnemyState::Attacking => {
            if in_attack_range {
                None
            } else if visible {
                Some(EnemyState::Chasing)
            } else {
                Some(EnemyState::Pursuing)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::components::LookAround;
    use bevy::prelude::Vec3;

    fn seen(visible: bool, distance: f32) -> PerceptionSnapshot {
        PerceptionSnapshot {
            visible,
            distance,
            target_position: Vec3::new(0.0, 0.0, -distance),
        }
    }

    /// Память с последним контактом в момент `at`
    fn memory_seen_at(at: f32) -> PursuitMemory {
        let mut memory = PursuitMemory::default();
        memory.observe(true, Vec3::ZERO, at);
        memory
    }

    fn alert_at(at: f32) -> AlertWindow {
        AlertWindow { started_at: Some(at) }
    }

    #[test]
    fn test_patrolling_ignores_far_target() {
        // distance 20 > detection 15, не видим
        let config = EnemyConfig::default();
        let next = next_state(
            &EnemyState::patrolling(),
            &seen(false, 20.0),
            &PursuitMemory::default(),
            &AlertWindow::default(),
            1.0,
            &config,
        );
        assert_eq!(next, None);
    }

    #[test]
    fn test_patrolling_spots_target() {
        let config = EnemyConfig::default();
        let memory = memory_seen_at(1.0);

        let next = next_state(&EnemyState::patrolling(), &seen(true, 12.0), &memory, &AlertWindow::default(), 1.0, &config);
        assert_eq!(next, Some(EnemyState::Chasing));

        // Look-around прерывается так же
        let looking = EnemyState::Patrolling {
            look_around: Some(LookAround::new(2.0)),
        };
        let next = next_state(&looking, &seen(true, 12.0), &memory, &AlertWindow::default(), 1.0, &config);
        assert_eq!(next, Some(EnemyState::Chasing));
    }

    #[test]
    fn test_chasing_attack_range_wins_over_lost_sight() {
        let config = EnemyConfig::default();
        let memory = memory_seen_at(0.0);

        // Не видим уже 5 секунд, но вплотную: атакуем
        let next = next_state(&EnemyState::Chasing, &seen(false, 2.5), &memory, &alert_at(0.0), 5.0, &config);
        assert_eq!(next, Some(EnemyState::Attacking));
    }

    #[test]
    fn test_chasing_lost_sight_after_grace() {
        let config = EnemyConfig::default();
        let memory = memory_seen_at(10.0);

        let within_grace = next_state(&EnemyState::Chasing, &seen(false, 10.0), &memory, &alert_at(9.0), 10.9, &config);
        assert_eq!(within_grace, None);

        // 1.1s без контакта
        let lost = next_state(&EnemyState::Chasing, &seen(false, 10.0), &memory, &alert_at(9.0), 11.1, &config);
        assert_eq!(lost, Some(EnemyState::Pursuing));
    }

    #[test]
    fn test_chasing_lost_sight_precedes_give_up() {
        let config = EnemyConfig::default();
        let memory = memory_seen_at(0.0);

        let next = next_state(&EnemyState::Chasing, &seen(false, 40.0), &memory, &alert_at(0.0), 10.0, &config);
        assert_eq!(next, Some(EnemyState::Pursuing));
    }

    #[test]
    fn test_chasing_gives_up_when_far_and_alert_expired() {
        let config = EnemyConfig::default();
        // Видим, но дальше 2 × detection_range
        let memory = memory_seen_at(10.0);

        let alert_active = next_state(&EnemyState::Chasing, &seen(true, 31.0), &memory, &alert_at(8.0), 10.0, &config);
        assert_eq!(alert_active, None);

        let alert_expired = next_state(&EnemyState::Chasing, &seen(true, 31.0), &memory, &alert_at(6.0), 10.0, &config);
        assert_eq!(alert_expired, Some(EnemyState::patrolling()));
    }

    #[test]
    fn test_pursuing_transitions() {
        let config = EnemyConfig::default();
        let memory = memory_seen_at(0.0);
        let alert = alert_at(0.0);

        let spotted = next_state(&EnemyState::Pursuing, &seen(true, 10.0), &memory, &alert, 2.0, &config);
        assert_eq!(spotted, Some(EnemyState::Chasing));

        let close = next_state(&EnemyState::Pursuing, &seen(false, 2.0), &memory, &alert, 2.0, &config);
        assert_eq!(close, Some(EnemyState::Attacking));

        let searching = next_state(&EnemyState::Pursuing, &seen(false, 10.0), &memory, &alert, 7.9, &config);
        assert_eq!(searching, None);

        // pursuit_time истёк
        let timed_out = next_state(&EnemyState::Pursuing, &seen(false, 10.0), &memory, &alert, 8.1, &config);
        assert_eq!(timed_out, Some(EnemyState::patrolling()));

        let too_far = next_state(&EnemyState::Pursuing, &seen(false, 26.0), &memory, &alert, 2.0, &config);
        assert_eq!(too_far, Some(EnemyState::patrolling()));
    }

    #[test]
    fn test_attacking_transitions() {
        let config = EnemyConfig::default();
        let memory = memory_seen_at(0.0);
        let alert = alert_at(0.0);

        let stay = next_state(&EnemyState::Attacking, &seen(true, 3.0), &memory, &alert, 1.0, &config);
        assert_eq!(stay, None);

        let chase = next_state(&EnemyState::Attacking, &seen(true, 3.5), &memory, &alert, 1.0, &config);
        assert_eq!(chase, Some(EnemyState::Chasing));

        let pursue = next_state(&EnemyState::Attacking, &seen(false, 6.0), &memory, &alert, 1.0, &config);
        assert_eq!(pursue, Some(EnemyState::Pursuing));
    }
}
