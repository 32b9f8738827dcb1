//! Tests for FSM AI components.

#[cfg(test)]
mod tests {
    use super::super::fsm::{AlertWindow, AttackTimer, EnemyState, LookAround};
    use super::super::memory::PursuitMemory;
    use bevy::prelude::*;

    #[test]
    fn test_enemy_state_default() {
        let state = EnemyState::default();
        assert!(matches!(state, EnemyState::Patrolling { look_around: None }));
        assert_eq!(state.to_string(), "Patrolling");
    }

    #[test]
    fn test_same_kind_ignores_sub_state() {
        let idle = EnemyState::patrolling();
        let looking = EnemyState::Patrolling {
            look_around: Some(LookAround::new(1.0)),
        };
        assert!(idle.same_kind(&looking));
        assert!(!idle.same_kind(&EnemyState::Chasing));
    }

    #[test]
    fn test_look_around_timer_logic() {
        let mut look = LookAround::new(1.0);
        assert!(!look.advance(0.4));
        assert!(!look.advance(0.4));
        assert!(look.advance(0.4)); // 1.2 >= 1.0
        assert!(look.is_finished());
    }

    #[test]
    fn test_look_yaw_bounded() {
        let mut look = LookAround::new(10.0);
        for _ in 0..100 {
            look.advance(0.1);
            assert!(look.look_yaw().abs() <= std::f32::consts::PI + 1e-5);
        }
    }

    #[test]
    fn test_attack_timer_cooldown() {
        let mut timer = AttackTimer::default();
        assert!(timer.is_ready(0.0, 1.2)); // Ещё не бил

        timer.record(5.0);
        assert!(!timer.is_ready(5.0, 1.2));
        assert!(!timer.is_ready(6.1, 1.2));
        assert!(timer.is_ready(6.2, 1.2));
    }

    #[test]
    fn test_alert_window_elapsed() {
        let mut alert = AlertWindow::default();
        assert!(alert.elapsed(10.0).is_infinite());

        alert.start(4.0);
        assert_eq!(alert.elapsed(6.5), 2.5);
    }

    #[test]
    fn test_memory_observe_visible_updates() {
        let mut memory = PursuitMemory::default();
        assert!(!memory.has_sighting());
        assert!(memory.time_since_last_seen(3.0).is_infinite());

        memory.observe(true, Vec3::new(1.0, 0.0, 2.0), 3.0);
        assert_eq!(memory.last_seen_time(), Some(3.0));
        assert_eq!(memory.last_known_position(), Vec3::new(1.0, 0.0, 2.0));
        assert_eq!(memory.time_since_last_seen(4.5), 1.5);
    }

    #[test]
    fn test_memory_observe_not_visible_is_noop() {
        let mut memory = PursuitMemory::default();
        memory.observe(true, Vec3::new(1.0, 0.0, 2.0), 3.0);
        let before = memory;

        for tick in 0..10 {
            memory.observe(false, Vec3::new(50.0, 0.0, 50.0), 4.0 + tick as f32);
        }

        assert_eq!(memory, before);
    }
}
