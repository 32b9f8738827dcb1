//! Headless симуляция DUSTRUN
//!
//! Арена 40×40 м со стеной посередине: враг патрулирует, скриптовый
//! игрок объезжает арену по кругу. Лог показывает смены состояний,
//! атаки и overlay врага.
//!
//! Usage: dustrun_simulation [enemy_config.json]

use bevy::prelude::*;
use std::time::Duration;

use dustrun_simulation::{
    create_headless_app, log, log_error, log_info, step_fixed, BodyCollider, Enemy, EnemyConfig,
    EnemyDiagnostics, EnemyStateChanged, Health, NavSurface, Player, SimulationPlugin,
    SimulationSet, TargetDamaged, TargetDefeated,
};

const TICK_COUNT: usize = 1000;
const ARENA_HALF_SIZE: f32 = 20.0;

/// Маршрут скриптового игрока (по кругу)
#[derive(Component)]
struct ScriptedRoute {
    waypoints: Vec<Vec3>,
    index: usize,
    speed: f32,
}

fn drive_scripted_player(mut players: Query<(&mut Transform, &mut ScriptedRoute)>, time: Res<Time<Fixed>>) {
    for (mut transform, mut route) in players.iter_mut() {
        let goal = route.waypoints[route.index];
        let to_goal = goal - transform.translation;
        let step = route.speed * time.delta_secs();

        if to_goal.length() <= step {
            transform.translation = goal;
            route.index = (route.index + 1) % route.waypoints.len();
        } else {
            transform.translation += to_goal.normalize() * step;
        }
    }
}

fn report_events(
    mut state_changes: EventReader<EnemyStateChanged>,
    mut damaged: EventReader<TargetDamaged>,
    mut defeated: EventReader<TargetDefeated>,
    time: Res<Time<Fixed>>,
) {
    for change in state_changes.read() {
        log_info(&format!(
            "[{:6.2}s] {:?}: {} → {}",
            time.elapsed_secs(),
            change.entity,
            change.from,
            change.to
        ));
    }
    for hit in damaged.read() {
        log_info(&format!(
            "[{:6.2}s] {:?} hit for {:.0}, health left {:.0}",
            time.elapsed_secs(),
            hit.target,
            hit.damage,
            hit.remaining_health
        ));
    }
    for event in defeated.read() {
        log_info(&format!("[{:6.2}s] {:?} defeated", time.elapsed_secs(), event.target));
    }
}

fn load_config() -> EnemyConfig {
    let Some(path) = std::env::args().nth(1) else {
        return EnemyConfig::default();
    };

    match EnemyConfig::load(&path) {
        Ok(config) => {
            log_info(&format!("Loaded enemy config from {}", path));
            config
        }
        Err(error) => {
            log_error(&format!("{}; using default enemy config", error));
            EnemyConfig::default()
        }
    }
}

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting DUSTRUN headless simulation (seed: {})", seed));

    app.add_plugins(SimulationPlugin::default())
        .insert_resource(NavSurface::open_field(ARENA_HALF_SIZE))
        .add_systems(
            FixedUpdate,
            (
                drive_scripted_player.before(SimulationSet::Sense),
                report_events.after(SimulationSet::Locomotion),
            ),
        );

    let config = load_config();

    let world = app.world_mut();
    world.spawn((
        Transform::from_xyz(0.0, 1.5, -6.0),
        BodyCollider::obstacle(Vec3::new(4.0, 1.5, 0.5)),
    ));
    let enemy = world
        .spawn((Enemy, Transform::from_xyz(0.0, 0.0, 0.0), config, EnemyDiagnostics::default()))
        .id();
    let player = world
        .spawn((
            Player,
            Transform::from_xyz(-15.0, 0.0, -15.0),
            ScriptedRoute {
                waypoints: vec![
                    Vec3::new(15.0, 0.0, -15.0),
                    Vec3::new(15.0, 0.0, 15.0),
                    Vec3::new(-15.0, 0.0, 15.0),
                    Vec3::new(-15.0, 0.0, -15.0),
                ],
                index: 0,
                speed: 2.5,
            },
        ))
        .id();

    let tick = Duration::from_secs_f64(1.0 / 60.0);
    for frame in 0..TICK_COUNT {
        step_fixed(&mut app, tick);

        if frame % 100 == 0 {
            let world = app.world();
            if let Some(diagnostics) = world.get::<EnemyDiagnostics>(enemy) {
                log(&format!("Tick {}: {}", frame, diagnostics.overlay_lines().join(" | ")));
            }
            if let Some(health) = world.get::<Health>(player) {
                log(&format!("Tick {}: player health {:.0}/{:.0}", frame, health.current, health.max));
            }
        }
    }

    log_info("Simulation complete!");
}
