// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Edge case tests for the simulation
//!
//! Tests degenerate geometry, invalid input, and configuration loading

use particle_sandbox::spatial::SpatialGrid;
use particle_sandbox::{
    Particle, PhysicsParams, RunState, Simulation, SimulationConfig, SimulationError, Vec2,
};
use std::io;
use std::sync::{Arc, Mutex};

/// Log sink shared between a test and its subscriber
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn run_with_captured_logs(config: SimulationConfig) -> String {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut sim = Simulation::new(config).unwrap();
        sim.spawn(20, 320.0, 320.0, 100.0, 2.0).unwrap();
        sim.step();
    });
    log.contents()
}

fn weightless() -> SimulationConfig {
    SimulationConfig::default()
        .with_seed(3)
        .with_physics(PhysicsParams::default().with_gravity(0.0))
}

#[test]
#[should_panic(expected = "Cell size must be positive and finite")]
fn test_grid_zero_cell_size() {
    SpatialGrid::new(0.0);
}

#[test]
#[should_panic(expected = "Cell size must be positive and finite")]
fn test_grid_nan_cell_size() {
    SpatialGrid::new(f64::NAN);
}

#[test]
fn test_coincident_particles_stay_finite() {
    let mut sim = Simulation::new(SimulationConfig::default().with_seed(1)).unwrap();
    for _ in 0..2 {
        sim.insert(Particle::new(Vec2::new(320.0, 300.0), Vec2::zero(), 2.0).unwrap())
            .unwrap();
    }
    sim.start();

    for _ in 0..20 {
        sim.tick();
        assert!(sim.particles().iter().all(Particle::is_valid));
    }
    // Identical particles follow identical paths, so the pair is skipped every frame
    assert_eq!(sim.last_frame().pairs_checked, 1);
    assert_eq!(sim.last_frame().contacts, 0);
}

#[test]
fn test_particle_at_boundary_center() {
    let config = weightless().with_boundary(Vec2::new(100.0, 100.0), 1.0);
    let mut sim = Simulation::new(config).unwrap();
    sim.insert(Particle::new(Vec2::new(100.0, 100.0), Vec2::zero(), 2.0).unwrap())
        .unwrap();
    sim.start();

    sim.tick();
    // Fallback normal points down, so the particle is pushed up
    let p = &sim.particles()[0];
    assert!(p.is_valid());
    assert!((p.position().x - 100.0).abs() < 1e-12);
    assert!((p.position().y - 99.0).abs() < 1e-12);

    for _ in 0..10 {
        sim.tick();
        assert!(sim.particles()[0].is_valid());
    }
}

#[test]
fn test_far_away_spawn_stays_finite() {
    let mut sim = Simulation::new(SimulationConfig::default().with_seed(12)).unwrap();
    sim.spawn(1, 1e200, 1e200, 0.0, 2.0).unwrap();
    sim.start();

    for _ in 0..5 {
        sim.tick();
        let p = &sim.particles()[0];
        assert!(p.is_valid(), "particle became non-finite: {:?}", p);
    }
}

#[test]
fn test_overflowing_spawn_reach_is_rejected() {
    let mut sim = Simulation::new(SimulationConfig::default().with_seed(13)).unwrap();

    assert!(matches!(
        sim.spawn(1, f64::MAX, f64::MAX, 0.0, 2.0),
        Err(SimulationError::SpawnOutOfRange { .. })
    ));
    assert!(matches!(
        sim.spawn(1, -f64::MAX, 320.0, f64::MAX, 2.0),
        Err(SimulationError::SpawnOutOfRange { .. })
    ));
    assert_eq!(sim.particle_count(), 0);
}

#[test]
fn test_pool_logging_reaches_subscriber() {
    let config = SimulationConfig::default().with_seed(14);

    let quiet = run_with_captured_logs(config.clone());
    assert!(quiet.contains("spawned particles"));
    assert!(!quiet.contains("allocating new bucket"));

    let verbose = run_with_captured_logs(config.with_pool_logging());
    assert!(verbose.contains("allocating new bucket"));
}

#[test]
fn test_single_particle_has_no_pairs() {
    let mut sim = Simulation::new(weightless()).unwrap();
    sim.spawn(1, 320.0, 320.0, 0.0, 2.0).unwrap();
    sim.step();

    assert_eq!(sim.last_frame().pairs_checked, 0);
    assert_eq!(sim.last_frame().occupied_cells, 1);
}

#[test]
fn test_empty_simulation_ticks() {
    let mut sim = Simulation::new(SimulationConfig::default().with_seed(2)).unwrap();
    sim.start();
    assert!(sim.tick());

    let snapshot = sim.snapshot();
    assert_eq!(snapshot.particles.total, 0);
    assert_eq!(snapshot.particles.average_velocity, 0.0);
    // Nothing awake, so no timing sample
    assert_eq!(snapshot.performance.frame_count, 0);
    assert_eq!(snapshot.performance.fps, 0.0);
}

#[test]
fn test_stopped_tick_changes_nothing() {
    let mut sim = Simulation::new(SimulationConfig::default().with_seed(4)).unwrap();
    sim.spawn(50, 320.0, 320.0, 100.0, 2.0).unwrap();
    let before = sim.particles().to_vec();

    assert_eq!(sim.state(), RunState::Stopped);
    assert!(!sim.tick());
    assert_eq!(sim.particles(), before.as_slice());
}

#[test]
fn test_spawn_errors_leave_population_untouched() {
    let mut sim = Simulation::new(SimulationConfig::default().with_seed(5)).unwrap();
    sim.spawn(10, 320.0, 320.0, 50.0, 2.0).unwrap();

    assert_eq!(
        sim.spawn(0, 320.0, 320.0, 50.0, 2.0),
        Err(SimulationError::InvalidSpawnCount)
    );
    assert!(matches!(
        sim.spawn(5, f64::NAN, 320.0, 50.0, 2.0),
        Err(SimulationError::NonFiniteCenter { .. })
    ));
    assert!(matches!(
        sim.spawn(5, 320.0, 320.0, -1.0, 2.0),
        Err(SimulationError::InvalidSpawnRadius(_))
    ));
    assert!(matches!(
        sim.spawn(5, 320.0, 320.0, 50.0, 0.0),
        Err(SimulationError::InvalidRadius(_))
    ));
    assert!(matches!(
        sim.spawn(5, 320.0, 320.0, 50.0, 30.0),
        Err(SimulationError::ParticleTooLarge { .. })
    ));

    assert_eq!(sim.particle_count(), 10);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let cases = [
        SimulationConfig::default().with_cell_size(0.0),
        SimulationConfig::default().with_cell_size(f64::INFINITY),
        SimulationConfig::default().with_boundary(Vec2::new(0.0, 0.0), -10.0),
        SimulationConfig::default().with_boundary(Vec2::new(f64::NAN, 0.0), 10.0),
        SimulationConfig::default().with_default_population(0),
        SimulationConfig::default().with_default_particle_radius(40.0),
        SimulationConfig::default().with_physics(PhysicsParams::default().with_damping(0.0)),
        SimulationConfig::default().with_physics(PhysicsParams::default().with_friction(1.5)),
    ];

    for config in cases {
        assert!(Simulation::new(config.clone()).is_err(), "accepted {:?}", config);
    }
}

#[test]
fn test_partial_json_config() {
    let json = r#"{ "cell_size": 40.0, "physics": { "gravity": 0.5 }, "seed": 9 }"#;
    let config: SimulationConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.cell_size, 40.0);
    assert_eq!(config.physics.gravity, 0.5);
    assert_eq!(config.physics.damping, PhysicsParams::default().damping);
    assert_eq!(config.boundary_radius, SimulationConfig::default().boundary_radius);
    assert_eq!(config.seed, Some(9));
    assert!(Simulation::new(config).is_ok());
}

#[test]
fn test_config_json_roundtrip() {
    let config = SimulationConfig::default()
        .with_boundary(Vec2::new(10.0, 20.0), 30.0)
        .with_seed(11);
    let json = serde_json::to_string(&config).unwrap();
    let back: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_snapshot_serializes() {
    let mut sim = Simulation::new(SimulationConfig::default().with_seed(6)).unwrap();
    sim.spawn(20, 320.0, 320.0, 50.0, 2.0).unwrap();
    sim.start();
    sim.tick();

    let value = serde_json::to_value(sim.snapshot()).unwrap();
    assert_eq!(value["is_running"], true);
    assert_eq!(value["particles"]["total"], 20);
    assert!(value["performance"]["frame_count"].is_u64());
    assert!(value["performance"]["average_collision_time_ms"].is_number());
}

#[test]
fn test_same_seed_same_run() {
    let run = |seed| {
        let config = SimulationConfig::default()
            .with_seed(seed)
            .with_default_population(200);
        let mut sim = Simulation::new(config).unwrap();
        sim.reset().unwrap();
        for _ in 0..50 {
            sim.tick();
        }
        sim.particles().to_vec()
    };

    assert_eq!(run(8), run(8));
    assert_ne!(run(8), run(9));
}

#[test]
fn test_reset_restores_default_population() {
    let config = SimulationConfig::default()
        .with_seed(10)
        .with_default_population(120);
    let mut sim = Simulation::new(config).unwrap();
    sim.spawn(7, 320.0, 320.0, 10.0, 2.0).unwrap();

    sim.reset().unwrap();

    assert!(sim.is_running());
    assert_eq!(sim.particle_count(), 120);
    let center = sim.boundary().center();
    let spawn_radius = sim.config().default_spawn_radius;
    assert!(sim
        .particles()
        .iter()
        .all(|p| p.position().distance(center) <= spawn_radius + 1e-9));
}
