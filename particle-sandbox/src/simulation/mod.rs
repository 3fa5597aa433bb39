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
//! Frame orchestration
//!
//! [`Simulation`] owns the particle arena and runs one frame per
//! [`tick`](Simulation::tick):
//!
//! 1. integration pass over every particle
//! 2. spatial grid rebuild
//! 3. collision resolution over every candidate pair
//! 4. statistics update
//!
//! The host owns scheduling. It calls `tick` once per display refresh and
//! reads [`particles`](Simulation::particles) to draw. `tick` takes
//! `&mut self`, so frames cannot overlap and nothing else can touch the
//! arena while one is running.

mod stats;

pub use stats::{
    FrameStats, ParticleStats, PerformanceStats, PerformanceTracker, SimulationSnapshot,
    COLLISION_TIME_SMOOTHING,
};

use crate::collision::CollisionResolver;
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::integration::{DampedEulerIntegrator, Integrator};
use crate::particle::{Boundary, Particle, ParticleId};
use crate::pool::{BucketPool, PoolConfig};
use crate::spatial::SpatialGrid;
use crate::spawn::{SpawnRequest, Spawner};
use crate::vec2::Vec2;
use std::time::Instant;

/// Whether ticks are being run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// `tick` advances the simulation
    Running,
    /// `tick` is a no-op
    Stopped,
}

/// The particle sandbox
///
/// # Examples
///
/// ```
/// use particle_sandbox::{Simulation, SimulationConfig, Vec2};
///
/// let mut sim = Simulation::new(SimulationConfig::default().with_seed(1)).unwrap();
/// sim.spawn(100, 320.0, 320.0, 100.0, 2.0).unwrap();
/// sim.start();
/// for _ in 0..10 {
///     sim.tick();
/// }
/// assert_eq!(sim.stats().total, 100);
/// ```
pub struct Simulation {
    config: SimulationConfig,
    boundary: Boundary,
    particles: Vec<Particle>,
    integrator: Box<dyn Integrator>,
    resolver: CollisionResolver,
    grid: SpatialGrid,
    spawner: Spawner,
    state: RunState,
    performance: PerformanceTracker,
    last_frame: FrameStats,
}

impl Simulation {
    /// Create a stopped, empty simulation using the damped Euler integrator
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let integrator = DampedEulerIntegrator::new(config.physics);
        Self::with_integrator(config, Box::new(integrator))
    }

    /// Create a stopped, empty simulation with a custom integrator
    pub fn with_integrator(
        config: SimulationConfig,
        integrator: Box<dyn Integrator>,
    ) -> Result<Self> {
        config.validate()?;
        let boundary = Boundary::new(config.boundary_center, config.boundary_radius)?;

        tracing::debug!(
            integrator = integrator.name(),
            cell_size = config.cell_size,
            boundary_radius = config.boundary_radius,
            "simulation created"
        );

        let mut pool_config = PoolConfig::default();
        if config.log_pool_misses {
            pool_config = pool_config.with_logging();
        }
        let pool = BucketPool::with_config(pool_config);

        Ok(Simulation {
            grid: SpatialGrid::with_pool(config.cell_size, pool),
            spawner: Spawner::new(config.seed),
            boundary,
            particles: Vec::new(),
            integrator,
            resolver: CollisionResolver::new(),
            state: RunState::Stopped,
            performance: PerformanceTracker::new(),
            last_frame: FrameStats::default(),
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The containment circle
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Current run state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Whether ticks are being run
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Add `count` particles uniformly over a disk
    ///
    /// Returns the ids of the new particles. Nothing is added on error.
    pub fn spawn(
        &mut self,
        count: usize,
        center_x: f64,
        center_y: f64,
        spawn_radius: f64,
        particle_radius: f64,
    ) -> Result<Vec<ParticleId>> {
        let center = Vec2::new(center_x, center_y);
        let request = SpawnRequest::new(count, center, spawn_radius, particle_radius);
        self.spawn_request(&request)
    }

    /// Like [`spawn`](Self::spawn) using the configured default particle radius
    pub fn spawn_default(
        &mut self,
        count: usize,
        center_x: f64,
        center_y: f64,
        spawn_radius: f64,
    ) -> Result<Vec<ParticleId>> {
        let radius = self.config.default_particle_radius;
        self.spawn(count, center_x, center_y, spawn_radius, radius)
    }

    /// Spawn from a prepared request
    pub fn spawn_request(&mut self, request: &SpawnRequest) -> Result<Vec<ParticleId>> {
        let diameter = 2.0 * request.particle_radius;
        if diameter > self.config.cell_size {
            return Err(SimulationError::ParticleTooLarge {
                diameter,
                cell_size: self.config.cell_size,
            });
        }

        request.validate()?;
        let reach = request.center.distance(self.boundary.center()) + request.spawn_radius;
        if !reach.is_finite() {
            return Err(SimulationError::SpawnOutOfRange { reach });
        }
        if reach > self.boundary.radius() {
            tracing::warn!(
                reach,
                boundary_radius = self.boundary.radius(),
                "spawn disk extends past the boundary, outer particles will be pulled in"
            );
        }

        let spawned = self.spawner.spawn(request)?;
        let first = self.particles.len();
        self.particles.extend(spawned);

        tracing::debug!(
            count = request.count,
            total = self.particles.len(),
            "spawned particles"
        );
        Ok((first..self.particles.len()).map(ParticleId::new).collect())
    }

    /// Add one particle built by the caller
    pub fn insert(&mut self, particle: Particle) -> Result<ParticleId> {
        let diameter = 2.0 * particle.radius();
        if diameter > self.config.cell_size {
            return Err(SimulationError::ParticleTooLarge {
                diameter,
                cell_size: self.config.cell_size,
            });
        }
        self.particles.push(particle);
        Ok(ParticleId::new(self.particles.len() - 1))
    }

    /// Remove every particle
    pub fn clear(&mut self) {
        self.particles.clear();
        self.grid.clear();
        tracing::debug!("cleared all particles");
    }

    /// Replace the population with `count` particles in the default spawn disk
    ///
    /// The disk is centered on the boundary with the configured spawn radius.
    pub fn init(&mut self, count: usize) -> Result<()> {
        self.clear();
        let center = self.boundary.center();
        let request = SpawnRequest::new(
            count,
            center,
            self.config.default_spawn_radius,
            self.config.default_particle_radius,
        );
        self.spawn_request(&request)?;
        Ok(())
    }

    /// Start running ticks; no-op if already running
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.state = RunState::Running;
        tracing::info!(particles = self.particles.len(), "simulation started");
    }

    /// Stop running ticks; no-op if already stopped
    pub fn stop(&mut self) {
        if self.state == RunState::Stopped {
            return;
        }
        self.state = RunState::Stopped;
        tracing::info!("simulation stopped");
    }

    /// Flip between running and stopped
    pub fn toggle_pause(&mut self) {
        match self.state {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
    }

    /// Stop, respawn the default population, and start again
    ///
    /// Collision timing starts over from zero samples.
    pub fn reset(&mut self) -> Result<()> {
        self.stop();
        self.performance.reset();
        self.last_frame = FrameStats::default();
        self.init(self.config.default_population)?;
        self.start();
        Ok(())
    }

    /// Run one frame if running
    ///
    /// Returns false without touching any state when stopped.
    pub fn tick(&mut self) -> bool {
        if self.state != RunState::Running {
            return false;
        }
        self.step();
        true
    }

    /// Run one frame regardless of the run state
    pub fn step(&mut self) {
        let mut frame = FrameStats {
            advanced: self.integrator.integrate(&mut self.particles, &self.boundary),
            ..FrameStats::default()
        };
        let awake = self.particles.iter().filter(|p| !p.is_sleeping()).count();

        let started = Instant::now();
        self.grid.rebuild(&self.particles);
        frame.occupied_cells = self.grid.occupied_cells();

        let resolver = &self.resolver;
        let particles = &mut self.particles;
        let pairs_checked = self.grid.for_each_candidate_pair(|a, b| {
            frame.record(resolver.resolve(particles, a, b));
        });
        let elapsed = started.elapsed();
        frame.pairs_checked = pairs_checked;

        self.performance.record(elapsed, awake);
        self.last_frame = frame;

        tracing::trace!(
            advanced = frame.advanced,
            pairs = frame.pairs_checked,
            contacts = frame.contacts,
            impulses = frame.impulses,
            elapsed_us = elapsed.as_micros() as u64,
            "frame complete"
        );
    }

    /// Particles in insertion order
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Look up one particle
    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(id.index())
    }

    /// Number of particles
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Population summary
    pub fn stats(&self) -> ParticleStats {
        ParticleStats::from_particles(&self.particles)
    }

    /// Collision-pass timing
    pub fn performance_stats(&self) -> PerformanceStats {
        self.performance.snapshot()
    }

    /// Broad-phase grid as of the last frame
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Counts from the most recent frame
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    /// Everything a debug overlay shows
    pub fn snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot {
            particles: self.stats(),
            performance: self.performance_stats(),
            is_running: self.is_running(),
        }
    }
}
