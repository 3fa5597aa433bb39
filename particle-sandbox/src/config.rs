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
//! Simulation configuration
//!
//! Every tunable constant lives here with its default. Values are fixed once
//! a [`Simulation`](crate::Simulation) is constructed. Both structs
//! deserialize with per-field defaults, so a host can load a partial JSON
//! override such as `{"cell_size": 40.0}`.
//!
//! Units are per frame: gravity is added to the vertical velocity once per
//! tick and velocities are added to positions once per tick.

use crate::error::{Result, SimulationError};
use crate::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Per-particle motion and boundary-response constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Added to `vy` every frame
    pub gravity: f64,
    /// Velocity multiplier applied every frame
    pub damping: f64,
    /// Speed below which a particle in the lower half falls asleep
    pub sleep_threshold: f64,
    /// Outward normal speed above which the boundary reflects instead of sticking
    pub bounce_threshold: f64,
    /// Fraction of tangential velocity removed on boundary contact
    pub friction: f64,
    /// Extra `vx` multiplier while in the boundary contact band
    pub boundary_damping: f64,
    /// Width of the inward band where boundary response starts
    pub boundary_slack: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        PhysicsParams {
            gravity: 0.2,
            damping: 0.98,
            sleep_threshold: 0.8,
            bounce_threshold: 0.1,
            friction: 0.05,
            boundary_damping: 0.9,
            boundary_slack: 0.5,
        }
    }
}

impl PhysicsParams {
    /// Set gravity
    pub fn with_gravity(mut self, gravity: f64) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set per-frame velocity damping
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the sleep speed threshold
    pub fn with_sleep_threshold(mut self, threshold: f64) -> Self {
        self.sleep_threshold = threshold;
        self
    }

    /// Set the boundary bounce threshold
    pub fn with_bounce_threshold(mut self, threshold: f64) -> Self {
        self.bounce_threshold = threshold;
        self
    }

    /// Set boundary friction
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Set boundary lateral damping
    pub fn with_boundary_damping(mut self, damping: f64) -> Self {
        self.boundary_damping = damping;
        self
    }

    /// Check every constant against its accepted range
    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(SimulationError::config("gravity", "must be finite"));
        }
        unit_interval("damping", self.damping, false)?;
        unit_interval("friction", self.friction, true)?;
        unit_interval("boundary_damping", self.boundary_damping, true)?;
        non_negative("sleep_threshold", self.sleep_threshold)?;
        non_negative("bounce_threshold", self.bounce_threshold)?;
        non_negative("boundary_slack", self.boundary_slack)?;
        Ok(())
    }
}

/// Top-level simulation configuration
///
/// # Examples
///
/// ```
/// use particle_sandbox::{SimulationConfig, Vec2};
///
/// let config = SimulationConfig::default()
///     .with_boundary(Vec2::new(400.0, 400.0), 350.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Motion and boundary constants
    pub physics: PhysicsParams,
    /// Edge length of one spatial grid cell
    pub cell_size: f64,
    /// Center of the containment circle
    pub boundary_center: Vec2,
    /// Radius of the containment circle
    pub boundary_radius: f64,
    /// Radius used by [`Simulation::spawn_default`](crate::Simulation::spawn_default)
    pub default_particle_radius: f64,
    /// Particle count spawned by `init` on `reset`
    pub default_population: usize,
    /// Disk radius used when spawning the default population
    pub default_spawn_radius: f64,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Log a debug event whenever the grid's bucket pool has to allocate
    pub log_pool_misses: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            physics: PhysicsParams::default(),
            cell_size: 50.0,
            boundary_center: Vec2::new(320.0, 320.0),
            boundary_radius: 300.0,
            default_particle_radius: 2.0,
            default_population: 1000,
            default_spawn_radius: 200.0,
            seed: None,
            log_pool_misses: false,
        }
    }
}

impl SimulationConfig {
    /// Replace the physics constants
    pub fn with_physics(mut self, physics: PhysicsParams) -> Self {
        self.physics = physics;
        self
    }

    /// Set the grid cell size
    pub fn with_cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the containment circle
    pub fn with_boundary(mut self, center: Vec2, radius: f64) -> Self {
        self.boundary_center = center;
        self.boundary_radius = radius;
        self
    }

    /// Set the default particle radius
    pub fn with_default_particle_radius(mut self, radius: f64) -> Self {
        self.default_particle_radius = radius;
        self
    }

    /// Set the population spawned on reset
    pub fn with_default_population(mut self, count: usize) -> Self {
        self.default_population = count;
        self
    }

    /// Set the spawn disk radius used on reset
    pub fn with_default_spawn_radius(mut self, radius: f64) -> Self {
        self.default_spawn_radius = radius;
        self
    }

    /// Seed the spawn RNG for reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Log bucket pool allocations at debug level
    pub fn with_pool_logging(mut self) -> Self {
        self.log_pool_misses = true;
        self
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        self.physics.validate()?;

        positive("cell_size", self.cell_size)?;
        positive("boundary_radius", self.boundary_radius)?;
        non_negative("default_spawn_radius", self.default_spawn_radius)?;
        if !self.boundary_center.is_finite() {
            return Err(SimulationError::config("boundary_center", "must be finite"));
        }
        if !(self.default_particle_radius > 0.0 && self.default_particle_radius.is_finite()) {
            return Err(SimulationError::InvalidRadius(self.default_particle_radius));
        }
        if 2.0 * self.default_particle_radius > self.cell_size {
            return Err(SimulationError::ParticleTooLarge {
                diameter: 2.0 * self.default_particle_radius,
                cell_size: self.cell_size,
            });
        }
        if self.default_population == 0 {
            return Err(SimulationError::config("default_population", "must be at least 1"));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::config(field, format!("must be positive and finite, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::config(field, format!("must be non-negative and finite, got {value}")))
    }
}

fn unit_interval(field: &'static str, value: f64, allow_zero: bool) -> Result<()> {
    let lower_ok = if allow_zero { value >= 0.0 } else { value > 0.0 };
    if lower_ok && value <= 1.0 {
        Ok(())
    } else {
        let range = if allow_zero { "[0, 1]" } else { "(0, 1]" };
        Err(SimulationError::config(field, format!("must be in {range}, got {value}")))
    }
}
