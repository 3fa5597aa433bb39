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
//! Random particle placement
//!
//! Particles are sampled uniformly over the area of a disk: the angle is
//! uniform on `[0, 2π)` and the distance is `R * sqrt(u)` for uniform `u`.
//! Taking the square root compensates for the ring area growing with the
//! radius, so points do not bunch up at the center.
//!
//! Initial velocity components are `(u - 0.5) * 100`, i.e. uniform on
//! `[-50, 50)` per axis.

use crate::error::{Result, SimulationError};
use crate::particle::Particle;
use crate::vec2::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// Half-width of the per-axis initial velocity range
pub const SPAWN_VELOCITY_SPREAD: f64 = 50.0;

/// Parameters for one spawn request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// Number of particles to create
    pub count: usize,
    /// Disk center
    pub center: Vec2,
    /// Disk radius
    pub spawn_radius: f64,
    /// Radius of every created particle
    pub particle_radius: f64,
}

impl SpawnRequest {
    /// Describe a spawn request
    pub fn new(count: usize, center: Vec2, spawn_radius: f64, particle_radius: f64) -> Self {
        SpawnRequest {
            count,
            center,
            spawn_radius,
            particle_radius,
        }
    }

    /// Reject requests that would create degenerate particles
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(SimulationError::InvalidSpawnCount);
        }
        if !self.center.is_finite() {
            return Err(SimulationError::NonFiniteCenter {
                x: self.center.x,
                y: self.center.y,
            });
        }
        if !(self.spawn_radius >= 0.0 && self.spawn_radius.is_finite()) {
            return Err(SimulationError::InvalidSpawnRadius(self.spawn_radius));
        }
        if !(self.particle_radius > 0.0 && self.particle_radius.is_finite()) {
            return Err(SimulationError::InvalidRadius(self.particle_radius));
        }
        Ok(())
    }
}

/// Seedable particle generator
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: StdRng,
}

impl Spawner {
    /// Create a spawner; `None` seeds from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Spawner { rng }
    }

    /// Sample a point uniformly over a disk
    pub fn sample_disk(&mut self, center: Vec2, radius: f64) -> Vec2 {
        let angle = self.rng.gen::<f64>() * TAU;
        let dist = self.rng.gen::<f64>().sqrt() * radius;
        center + Vec2::new(angle.cos(), angle.sin()) * dist
    }

    /// Sample an initial velocity
    pub fn sample_velocity(&mut self) -> Vec2 {
        let scale = 2.0 * SPAWN_VELOCITY_SPREAD;
        Vec2::new(
            (self.rng.gen::<f64>() - 0.5) * scale,
            (self.rng.gen::<f64>() - 0.5) * scale,
        )
    }

    /// Create the particles for a request
    ///
    /// Nothing is created if the request is invalid.
    pub fn spawn(&mut self, request: &SpawnRequest) -> Result<Vec<Particle>> {
        request.validate()?;

        let mut particles = Vec::with_capacity(request.count);
        for _ in 0..request.count {
            let position = self.sample_disk(request.center, request.spawn_radius);
            let velocity = self.sample_velocity();
            particles.push(Particle::new(position, velocity, request.particle_radius)?);
        }
        Ok(particles)
    }
}
