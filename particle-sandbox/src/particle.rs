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
//! Particle data and the containment boundary
//!
//! Particles live in a flat arena (`Vec<Particle>`) owned by the simulation
//! and are addressed by [`ParticleId`], the arena index. Particles are never
//! removed individually, so an id stays valid until the arena is cleared.

use crate::error::{Result, SimulationError};
use crate::vec2::Vec2;
use serde::Serialize;
use std::fmt;

/// Stable handle to a particle in the simulation arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ParticleId(usize);

impl ParticleId {
    /// Create an id from a raw arena index
    pub fn new(index: usize) -> Self {
        ParticleId(index)
    }

    /// Get the raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Particle({})", self.0)
    }
}

/// A circular particle
///
/// Radius is fixed at creation. Entering sleep always zeroes the velocity,
/// so a sleeping particle stays motionless until a collision wakes it.
///
/// # Examples
///
/// ```
/// use particle_sandbox::{Particle, Vec2};
///
/// let p = Particle::new(Vec2::new(10.0, 20.0), Vec2::new(1.0, 0.0), 2.0).unwrap();
/// assert_eq!(p.radius(), 2.0);
/// assert!(!p.is_sleeping());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    position: Vec2,
    velocity: Vec2,
    radius: f64,
    sleeping: bool,
    sleep_counter: u32,
}

impl Particle {
    /// Create an awake particle
    ///
    /// Fails if `radius` is not positive and finite.
    pub fn new(position: Vec2, velocity: Vec2, radius: f64) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SimulationError::InvalidRadius(radius));
        }
        Ok(Particle {
            position,
            velocity,
            radius,
            sleeping: false,
            sleep_counter: 0,
        })
    }

    /// Current center position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current speed
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Whether the particle has settled
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Hysteresis counter; reset whenever the particle wakes
    pub fn sleep_counter(&self) -> u32 {
        self.sleep_counter
    }

    /// Move the particle to a new position
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Replace the velocity
    ///
    /// A nonzero velocity wakes a sleeping particle, so a sleeper never moves.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        if self.sleeping && velocity != Vec2::zero() {
            self.wake();
        }
    }

    /// Shift the position by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Zero the velocity and mark the particle as sleeping
    pub fn sleep(&mut self) {
        self.velocity = Vec2::zero();
        self.sleeping = true;
    }

    /// Mark the particle as awake
    pub fn wake(&mut self) {
        self.sleeping = false;
        self.sleep_counter = 0;
    }

    /// Check if position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// The fixed circle that contains every particle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Boundary {
    center: Vec2,
    radius: f64,
}

impl Boundary {
    /// Create a boundary circle
    ///
    /// Fails if `radius` is not positive and finite or `center` is not finite.
    pub fn new(center: Vec2, radius: f64) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SimulationError::config(
                "boundary_radius",
                format!("must be positive and finite, got {radius}"),
            ));
        }
        if !center.is_finite() {
            return Err(SimulationError::config("boundary_center", "must be finite"));
        }
        Ok(Boundary { center, radius })
    }

    /// Circle center
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Circle radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// How far a particle's edge sticks out past the circle (negative when inside)
    pub fn penetration(&self, particle: &Particle) -> f64 {
        particle.position().distance(self.center) + particle.radius() - self.radius
    }
}
