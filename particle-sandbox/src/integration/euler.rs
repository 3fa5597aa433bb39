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
//! Damped semi-implicit Euler integrator
//!
//! # Algorithm
//!
//! One frame for an awake particle:
//!
//! ```text
//! vy += gravity
//! x  += v
//! v  *= damping
//! boundary response
//! if |v| < sleep_threshold and y > center.y: v = 0, sleeping = true
//! ```
//!
//! One slow frame in the lower half of the boundary (screen coordinates,
//! +y down) puts a particle to sleep. There is no debounce; the particle
//! wakes on the next impulse-bearing collision.

use super::boundary::resolve_boundary_contact;
use super::Integrator;
use crate::config::PhysicsParams;
use crate::particle::{Boundary, Particle};

/// Default integrator for the sandbox
///
/// # Example
///
/// ```
/// use particle_sandbox::integration::{DampedEulerIntegrator, Integrator};
/// use particle_sandbox::{Boundary, Particle, PhysicsParams, Vec2};
///
/// let integrator = DampedEulerIntegrator::new(PhysicsParams::default());
/// let boundary = Boundary::new(Vec2::new(0.0, 0.0), 100.0).unwrap();
/// let mut p = Particle::new(Vec2::new(0.0, -50.0), Vec2::zero(), 2.0).unwrap();
///
/// integrator.advance(&mut p, &boundary);
/// assert!(p.velocity().y > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DampedEulerIntegrator {
    params: PhysicsParams,
}

impl DampedEulerIntegrator {
    /// Create an integrator with the given constants
    pub fn new(params: PhysicsParams) -> Self {
        DampedEulerIntegrator { params }
    }

    /// Constants in use
    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }
}

impl Default for DampedEulerIntegrator {
    fn default() -> Self {
        Self::new(PhysicsParams::default())
    }
}

impl Integrator for DampedEulerIntegrator {
    fn name(&self) -> &str {
        "Damped Euler"
    }

    fn advance(&self, particle: &mut Particle, boundary: &Boundary) {
        if particle.is_sleeping() {
            return;
        }

        let mut velocity = particle.velocity();
        velocity.y += self.params.gravity;
        particle.translate(velocity);
        velocity *= self.params.damping;
        particle.set_velocity(velocity);

        resolve_boundary_contact(particle, boundary, &self.params);

        let in_lower_half = particle.position().y > boundary.center().y;
        if particle.speed() < self.params.sleep_threshold && in_lower_half {
            particle.sleep();
        }
    }
}
