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
//! Per-particle motion integration
//!
//! This module advances individual particles: gravity, position update,
//! velocity damping, boundary response and sleep detection. Pairwise
//! interaction is handled separately by [`crate::collision`].
//!
//! # Integrators
//!
//! - **Damped Euler**: fixed one-frame step with multiplicative damping, a
//!   sticky circular boundary and instant sleep in the lower half
//!
//! # Frame units
//!
//! There is no timestep parameter. Gravity is a per-frame velocity increment
//! and velocity is a per-frame displacement, so behavior is tied to the
//! host's tick rate rather than wall-clock time.

use crate::particle::{Boundary, Particle};

mod boundary;
mod euler;

pub use boundary::{contain, resolve_boundary_contact, BoundaryContact, FALLBACK_NORMAL};
pub use euler::DampedEulerIntegrator;

/// Trait for per-particle integration methods
///
/// Implementations must be deterministic: the same particle and boundary
/// always produce the same result.
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance one awake particle by one frame
    ///
    /// Must leave a sleeping particle untouched.
    fn advance(&self, particle: &mut Particle, boundary: &Boundary);

    /// Keep a sleeping particle inside the boundary without moving it otherwise
    ///
    /// Collision pushes can shove a sleeping particle past the rim; this
    /// corrects its position only and never touches its velocity.
    fn constrain(&self, particle: &mut Particle, boundary: &Boundary) {
        contain(particle, boundary);
    }

    /// Run one integration pass over every particle
    ///
    /// Awake particles are advanced, sleeping ones are only constrained.
    /// Returns the number of particles advanced.
    fn integrate(&self, particles: &mut [Particle], boundary: &Boundary) -> usize {
        let mut advanced = 0;
        for particle in particles.iter_mut() {
            if particle.is_sleeping() {
                self.constrain(particle, boundary);
            } else {
                self.advance(particle, boundary);
                advanced += 1;
            }
        }
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2::Vec2;

    struct Frozen;

    impl Integrator for Frozen {
        fn name(&self) -> &str {
            "Frozen"
        }

        fn advance(&self, _particle: &mut Particle, _boundary: &Boundary) {}
    }

    #[test]
    fn test_integrate_counts_awake_particles() {
        let boundary = Boundary::new(Vec2::new(0.0, 0.0), 100.0).unwrap();
        let mut particles = vec![
            Particle::new(Vec2::new(0.0, 0.0), Vec2::zero(), 1.0).unwrap(),
            Particle::new(Vec2::new(5.0, 0.0), Vec2::zero(), 1.0).unwrap(),
        ];
        particles[1].sleep();

        assert_eq!(Frozen.integrate(&mut particles, &boundary), 1);
    }

    #[test]
    fn test_default_constrain_pulls_sleeper_inside() {
        let boundary = Boundary::new(Vec2::new(0.0, 0.0), 10.0).unwrap();
        let mut particles = vec![Particle::new(Vec2::new(0.0, 12.0), Vec2::zero(), 1.0).unwrap()];
        particles[0].sleep();

        Frozen.integrate(&mut particles, &boundary);

        assert!(boundary.penetration(&particles[0]).abs() < 1e-9);
        assert!(particles[0].is_sleeping());
        assert_eq!(particles[0].velocity(), Vec2::zero());
    }
}
