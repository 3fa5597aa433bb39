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
//! Pairwise collision resolution between particles
//!
//! # Algorithm
//!
//! ```text
//! d       = b.p - a.p,  dist = |d|
//! overlap = a.r + b.r - dist
//! n       = d / dist
//! a.p    -= n * overlap / 2
//! b.p    += n * overlap / 2
//! rel     = (b.v - a.v)·n
//! if rel < 0:
//!     a.v += n * rel      (impulse j = -rel)
//!     b.v -= n * rel
//!     wake a and b
//! ```
//!
//! All particles have unit mass, so the correction is split evenly and the
//! impulse swaps the normal components of the two velocities. Pairs that are
//! already separating only receive the positional correction.
//!
//! Degenerate pairs (coincident centers) are skipped for the frame rather
//! than producing a NaN normal.

use crate::particle::Particle;

/// Outcome of resolving one candidate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Pair was not examined: both asleep, coincident centers, or invalid indices
    Skipped,
    /// Circles do not overlap
    Apart,
    /// Overlap was corrected positionally; the pair was not approaching
    Separated,
    /// Overlap was corrected and an impulse applied; both particles woke
    Impulse,
}

impl Contact {
    /// Whether the circles were overlapping
    pub fn is_touching(&self) -> bool {
        matches!(self, Contact::Separated | Contact::Impulse)
    }
}

/// Borrow two distinct arena slots mutably
fn pair_mut(
    particles: &mut [Particle],
    a: usize,
    b: usize,
) -> Option<(&mut Particle, &mut Particle)> {
    if a == b || a.max(b) >= particles.len() {
        return None;
    }
    if a < b {
        let (head, tail) = particles.split_at_mut(b);
        Some((&mut head[a], &mut tail[0]))
    } else {
        let (head, tail) = particles.split_at_mut(a);
        Some((&mut tail[0], &mut head[b]))
    }
}

/// Resolves overlapping particle pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Create a resolver
    pub fn new() -> Self {
        CollisionResolver
    }

    /// Resolve the pair at arena indices `a` and `b`
    pub fn resolve(&self, particles: &mut [Particle], a: usize, b: usize) -> Contact {
        match pair_mut(particles, a, b) {
            Some((first, second)) => self.resolve_pair(first, second),
            None => Contact::Skipped,
        }
    }

    /// Resolve two particles directly
    pub fn resolve_pair(&self, a: &mut Particle, b: &mut Particle) -> Contact {
        if a.is_sleeping() && b.is_sleeping() {
            return Contact::Skipped;
        }

        let delta = b.position() - a.position();
        let dist = delta.length();
        if dist == 0.0 {
            tracing::trace!("skipping pair with coincident centers");
            return Contact::Skipped;
        }

        let overlap = a.radius() + b.radius() - dist;
        if overlap <= 0.0 {
            return Contact::Apart;
        }

        let normal = delta * (1.0 / dist);
        let push = normal * (overlap / 2.0);
        a.translate(-push);
        b.translate(push);

        let rel_vel = (b.velocity() - a.velocity()).dot(normal);
        if rel_vel >= 0.0 {
            return Contact::Separated;
        }

        let impulse = normal * -rel_vel;
        a.set_velocity(a.velocity() - impulse);
        b.set_velocity(b.velocity() + impulse);
        a.wake();
        b.wake();
        Contact::Impulse
    }
}
