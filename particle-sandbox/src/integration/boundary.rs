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
//! Response against the circular boundary
//!
//! # Algorithm
//!
//! ```text
//! d     = p - c,  dist = |d|,  n = d / dist
//! reach = dist + r
//! if reach > R - slack:
//!     p  -= n * max(0, reach - R)
//!     vn  = v·n
//!     v  -= n * (vn > bounce ? 2*vn : vn)
//!     t   = (-ny, nx)
//!     v  -= t * friction * (v·t)
//! if reach >= R - slack:
//!     vx *= boundary_damping
//! ```
//!
//! Reflection only happens above the bounce threshold; slower outward
//! motion is cancelled instead, which lets particles pile up against the
//! rim without jitter.

use crate::config::PhysicsParams;
use crate::particle::{Boundary, Particle};
use crate::vec2::Vec2;

/// Normal used when a particle sits exactly on the boundary center
pub const FALLBACK_NORMAL: Vec2 = Vec2::new(0.0, 1.0);

/// What happened during a boundary check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryContact {
    /// Particle is clear of the contact band
    Clear,
    /// Outward velocity exceeded the bounce threshold and was reflected
    Bounced,
    /// Outward velocity was cancelled
    Stuck,
}

fn contact_normal(offset: Vec2, dist: f64) -> Vec2 {
    if dist > 0.0 {
        offset * (1.0 / dist)
    } else {
        tracing::trace!("particle at boundary center, using fallback normal");
        FALLBACK_NORMAL
    }
}

/// Apply positional, normal, friction and damping response for one particle
pub fn resolve_boundary_contact(
    particle: &mut Particle,
    boundary: &Boundary,
    params: &PhysicsParams,
) -> BoundaryContact {
    let offset = particle.position() - boundary.center();
    let dist = offset.length();
    let reach = dist + particle.radius();
    let band_edge = boundary.radius() - params.boundary_slack;

    let mut contact = BoundaryContact::Clear;
    let mut velocity = particle.velocity();

    if reach > band_edge {
        let normal = contact_normal(offset, dist);

        let penetration = (reach - boundary.radius()).max(0.0);
        particle.translate(-normal * penetration);

        let vel_along_normal = velocity.dot(normal);
        if vel_along_normal > params.bounce_threshold {
            velocity -= normal * (2.0 * vel_along_normal);
            contact = BoundaryContact::Bounced;
        } else {
            velocity -= normal * vel_along_normal;
            contact = BoundaryContact::Stuck;
        }

        let tangent = normal.perp();
        let vel_along_tangent = velocity.dot(tangent);
        velocity -= tangent * (params.friction * vel_along_tangent);
    }

    if reach >= band_edge {
        velocity.x *= params.boundary_damping;
    }

    particle.set_velocity(velocity);
    contact
}

/// Push a particle back inside the boundary, leaving its velocity alone
///
/// Returns true if the position was corrected.
pub fn contain(particle: &mut Particle, boundary: &Boundary) -> bool {
    let offset = particle.position() - boundary.center();
    let dist = offset.length();
    let penetration = dist + particle.radius() - boundary.radius();
    if penetration <= 0.0 {
        return false;
    }
    let normal = contact_normal(offset, dist);
    particle.translate(-normal * penetration);
    true
}
