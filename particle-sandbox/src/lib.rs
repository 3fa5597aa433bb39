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
//! # Particle Sandbox
//!
//! A 2D sandbox of circular particles falling under gravity inside a fixed
//! circular boundary. Particles collide with each other and the boundary,
//! and settle into a sleeping state once they come to rest.
//!
//! ## Features
//!
//! - **Damped Integration**: gravity, damping and a sticky, frictional boundary
//! - **Spatial Grid**: uniform-cell broad phase with a five-offset forward stencil
//! - **Impulse Collisions**: equal-mass positional correction and elastic normal impulse
//! - **Sleeping**: resting particles drop out of integration until struck
//! - **Frame Statistics**: population counts and smoothed collision-pass timing
//!
//! The crate is a pure core: it never draws or schedules. A host calls
//! [`Simulation::tick`] once per display refresh and reads
//! [`Simulation::particles`] to render.
//!
//! ## Example
//!
//! ```rust
//! use particle_sandbox::{Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::default().with_seed(42).with_default_population(200);
//! let mut sim = Simulation::new(config).unwrap();
//! sim.reset().unwrap();
//!
//! for _ in 0..60 {
//!     sim.tick();
//! }
//!
//! let stats = sim.stats();
//! assert_eq!(stats.total, 200);
//! assert_eq!(stats.sleeping + stats.awake, 200);
//! ```

#![warn(missing_docs)]

/// Two-dimensional vector math
pub mod vec2;

/// Construction-time errors
pub mod error;

/// Simulation configuration
pub mod config;

/// Particle data and the containment boundary
pub mod particle;

/// Per-particle motion integration
pub mod integration;

/// Memory pooling for reducing allocation churn
pub mod pool;

/// Broad-phase spatial partitioning
pub mod spatial;

/// Pairwise collision resolution
pub mod collision;

/// Random particle placement
pub mod spawn;

/// Frame orchestration and statistics
pub mod simulation;

pub use collision::{CollisionResolver, Contact};
pub use config::{PhysicsParams, SimulationConfig};
pub use error::{Result, SimulationError};
pub use particle::{Boundary, Particle, ParticleId};
pub use simulation::{
    FrameStats, ParticleStats, PerformanceStats, RunState, Simulation, SimulationSnapshot,
};
pub use vec2::Vec2;
