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
//! Construction-time errors
//!
//! The simulation itself cannot fail once running: degenerate geometry is
//! absorbed as a no-op. Everything that can go wrong is caught when a
//! configuration is validated or when particles are spawned.

use thiserror::Error;

/// Errors reported when building a simulation or spawning particles
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Particle radius was zero, negative, or not finite
    #[error("particle radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// A spawn request asked for zero particles
    #[error("spawn count must be at least 1")]
    InvalidSpawnCount,

    /// Spawn disk radius was negative or not finite
    #[error("spawn radius must be non-negative and finite, got {0}")]
    InvalidSpawnRadius(f64),

    /// Spawn center had a NaN or infinite coordinate
    #[error("spawn center ({x}, {y}) is not finite")]
    NonFiniteCenter {
        /// Requested center x
        x: f64,
        /// Requested center y
        y: f64,
    },

    /// Particle would not fit in one grid cell, so the neighbor stencil
    /// could miss its contacts
    #[error("particle diameter {diameter} exceeds grid cell size {cell_size}")]
    ParticleTooLarge {
        /// Requested particle diameter
        diameter: f64,
        /// Configured grid cell size
        cell_size: f64,
    },

    /// Spawn disk lies so far from the boundary that its reach overflows
    #[error("spawn disk reach {reach} from the boundary center is not finite")]
    SpawnOutOfRange {
        /// Distance from the boundary center to the far edge of the disk
        reach: f64,
    },

    /// A configuration field is out of range
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable description of the accepted range
        reason: String,
    },
}

impl SimulationError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, SimulationError>;
