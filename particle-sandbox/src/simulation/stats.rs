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
//! Statistics handed to the renderer

use crate::collision::Contact;
use crate::particle::Particle;
use serde::Serialize;
use std::time::Duration;

/// Smoothing factor for the collision-time moving average
pub const COLLISION_TIME_SMOOTHING: f64 = 0.1;

/// Population summary
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ParticleStats {
    /// Number of particles
    pub total: usize,
    /// Number of sleeping particles
    pub sleeping: usize,
    /// Number of awake particles
    pub awake: usize,
    /// Mean speed over awake particles, 0 when none are awake
    pub average_velocity: f64,
}

impl ParticleStats {
    /// Summarize a particle slice
    pub fn from_particles(particles: &[Particle]) -> Self {
        let mut sleeping = 0;
        let mut awake = 0;
        let mut total_speed = 0.0;

        for particle in particles {
            if particle.is_sleeping() {
                sleeping += 1;
            } else {
                awake += 1;
                total_speed += particle.speed();
            }
        }

        ParticleStats {
            total: particles.len(),
            sleeping,
            awake,
            average_velocity: if awake > 0 { total_speed / awake as f64 } else { 0.0 },
        }
    }
}

/// Collision-pass timing snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PerformanceStats {
    /// Wall-clock time of the most recent sampled collision pass, in ms
    pub last_collision_time_ms: f64,
    /// Exponential moving average of the collision pass, in ms
    pub average_collision_time_ms: f64,
    /// Number of sampled frames
    pub frame_count: u64,
    /// `1000 / average_collision_time_ms`, or 0 before any frame was sampled
    pub fps: f64,
}

/// Running collision-pass timing
///
/// Frames without awake particles are not sampled, so an idle simulation
/// keeps reporting the cost of its last busy frame.
#[derive(Debug, Clone, Default)]
pub struct PerformanceTracker {
    last_ms: f64,
    average_ms: f64,
    frame_count: u64,
}

impl PerformanceTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one collision pass; ignored when `awake` is zero
    ///
    /// Returns true if the sample was recorded.
    pub fn record(&mut self, elapsed: Duration, awake: usize) -> bool {
        if awake == 0 {
            return false;
        }
        let ms = elapsed.as_secs_f64() * 1000.0;
        self.last_ms = ms;
        self.frame_count += 1;
        self.average_ms =
            self.average_ms * (1.0 - COLLISION_TIME_SMOOTHING) + ms * COLLISION_TIME_SMOOTHING;
        true
    }

    /// Current snapshot
    pub fn snapshot(&self) -> PerformanceStats {
        let fps = if self.frame_count > 0 && self.average_ms > 0.0 {
            1000.0 / self.average_ms
        } else {
            0.0
        };
        PerformanceStats {
            last_collision_time_ms: self.last_ms,
            average_collision_time_ms: self.average_ms,
            frame_count: self.frame_count,
            fps,
        }
    }

    /// Forget all samples
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Broad- and narrow-phase counts for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FrameStats {
    /// Particles advanced by the integrator
    pub advanced: usize,
    /// Occupied grid cells
    pub occupied_cells: usize,
    /// Candidate pairs produced by the grid
    pub pairs_checked: usize,
    /// Pairs that were overlapping
    pub contacts: usize,
    /// Pairs that received an impulse
    pub impulses: usize,
}

impl FrameStats {
    /// Count one resolved pair
    pub fn record(&mut self, contact: Contact) {
        if contact.is_touching() {
            self.contacts += 1;
        }
        if contact == Contact::Impulse {
            self.impulses += 1;
        }
    }
}

/// Combined view for a debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationSnapshot {
    /// Population summary
    pub particles: ParticleStats,
    /// Collision-pass timing
    pub performance: PerformanceStats,
    /// Whether ticks are currently being run
    pub is_running: bool,
}
