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
//! Spatial partitioning for broad-phase collision detection
//!
//! A uniform grid buckets particle indices by cell so that only particles in
//! the same or adjacent cells are tested against each other. The grid holds
//! arena indices, never particles, and is rebuilt every frame.

mod grid;

pub use grid::{CellKey, SpatialGrid, NEIGHBOR_STENCIL};
