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
//! Uniform grid keyed by integer cell coordinates
//!
//! # Candidate pairs
//!
//! For every occupied cell the grid visits a forward-only stencil:
//!
//! ```text
//!            (0,0) (1,0)
//!   (-1,1)   (0,1) (1,1)
//! ```
//!
//! Each unordered pair of 8-connected cells is reached from exactly one of
//! its two cells, so no cell pair is examined twice. Within one cell every
//! unordered particle pair is produced once; across two cells the full cross
//! product is produced.
//!
//! Completeness requires `cell_size >= 2 * max_radius`: two overlapping
//! particles are then never more than one cell apart on either axis.

use crate::particle::Particle;
use crate::pool::{BucketPool, PoolConfig, PoolStats};
use crate::vec2::Vec2;
use std::collections::HashMap;

/// Forward neighbor offsets visited from every occupied cell
pub const NEIGHBOR_STENCIL: [(i32, i32); 5] = [(0, 0), (1, 0), (0, 1), (1, 1), (-1, 1)];

/// Integer grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    /// Column, `floor(x / cell_size)`
    pub x: i32,
    /// Row, `floor(y / cell_size)`
    pub y: i32,
}

impl CellKey {
    /// Create a cell key
    pub const fn new(x: i32, y: i32) -> Self {
        CellKey { x, y }
    }

    /// Neighboring key at the given offset
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        CellKey::new(self.x.wrapping_add(dx), self.y.wrapping_add(dy))
    }
}

/// Spatial hash grid over particle arena indices
///
/// Occupied cells are visited in the order they were first filled during
/// the last rebuild, which keeps pair enumeration deterministic for a given
/// particle order.
///
/// # Examples
///
/// ```
/// use particle_sandbox::spatial::SpatialGrid;
/// use particle_sandbox::{Particle, Vec2};
///
/// let particles = vec![
///     Particle::new(Vec2::new(49.0, 10.0), Vec2::zero(), 2.0).unwrap(),
///     Particle::new(Vec2::new(51.0, 10.0), Vec2::zero(), 2.0).unwrap(),
/// ];
/// let mut grid = SpatialGrid::new(50.0);
/// grid.rebuild(&particles);
/// assert_eq!(grid.candidate_pairs(), vec![(0, 1)]);
/// ```
#[derive(Debug)]
pub struct SpatialGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<usize>>,
    occupied: Vec<CellKey>,
    pool: BucketPool,
}

impl SpatialGrid {
    /// Create an empty grid
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is non-positive, NaN, or infinite
    pub fn new(cell_size: f64) -> Self {
        Self::with_pool(cell_size, BucketPool::new())
    }

    /// Create an empty grid that recycles buckets through `pool`
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is non-positive, NaN, or infinite
    pub fn with_pool(cell_size: f64, pool: BucketPool) -> Self {
        assert!(
            cell_size > 0.0 && cell_size.is_finite(),
            "Cell size must be positive and finite"
        );
        SpatialGrid {
            cell_size,
            cells: HashMap::new(),
            occupied: Vec::new(),
            pool,
        }
    }

    /// Edge length of one cell
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell containing a position
    pub fn cell_of(&self, position: Vec2) -> CellKey {
        CellKey::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Empty every bucket, returning them to the pool
    pub fn clear(&mut self) {
        for (_, bucket) in self.cells.drain() {
            self.pool.release(bucket);
        }
        self.occupied.clear();
    }

    /// Add one arena index at the given position
    pub fn insert(&mut self, index: usize, position: Vec2) {
        let key = self.cell_of(position);
        let pool = &mut self.pool;
        let occupied = &mut self.occupied;
        self.cells
            .entry(key)
            .or_insert_with(|| {
                occupied.push(key);
                pool.acquire()
            })
            .push(index);
    }

    /// Clear the grid and bucket every particle by its current position
    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.clear();
        for (index, particle) in particles.iter().enumerate() {
            self.insert(index, particle.position());
        }
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.occupied.len()
    }

    /// Number of indices stored across all cells
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Check if the grid holds no indices
    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Indices stored in one cell
    pub fn bucket(&self, key: CellKey) -> Option<&[usize]> {
        self.cells.get(&key).map(Vec::as_slice)
    }

    /// Bucket pool statistics
    pub fn pool_stats(&self) -> &PoolStats {
        self.pool.stats()
    }

    /// Bucket pool configuration
    pub fn pool_config(&self) -> &PoolConfig {
        self.pool.config()
    }

    /// Call `visit` for every candidate pair and return how many were visited
    pub fn for_each_candidate_pair<F>(&self, mut visit: F) -> usize
    where
        F: FnMut(usize, usize),
    {
        let mut visited = 0;
        for &key in &self.occupied {
            let Some(current) = self.cells.get(&key) else {
                continue;
            };

            for (dx, dy) in NEIGHBOR_STENCIL {
                if (dx, dy) == (0, 0) {
                    for (i, &a) in current.iter().enumerate() {
                        for &b in &current[i + 1..] {
                            visit(a, b);
                            visited += 1;
                        }
                    }
                } else if let Some(neighbor) = self.cells.get(&key.offset(dx, dy)) {
                    for &a in current {
                        for &b in neighbor {
                            visit(a, b);
                            visited += 1;
                        }
                    }
                }
            }
        }
        visited
    }

    /// Collect every candidate pair
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        self.for_each_candidate_pair(|a, b| pairs.push((a, b)));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn particle_at(x: f64, y: f64) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::zero(), 2.0).unwrap()
    }

    fn unordered(pairs: &[(usize, usize)]) -> Vec<(usize, usize)> {
        let mut out: Vec<_> = pairs.iter().map(|&(a, b)| (a.min(b), a.max(b))).collect();
        out.sort();
        out
    }

    #[test]
    fn test_cell_of_floors_negative_coordinates() {
        let grid = SpatialGrid::new(50.0);
        assert_eq!(grid.cell_of(Vec2::new(0.0, 0.0)), CellKey::new(0, 0));
        assert_eq!(grid.cell_of(Vec2::new(49.9, 50.0)), CellKey::new(0, 1));
        assert_eq!(grid.cell_of(Vec2::new(-0.1, -50.0)), CellKey::new(-1, -1));
        assert_eq!(grid.cell_of(Vec2::new(-50.1, 120.0)), CellKey::new(-2, 2));
    }

    #[test]
    #[should_panic(expected = "Cell size must be positive and finite")]
    fn test_zero_cell_size_panics() {
        SpatialGrid::new(0.0);
    }

    #[test]
    fn test_rebuild_buckets_every_particle() {
        let particles = vec![
            particle_at(10.0, 10.0),
            particle_at(20.0, 20.0),
            particle_at(75.0, 10.0),
        ];
        let mut grid = SpatialGrid::new(50.0);
        grid.rebuild(&particles);

        assert_eq!(grid.len(), 3);
        assert_eq!(grid.occupied_cells(), 2);
        assert_eq!(grid.bucket(CellKey::new(0, 0)), Some(&[0, 1][..]));
        assert_eq!(grid.bucket(CellKey::new(1, 0)), Some(&[2][..]));
    }

    #[test]
    fn test_same_cell_pairs_are_unordered_and_unique() {
        let particles = vec![particle_at(1.0, 1.0), particle_at(2.0, 2.0), particle_at(3.0, 3.0)];
        let mut grid = SpatialGrid::new(50.0);
        grid.rebuild(&particles);

        assert_eq!(grid.candidate_pairs(), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_straddling_cell_border_is_a_candidate() {
        let particles = vec![particle_at(49.0, 10.0), particle_at(51.0, 10.0)];
        let mut grid = SpatialGrid::new(50.0);
        grid.rebuild(&particles);

        assert_eq!(unordered(&grid.candidate_pairs()), vec![(0, 1)]);
    }

    #[test]
    fn test_each_adjacent_cell_pair_visited_once() {
        // One particle in the center of each cell of a 3x3 block
        let mut particles = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                particles.push(particle_at(25.0 + 50.0 * col as f64, 25.0 + 50.0 * row as f64));
            }
        }
        let mut grid = SpatialGrid::new(50.0);
        grid.rebuild(&particles);

        let pairs = unordered(&grid.candidate_pairs());
        let unique: HashSet<_> = pairs.iter().copied().collect();

        // 6 horizontal + 6 vertical + 8 diagonal neighbor pairs
        assert_eq!(pairs.len(), 20);
        assert_eq!(unique.len(), 20);
        for &(a, b) in &pairs {
            let (ra, ca) = (a / 3, a % 3);
            let (rb, cb) = (b / 3, b % 3);
            assert!((ra as i32 - rb as i32).abs() <= 1 && (ca as i32 - cb as i32).abs() <= 1);
        }
    }

    #[test]
    fn test_distant_cells_produce_no_pairs() {
        let particles = vec![
            particle_at(10.0, 10.0),
            particle_at(110.0, 10.0),
            particle_at(10.0, 110.0),
        ];
        let mut grid = SpatialGrid::new(50.0);
        grid.rebuild(&particles);

        assert!(grid.candidate_pairs().is_empty());
    }

    #[test]
    fn test_rebuild_recycles_buckets() {
        let particles = vec![particle_at(10.0, 10.0), particle_at(110.0, 10.0)];
        let mut grid = SpatialGrid::new(50.0);

        grid.rebuild(&particles);
        assert_eq!(grid.pool_stats().misses, 2);

        grid.rebuild(&particles);
        assert_eq!(grid.pool_stats().misses, 2);
        assert_eq!(grid.pool_stats().hits, 2);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_clear_empties_grid() {
        let mut grid = SpatialGrid::new(50.0);
        grid.rebuild(&[particle_at(1.0, 1.0)]);
        assert!(!grid.is_empty());

        grid.clear();
        assert!(grid.is_empty());
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.for_each_candidate_pair(|_, _| {}), 0);
    }
}
