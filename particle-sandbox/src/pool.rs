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
//! Memory pooling for reducing allocation churn
//!
//! The spatial grid is rebuilt from scratch every frame. Without pooling each
//! rebuild would allocate one index vector per occupied cell and free it a
//! frame later. [`BucketPool`] keeps emptied vectors around so the steady
//! state allocates nothing.
//!
//! The pool is owned by a single grid and never shared, so it needs no
//! locking.

/// Configuration for bucket pool behavior
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Initial capacity for each freshly allocated bucket
    pub initial_capacity: usize,
    /// Maximum number of idle buckets to keep
    pub max_pool_size: usize,
    /// Whether to log when the pool has to allocate
    pub log_resize_events: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            initial_capacity: 16,
            max_pool_size: 4096,
            log_resize_events: false,
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with custom settings
    pub fn new(initial_capacity: usize, max_pool_size: usize) -> Self {
        PoolConfig {
            initial_capacity,
            max_pool_size,
            log_resize_events: false,
        }
    }

    /// Enable logging for allocation events
    pub fn with_logging(mut self) -> Self {
        self.log_resize_events = true;
        self
    }
}

/// Statistics for monitoring pool performance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolStats {
    /// Number of times a bucket was reused from the pool
    pub hits: usize,
    /// Number of times a new bucket had to be allocated
    pub misses: usize,
    /// Number of released buckets dropped because the pool was full
    pub discarded: usize,
    /// Current number of idle buckets
    pub pool_size: usize,
    /// Peak number of idle buckets
    pub peak_size: usize,
}

impl PoolStats {
    /// Calculate the hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// A pool of reusable index buckets
#[derive(Debug, Default)]
pub struct BucketPool {
    idle: Vec<Vec<usize>>,
    config: PoolConfig,
    stats: PoolStats,
}

impl BucketPool {
    /// Create a new bucket pool with default configuration
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create a new bucket pool with custom configuration
    pub fn with_config(config: PoolConfig) -> Self {
        BucketPool {
            idle: Vec::new(),
            config,
            stats: PoolStats::default(),
        }
    }

    /// Take an empty bucket, reusing an idle one if available
    pub fn acquire(&mut self) -> Vec<usize> {
        match self.idle.pop() {
            Some(bucket) => {
                self.stats.hits += 1;
                self.stats.pool_size = self.idle.len();
                bucket
            }
            None => {
                self.stats.misses += 1;
                if self.config.log_resize_events {
                    tracing::debug!(
                        hit_rate = self.stats.hit_rate(),
                        "BucketPool: allocating new bucket"
                    );
                }
                Vec::with_capacity(self.config.initial_capacity)
            }
        }
    }

    /// Return a bucket for reuse
    ///
    /// The bucket is cleared but keeps its capacity. If the pool is already
    /// at `max_pool_size` the bucket is dropped instead.
    pub fn release(&mut self, mut bucket: Vec<usize>) {
        if self.idle.len() >= self.config.max_pool_size {
            self.stats.discarded += 1;
            return;
        }
        bucket.clear();
        self.idle.push(bucket);
        self.stats.pool_size = self.idle.len();
        if self.stats.pool_size > self.stats.peak_size {
            self.stats.peak_size = self.stats.pool_size;
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get current pool statistics
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Drop all idle buckets
    pub fn clear(&mut self) {
        self.idle.clear();
        self.stats.pool_size = 0;
    }

    /// Get the current number of idle buckets
    pub fn len(&self) -> usize {
        self.idle.len()
    }

    /// Check if the pool has no idle buckets
    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }
}
