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
//! Benchmarks for the broad and narrow collision phases
//!
//! Compares grid pair generation against the all-pairs scan it replaces and
//! measures the effect of bucket pooling on grid rebuilds.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use particle_sandbox::pool::{BucketPool, PoolConfig};
use particle_sandbox::spatial::SpatialGrid;
use particle_sandbox::spawn::{SpawnRequest, Spawner};
use particle_sandbox::{CollisionResolver, Particle, Vec2};

fn setup_particles(n: usize) -> Vec<Particle> {
    let mut spawner = Spawner::new(Some(42));
    let request = SpawnRequest::new(n, Vec2::new(320.0, 320.0), 300.0, 2.0);
    spawner.spawn(&request).unwrap()
}

fn bench_grid_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_rebuild");

    for n in [100, 1000, 5000].iter() {
        let particles = setup_particles(*n);

        group.bench_with_input(BenchmarkId::new("pooled", n), n, |b, _| {
            let mut grid = SpatialGrid::new(50.0);
            b.iter(|| grid.rebuild(black_box(&particles)));
        });

        group.bench_with_input(BenchmarkId::new("unpooled", n), n, |b, _| {
            // A pool that keeps nothing forces a fresh bucket every time
            let pool = BucketPool::with_config(PoolConfig::new(16, 0));
            let mut grid = SpatialGrid::with_pool(50.0, pool);
            b.iter(|| grid.rebuild(black_box(&particles)));
        });
    }

    group.finish();
}

fn bench_candidate_pairs(c: &mut Criterion) {
    let mut group = c.benchmark_group("candidate_pairs");

    for n in [100, 1000, 5000].iter() {
        let particles = setup_particles(*n);
        let mut grid = SpatialGrid::new(50.0);
        grid.rebuild(&particles);

        group.bench_with_input(BenchmarkId::new("grid", n), n, |b, _| {
            b.iter(|| {
                let mut touching = 0usize;
                grid.for_each_candidate_pair(|i, j| {
                    let p = &particles[i];
                    let q = &particles[j];
                    if p.position().distance(q.position()) < p.radius() + q.radius() {
                        touching += 1;
                    }
                });
                black_box(touching)
            });
        });

        if *n <= 1000 {
            group.bench_with_input(BenchmarkId::new("all_pairs", n), n, |b, _| {
                b.iter(|| {
                    let mut touching = 0usize;
                    for i in 0..particles.len() {
                        for j in (i + 1)..particles.len() {
                            let p = &particles[i];
                            let q = &particles[j];
                            if p.position().distance(q.position()) < p.radius() + q.radius() {
                                touching += 1;
                            }
                        }
                    }
                    black_box(touching)
                });
            });
        }
    }

    group.finish();
}

fn bench_resolve_cluster(c: &mut Criterion) {
    let resolver = CollisionResolver::new();
    let mut spawner = Spawner::new(Some(7));
    let cluster = spawner
        .spawn(&SpawnRequest::new(500, Vec2::new(0.0, 0.0), 40.0, 2.0))
        .unwrap();
    let mut grid = SpatialGrid::new(50.0);
    grid.rebuild(&cluster);
    let pairs = grid.candidate_pairs();

    c.bench_function("resolve_dense_cluster", |b| {
        b.iter_batched_ref(
            || cluster.clone(),
            |particles| {
                for &(i, j) in &pairs {
                    black_box(resolver.resolve(particles, i, j));
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_grid_rebuild, bench_candidate_pairs, bench_resolve_cluster);
criterion_main!(benches);
