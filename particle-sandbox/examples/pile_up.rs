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
//! Pile-Up Example
//!
//! Drops several small bursts of particles into the boundary and waits for
//! the pile to come to rest, then prints a coarse ASCII picture of it.
//!
//! # Running
//!
//! ```bash
//! cargo run --example pile_up --release
//! cargo run --example pile_up --release -- --seed 99
//! ```

use particle_sandbox::{Simulation, SimulationConfig, SimulationSnapshot};
use tracing_subscriber::EnvFilter;

const BURSTS: usize = 5;
const BURST_SIZE: usize = 300;
const MAX_FRAMES: usize = 5000;
const COLUMNS: usize = 64;
const ROWS: usize = 32;

fn parse_seed() -> u64 {
    let args: Vec<String> = std::env::args().collect();
    match args.iter().position(|a| a == "--seed") {
        Some(i) => match args.get(i + 1).map(|v| v.parse::<u64>()) {
            Some(Ok(seed)) => seed,
            _ => {
                eprintln!("Warning: Invalid seed, using default 42");
                42
            }
        },
        None => 42,
    }
}

fn render(sim: &Simulation) -> Vec<String> {
    let boundary = sim.boundary();
    let left = boundary.center().x - boundary.radius();
    let top = boundary.center().y - boundary.radius();
    let size = 2.0 * boundary.radius();

    let mut counts = vec![[0usize; COLUMNS]; ROWS];
    for p in sim.particles() {
        let col = ((p.position().x - left) / size * COLUMNS as f64) as usize;
        let row = ((p.position().y - top) / size * ROWS as f64) as usize;
        if let Some(cell) = counts.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell += 1;
        }
    }

    counts
        .iter()
        .map(|row| {
            row.iter()
                .map(|&n| match n {
                    0 => ' ',
                    1..=2 => '.',
                    3..=6 => 'o',
                    _ => '#',
                })
                .collect()
        })
        .collect()
}

fn report(label: &str, snapshot: &SimulationSnapshot) {
    println!(
        "{:<24} total={:>5} awake={:>5} asleep={:>5} avg speed={:.3}",
        label,
        snapshot.particles.total,
        snapshot.particles.awake,
        snapshot.particles.sleeping,
        snapshot.particles.average_velocity
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut sim = match Simulation::new(SimulationConfig::default().with_seed(parse_seed())) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    sim.start();

    let center = sim.boundary().center();
    let spread = sim.boundary().radius() / 2.0;
    for burst in 0..BURSTS {
        let offset = (burst as f64 / (BURSTS - 1) as f64 - 0.5) * spread;
        let x = center.x + offset;
        let y = center.y - spread;
        if let Err(e) = sim.spawn_default(BURST_SIZE, x, y, 30.0) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        for _ in 0..60 {
            sim.tick();
        }
        report(&format!("after burst {}", burst + 1), &sim.snapshot());
    }

    let mut frames = 0;
    while sim.stats().awake > 0 && frames < MAX_FRAMES {
        sim.tick();
        frames += 1;
    }
    sim.stop();

    println!();
    report(&format!("settled after {} frames", frames), &sim.snapshot());
    println!();
    for line in render(&sim) {
        println!("|{}|", line);
    }
}
