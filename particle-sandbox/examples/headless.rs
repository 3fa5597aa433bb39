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
//! Headless Sandbox Example
//!
//! Runs the sandbox without a renderer and prints the statistics a debug
//! overlay would show. It showcases:
//!
//! - Seeded, reproducible spawning
//! - Population and sleep statistics
//! - Smoothed collision-pass timing
//!
//! # Running
//!
//! ```bash
//! # Default population for 600 frames
//! cargo run --example headless --release
//!
//! # Custom population, length and seed
//! cargo run --example headless --release -- --particles 3000 --frames 1200 --seed 7
//!
//! # Per-frame tracing
//! RUST_LOG=particle_sandbox=trace cargo run --example headless
//! ```

use particle_sandbox::{Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

struct Args {
    particles: usize,
    frames: usize,
    seed: u64,
    report_every: usize,
}

impl Default for Args {
    fn default() -> Self {
        Args {
            particles: 1000,
            frames: 600,
            seed: 12345,
            report_every: 60,
        }
    }
}

fn parse_args() -> Args {
    let mut parsed = Args::default();
    let args: Vec<String> = std::env::args().collect();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match (args[i].as_str(), value) {
            ("--particles", Some(v)) => match v.parse() {
                Ok(n) if n > 0 => parsed.particles = n,
                _ => eprintln!(
                    "Warning: Invalid particles '{}', using default {}",
                    v, parsed.particles
                ),
            },
            ("--frames", Some(v)) => match v.parse() {
                Ok(n) => parsed.frames = n,
                Err(_) => eprintln!(
                    "Warning: Invalid frames '{}', using default {}",
                    v, parsed.frames
                ),
            },
            ("--seed", Some(v)) => match v.parse() {
                Ok(n) => parsed.seed = n,
                Err(_) => eprintln!("Warning: Invalid seed '{}', using default {}", v, parsed.seed),
            },
            ("--report-every", Some(v)) => match v.parse() {
                Ok(n) if n > 0 => parsed.report_every = n,
                _ => eprintln!(
                    "Warning: Invalid interval '{}', using default {}",
                    v, parsed.report_every
                ),
            },
            (flag, None) if flag.starts_with("--") => {
                eprintln!("Error: {} requires an argument", flag);
                std::process::exit(1);
            }
            (other, _) => {
                eprintln!("Warning: Ignoring unknown argument '{}'", other);
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    parsed
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = parse_args();

    println!("==========================================================");
    println!("              Headless Particle Sandbox");
    println!("==========================================================");
    println!();

    let config = SimulationConfig::default()
        .with_seed(args.seed)
        .with_default_population(args.particles);

    println!("Configuration:");
    println!("  Particles: {}", args.particles);
    println!("  Frames:    {}", args.frames);
    println!("  Seed:      {}", args.seed);
    println!(
        "  Boundary:  center=({:.0}, {:.0}) radius={:.0}",
        config.boundary_center.x, config.boundary_center.y, config.boundary_radius
    );
    println!();

    let mut sim = match Simulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = sim.reset() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    println!(
        "{:>6} {:>8} {:>8} {:>10} {:>10} {:>10}",
        "frame", "awake", "asleep", "avg speed", "coll ms", "fps"
    );
    for frame in 1..=args.frames {
        sim.tick();
        if frame % args.report_every == 0 || frame == args.frames {
            let snapshot = sim.snapshot();
            println!(
                "{:>6} {:>8} {:>8} {:>10.3} {:>10.4} {:>10.0}",
                frame,
                snapshot.particles.awake,
                snapshot.particles.sleeping,
                snapshot.particles.average_velocity,
                snapshot.performance.average_collision_time_ms,
                snapshot.performance.fps
            );
        }
    }

    let last = sim.last_frame();
    println!();
    println!("Last frame:");
    println!("  Advanced:       {}", last.advanced);
    println!("  Occupied cells: {}", last.occupied_cells);
    println!("  Pairs checked:  {}", last.pairs_checked);
    println!("  Contacts:       {}", last.contacts);
    println!("  Impulses:       {}", last.impulses);
}
