//! Headless runner
//!
//! Loads a JSON run configuration (or falls back to the pentagon outbreak
//! scenario), advances the simulation frame by frame, and logs the population
//! tallies as the infection spreads. Rendering is someone else's job; this
//! binary exists to exercise a run end to end and to print where it landed.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use hard_circles::{RunConfig, Simulation};

const FRAMES: u32 = 269;
const LOG_EVERY: u32 = 10;

fn load_config() -> Result<RunConfig> {
    match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            let config: RunConfig = serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config file {path}"))?;
            Ok(config)
        }
        None => Ok(RunConfig::pentagon_outbreak(250)),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = load_config()?;
    let mut sim = Simulation::new(&config).context("simulation set-up failed")?;

    for frame in 1..=FRAMES {
        sim.frame();
        if frame % LOG_EVERY == 0 {
            let snap = sim.snapshot();
            log::info!(
                "frame {frame:>4}  t = {:>8.4} s  humans = {:>4}  zombies = {:>4}",
                snap.time,
                snap.humans,
                snap.zombies
            );
        }
    }

    let snap = sim.snapshot();
    println!(
        "{} particles after {} frames ({:.4} s simulated): {} humans, {} zombies",
        snap.circles.len(),
        FRAMES,
        snap.time,
        snap.humans,
        snap.zombies
    );
    Ok(())
}
