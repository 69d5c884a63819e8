//! Fixed-step simulation driver
//!
//! One step = integrate every particle, resolve the boundary for every
//! particle, then run the pairwise collision scan. Each step is atomic as
//! far as outside observers go: a renderer only ever reads snapshots between
//! steps, so there is no partial-step state to protect.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boundary::Boundary;
use super::collision::resolve_collisions;
use super::particle::{Particle, Species};
use super::placement;
use super::timestep::stable_dt;
use crate::config::RunConfig;
use crate::error::SetupError;

/// The shared clock: one step size for the whole run plus accumulated time.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    pub dt: f64,
    pub time: f64,
}

/// A full run: the particle store, the active boundary, and the clock.
pub struct Simulation {
    particles: Vec<Particle>,
    boundary: Boundary,
    clock: SimClock,
    gravity: Option<f64>,
    collisions: bool,
    substeps_per_frame: u32,
    zombies: usize,
}

/// One row of a renderer snapshot
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CircleView {
    pub pos: DVec2,
    pub radius: f64,
    pub species: Species,
}

/// Read-only view handed to a renderer between steps
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time: f64,
    pub humans: usize,
    pub zombies: usize,
    pub circles: Vec<CircleView>,
}

impl Simulation {
    /// Validate the configuration, build the boundary, place the particles,
    /// and fix the stable time step for the rest of the run.
    pub fn new(config: &RunConfig) -> Result<Self, SetupError> {
        config.validate()?;
        let boundary = Boundary::from_config(&config.boundary, config.bounce_mode);
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let mut particles = placement::place(
            &boundary,
            config.placement,
            config.particle_radius,
            config.speed_range,
            config.mass_model,
            config.infection,
            &mut rng,
        )?;
        placement::separate_overlaps(&mut particles);
        Ok(Self::from_particles(particles, boundary, config))
    }

    /// Assemble a run from an already-built particle store. The stable step
    /// is computed here, once, and never revisited.
    pub fn from_particles(
        particles: Vec<Particle>,
        boundary: Boundary,
        config: &RunConfig,
    ) -> Self {
        let dt = stable_dt(&particles, config.radius_divisor, config.dt_ceiling);
        let zombies = particles
            .iter()
            .filter(|p| p.species == Species::Zombie)
            .count();
        log::info!(
            "simulation ready: {} particles, dt = {:.6} s, {} zombie(s)",
            particles.len(),
            dt,
            zombies
        );
        Self {
            particles,
            boundary,
            clock: SimClock { dt, time: 0.0 },
            gravity: config.gravity,
            collisions: config.collisions,
            substeps_per_frame: config.substeps_per_frame,
            zombies,
        }
    }

    /// Advance one physics step. Returns how many particles turned zombie.
    pub fn step(&mut self) -> usize {
        let dt = self.clock.dt;
        for p in &mut self.particles {
            match self.gravity {
                None => p.pos += p.vel * dt,
                Some(g) => {
                    // Leapfrog form: the position update reads the pre-kick
                    // velocity, then the velocity takes the full kick.
                    p.pos.x += p.vel.x * dt;
                    p.pos.y += p.vel.y * dt + g * dt * dt / 2.0;
                    p.vel.y += g * dt;
                }
            }
        }
        self.clock.time += dt;
        let boundary = &self.boundary;
        for p in self.particles.iter_mut() {
            boundary.resolve(p, dt);
        }
        let turned = if self.collisions {
            resolve_collisions(&mut self.particles)
        } else {
            0
        };
        self.zombies += turned;
        turned
    }

    /// Run one renderer frame's worth of batched physics sub-steps.
    pub fn frame(&mut self) -> usize {
        let mut turned = 0;
        for _ in 0..self.substeps_per_frame {
            turned += self.step();
        }
        turned
    }

    /// Read-only rows for the renderer, plus the population tallies.
    pub fn snapshot(&self) -> Snapshot {
        let humans = self
            .particles
            .iter()
            .filter(|p| p.species == Species::Human)
            .count();
        Snapshot {
            time: self.clock.time,
            humans,
            zombies: self.zombies,
            circles: self
                .particles
                .iter()
                .map(|p| CircleView {
                    pos: p.pos,
                    radius: p.radius(),
                    species: p.species,
                })
                .collect(),
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.clock.dt
    }

    #[inline]
    pub fn time(&self) -> f64 {
        self.clock.time
    }

    #[inline]
    pub fn zombie_count(&self) -> usize {
        self.zombies
    }
}
