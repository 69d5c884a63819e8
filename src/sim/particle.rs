//! Particle state
//!
//! A particle is a rigid circle: center, velocity, fixed radius, fixed mass,
//! plus a semantic species tag. Only the infection rule ever reads the tag;
//! the physics response is species-blind.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::config::MassModel;

/// Semantic tag carried by a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    #[default]
    Inert,
    Human,
    Zombie,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Inert => "inert",
            Species::Human => "human",
            Species::Zombie => "zombie",
        }
    }

    /// Display color a renderer would use; the sim itself never reads this.
    pub fn color(&self) -> &'static str {
        match self {
            Species::Inert => "red",
            Species::Human => "blue",
            Species::Zombie => "lime",
        }
    }
}

/// A rigid circle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    radius: f64,
    mass: f64,
    pub species: Species,
}

impl Particle {
    /// Radius and mass are fixed for the particle's lifetime; only position,
    /// velocity, and species mutate after construction.
    pub fn new(
        pos: DVec2,
        vel: DVec2,
        radius: f64,
        mass_model: MassModel,
        species: Species,
    ) -> Self {
        debug_assert!(radius > 0.0 && radius.is_finite());
        let mass = match mass_model {
            MassModel::Uniform => 1.0,
            MassModel::RadiusSquared => radius * radius,
        };
        Self {
            pos,
            vel,
            radius,
            mass,
            species,
        }
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}
