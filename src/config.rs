//! Run configuration
//!
//! Constructed once and immutable for the life of a run. Deserializable from
//! JSON so a scenario can live in a small file and replay exactly (together
//! with the RNG seed).

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::SetupError;

/// Which closed region the particles bounce inside
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryConfig {
    /// Axis-aligned box with the given edges
    Box {
        left: f64,
        right: f64,
        bottom: f64,
        top: f64,
    },
    /// Disk of the given radius, centered on the origin
    Disk { radius: f64 },
    /// Hallway between two concentric point-up regular pentagons
    Pentagon { inner_radius: f64, outer_radius: f64 },
}

/// How a box wall repositions a particle that crossed it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BounceMode {
    /// Clamp the center to one radius off the wall
    #[default]
    Clamp,
    /// Mirror the overshoot back through the wall, landing the particle where
    /// it would be had it reflected at the exact crossing instant
    Substep,
}

/// Initial placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Placement {
    /// `side x side` lattice; the circle radius is derived from the lattice
    /// spacing so neighbors start well separated
    Grid { side: usize },
    /// Rejection sampling with a wall-clearance and minimum-separation check
    Random { count: usize },
}

/// Mass model feeding the collision impulse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassModel {
    /// Every particle has unit mass
    #[default]
    Uniform,
    /// Mass grows with cross-section: m = r^2
    RadiusSquared,
}

/// Everything needed to reproduce a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub boundary: BoundaryConfig,
    pub bounce_mode: BounceMode,
    pub placement: Placement,
    /// Circle radius for randomly placed particles (grid layouts derive
    /// their own radius from the lattice spacing)
    pub particle_radius: f64,
    /// Initial velocity components are drawn uniformly from `-v..v`;
    /// zero means every particle starts at rest
    pub speed_range: f64,
    /// `k` in the `radius / (k * speed)` time-step bound
    pub radius_divisor: f64,
    /// Upper bound on the stable time step (seconds)
    pub dt_ceiling: f64,
    /// Constant vertical acceleration; `None` disables gravity
    pub gravity: Option<f64>,
    pub mass_model: MassModel,
    /// Pairwise collisions on/off. Off makes the particles "ghosts" that
    /// pass through each other but still bounce off the walls.
    pub collisions: bool,
    /// Seed exactly one zombie and propagate the species on contact
    pub infection: bool,
    /// Physics sub-steps batched per renderer frame
    pub substeps_per_frame: u32,
    /// RNG seed for placement and velocity draws
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            boundary: BoundaryConfig::Box {
                left: 0.0,
                right: 10.0,
                bottom: 0.0,
                top: 10.0,
            },
            bounce_mode: BounceMode::Clamp,
            placement: Placement::Random { count: 50 },
            particle_radius: 0.1,
            speed_range: 3.0,
            radius_divisor: 4.0,
            dt_ceiling: consts::DT_CEILING,
            gravity: None,
            mass_model: MassModel::Uniform,
            collisions: true,
            infection: false,
            substeps_per_frame: consts::SUBSTEPS_PER_FRAME,
            seed: 42,
        }
    }
}

impl RunConfig {
    /// The zombie-outbreak scenario: `count` people in the pentagon hallway,
    /// one of them already turned.
    pub fn pentagon_outbreak(count: usize) -> Self {
        Self {
            boundary: BoundaryConfig::Pentagon {
                inner_radius: 2.0,
                outer_radius: 5.0,
            },
            placement: Placement::Random { count },
            particle_radius: 0.1,
            speed_range: 5.0,
            radius_divisor: 2.0,
            dt_ceiling: consts::PENTAGON_DT_CEILING,
            mass_model: MassModel::RadiusSquared,
            infection: true,
            substeps_per_frame: 1,
            ..Self::default()
        }
    }

    /// Circles dropped from a lattice under gravity inside a box.
    pub fn gravity_box() -> Self {
        Self {
            placement: Placement::Grid { side: 10 },
            speed_range: 0.0,
            gravity: Some(consts::GRAVITY_Y),
            substeps_per_frame: 1,
            ..Self::default()
        }
    }

    /// Hard circles rattling around inside a hard disk.
    pub fn hard_disk() -> Self {
        Self {
            boundary: BoundaryConfig::Disk { radius: 5.0 },
            placement: Placement::Grid { side: 20 },
            speed_range: 3.0,
            ..Self::default()
        }
    }

    /// Reject dimensions and rates that make no sense before any placement
    /// work happens.
    pub fn validate(&self) -> Result<(), SetupError> {
        match self.boundary {
            BoundaryConfig::Box {
                left,
                right,
                bottom,
                top,
            } => {
                if !(right > left && top > bottom) {
                    return Err(SetupError::InvalidConfig(format!(
                        "degenerate box: [{left}, {right}] x [{bottom}, {top}]"
                    )));
                }
            }
            BoundaryConfig::Disk { radius } => {
                if !(radius > 0.0 && radius.is_finite()) {
                    return Err(SetupError::InvalidConfig(format!(
                        "disk radius must be positive and finite, got {radius}"
                    )));
                }
            }
            BoundaryConfig::Pentagon {
                inner_radius,
                outer_radius,
            } => {
                if !(inner_radius > 0.0 && outer_radius > inner_radius) {
                    return Err(SetupError::InvalidConfig(format!(
                        "pentagon needs 0 < inner < outer, \
                         got inner {inner_radius}, outer {outer_radius}"
                    )));
                }
            }
        }
        if !(self.particle_radius > 0.0 && self.particle_radius.is_finite()) {
            return Err(SetupError::InvalidConfig(format!(
                "particle radius must be positive and finite, got {}",
                self.particle_radius
            )));
        }
        if self.radius_divisor <= 0.0 {
            return Err(SetupError::InvalidConfig(format!(
                "radius divisor must be positive, got {}",
                self.radius_divisor
            )));
        }
        if self.dt_ceiling <= 0.0 {
            return Err(SetupError::InvalidConfig(format!(
                "dt ceiling must be positive, got {}",
                self.dt_ceiling
            )));
        }
        if !(self.speed_range >= 0.0 && self.speed_range.is_finite()) {
            return Err(SetupError::InvalidConfig(format!(
                "speed range must be non-negative and finite, got {}",
                self.speed_range
            )));
        }
        if self.substeps_per_frame == 0 {
            return Err(SetupError::InvalidConfig(
                "substeps_per_frame must be at least 1".into(),
            ));
        }
        if matches!(self.placement, Placement::Grid { side: 0 }) {
            return Err(SetupError::InvalidConfig(
                "grid placement needs a non-zero side".into(),
            ));
        }
        Ok(())
    }
}
