//! Hard Circles - rigid 2D circles bouncing inside closed boundaries
//!
//! Core modules:
//! - `sim`: Deterministic physics kernel (particles, boundaries, pairwise
//!   elastic collisions, infection propagation)
//! - `config`: Run configuration (boundary shape, placement, mass model)
//! - `error`: Setup-time error taxonomy
//!
//! Rendering is deliberately absent. An external renderer reads
//! [`sim::Snapshot`] rows between steps, owns its own refresh cadence, and
//! never mutates simulation state.

pub mod config;
pub mod error;
pub mod sim;

pub use config::RunConfig;
pub use error::SetupError;
pub use sim::{Simulation, Snapshot};

use glam::DVec2;

/// Global tuning constants
pub mod consts {
    /// Ceiling on the stable time step when every particle is slow (seconds)
    pub const DT_CEILING: f64 = 0.01;
    /// Looser ceiling used by the pentagon scenario (seconds)
    pub const PENTAGON_DT_CEILING: f64 = 0.1;
    /// Default physics sub-steps batched per rendered frame
    pub const SUBSTEPS_PER_FRAME: u32 = 10;
    /// Two edge projections closer than this put the particle in a corner
    /// region of the pentagon
    pub const CORNER_EPS: f64 = 1.0e-13;
    /// Attempts allowed per particle during rejection-sampled placement
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;
    /// Standard gravitational acceleration, signed downward (m/s^2)
    pub const GRAVITY_Y: f64 = -9.81;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
