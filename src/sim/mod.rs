//! Hard-circle simulation core
//!
//! Pure state and math, no I/O. Everything here is deterministic: the same
//! configuration and seed replay the same trajectory step for step.

pub mod boundary;
pub mod collision;
pub mod particle;
pub mod placement;
pub mod step;
pub mod timestep;

pub use boundary::{reflect, Boundary, BoxBounds, PentagonAnnulus};
pub use collision::resolve_collisions;
pub use particle::{Particle, Species};
pub use step::{CircleView, SimClock, Simulation, Snapshot};
pub use timestep::stable_dt;
