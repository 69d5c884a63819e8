//! Time-step control
//!
//! The stable step keeps circle centers from crossing each other within one
//! sweep: no particle may cover more than `radius / divisor` per step, under
//! the simplifying assumption that whatever it hits is standing still.
//!
//! The step is computed once at setup and held for the whole run. A collision
//! that speeds a particle up past the assumed maximum can under-resolve the
//! next overlap; that is a known limitation of the scheme, kept as-is because
//! the gravity scenario depends on the fixed-step leapfrog form.

use super::particle::Particle;

/// Minimum over all moving particles of `radius / (divisor * speed)`, capped
/// at `dt_ceiling`. Particles at rest place no constraint on the step.
pub fn stable_dt(particles: &[Particle], radius_divisor: f64, dt_ceiling: f64) -> f64 {
    let mut dt = dt_ceiling;
    for p in particles {
        let speed = p.speed();
        if speed > 0.0 {
            dt = dt.min(p.radius() / (radius_divisor * speed));
        }
    }
    dt
}
