//! Initial placement
//!
//! Grid layouts mirror the lattice scenarios (box and disk); rejection
//! sampling with a wall-clearance and minimum-separation check mirrors the
//! pentagon scenario. Every draw comes from one seeded RNG owned by setup,
//! so a run replays exactly from its seed.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::boundary::Boundary;
use super::particle::{Particle, Species};
use crate::config::{MassModel, Placement};
use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::error::SetupError;
use crate::polar_to_cartesian;

/// Build the initial particle store. With infection on, the first particle
/// placed is the lone zombie and everyone else is human.
pub fn place(
    boundary: &Boundary,
    placement: Placement,
    particle_radius: f64,
    speed_range: f64,
    mass_model: MassModel,
    infection: bool,
    rng: &mut Pcg32,
) -> Result<Vec<Particle>, SetupError> {
    let particles = match placement {
        Placement::Grid { side } => grid(boundary, side, speed_range, mass_model, infection, rng)?,
        Placement::Random { count } => random(
            boundary,
            count,
            particle_radius,
            speed_range,
            mass_model,
            infection,
            rng,
        )?,
    };
    Ok(particles)
}

/// One pairwise sweep separating any circles the setup left overlapping.
/// Pair-wise only: heavily stacked overlaps need more than one pass.
pub fn separate_overlaps(particles: &mut [Particle]) {
    let n = particles.len();
    for i in 0..n.saturating_sub(1) {
        for j in i + 1..n {
            let (head, tail) = particles.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];
            let d = a.radius() + b.radius();
            let rij = a.pos - b.pos;
            let sep = rij.length();
            if sep < d {
                let push = (rij / sep) * ((d - sep) / 2.0);
                a.pos += push;
                b.pos -= push;
            }
        }
    }
}

fn species_for(index: usize, infection: bool) -> Species {
    match (infection, index) {
        (false, _) => Species::Inert,
        (true, 0) => Species::Zombie,
        (true, _) => Species::Human,
    }
}

fn random_velocity(speed_range: f64, rng: &mut Pcg32) -> DVec2 {
    if speed_range > 0.0 {
        DVec2::new(
            rng.random_range(-speed_range..speed_range),
            rng.random_range(-speed_range..speed_range),
        )
    } else {
        DVec2::ZERO
    }
}

/// `side x side` lattice filling the boundary, radius derived from the
/// spacing so the circle diameter is a third of the gap between neighbors.
/// The box uses the diagonal of a lattice cell, the disk the cell side.
fn grid(
    boundary: &Boundary,
    side: usize,
    speed_range: f64,
    mass_model: MassModel,
    infection: bool,
    rng: &mut Pcg32,
) -> Result<Vec<Particle>, SetupError> {
    let (origin, dx, dy, radius) = match boundary {
        Boundary::Box(b) => {
            let dx = (b.right - b.left) / (side + 1) as f64;
            let dy = (b.top - b.bottom) / (side + 1) as f64;
            (DVec2::new(b.left, b.bottom), dx, dy, dx.hypot(dy) / 6.0)
        }
        Boundary::Disk { radius } => {
            // Lattice over the inscribed square
            let half = radius / 2.0f64.sqrt();
            let ds = 2.0 * half / (side + 1) as f64;
            (DVec2::new(-half, -half), ds, ds, ds / 6.0)
        }
        Boundary::Pentagon(_) => {
            return Err(SetupError::InvalidConfig(
                "grid placement is not supported inside the pentagon hallway".into(),
            ));
        }
    };
    let mut particles = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let pos = origin + DVec2::new(dx * (j + 1) as f64, dy * (i + 1) as f64);
            let vel = random_velocity(speed_range, rng);
            let species = species_for(particles.len(), infection);
            particles.push(Particle::new(pos, vel, radius, mass_model, species));
        }
    }
    Ok(particles)
}

/// Rejection sampling: draw a point in the boundary's support region, keep
/// it only if it clears the walls and every already-placed circle by a full
/// diameter. Bounded attempts per particle keep a hopeless configuration
/// from looping forever.
fn random(
    boundary: &Boundary,
    requested: usize,
    radius: f64,
    speed_range: f64,
    mass_model: MassModel,
    infection: bool,
    rng: &mut Pcg32,
) -> Result<Vec<Particle>, SetupError> {
    let count = clamp_count(boundary, requested, radius);
    let mut particles: Vec<Particle> = Vec::with_capacity(count);
    while particles.len() < count {
        let mut attempts = 0u32;
        let pos = loop {
            attempts += 1;
            if attempts > MAX_PLACEMENT_ATTEMPTS {
                return Err(SetupError::PlacementExhausted {
                    attempts: attempts - 1,
                    placed: particles.len(),
                    requested: count,
                });
            }
            let candidate = sample_support(boundary, rng);
            if !boundary.is_clear(candidate, radius) {
                continue;
            }
            if particles
                .iter()
                .any(|p| (candidate - p.pos).length() < radius + p.radius())
            {
                continue;
            }
            break candidate;
        };
        let vel = random_velocity(speed_range, rng);
        let species = species_for(particles.len(), infection);
        particles.push(Particle::new(pos, vel, radius, mass_model, species));
    }
    Ok(particles)
}

/// Uniform draw over a region covering the boundary interior; the wall
/// clearance check afterwards discards the misses.
fn sample_support(boundary: &Boundary, rng: &mut Pcg32) -> DVec2 {
    match boundary {
        Boundary::Box(b) => DVec2::new(
            rng.random_range(b.left..b.right),
            rng.random_range(b.bottom..b.top),
        ),
        Boundary::Disk { radius } => {
            let d = rng.random_range(0.0..*radius);
            let a = rng.random_range(0.0..TAU);
            polar_to_cartesian(d, a)
        }
        Boundary::Pentagon(pent) => {
            let d = rng.random_range(pent.inner_apothem()..pent.outer_radius());
            let a = rng.random_range(0.0..TAU);
            polar_to_cartesian(d, a)
        }
    }
}

/// Cap the requested count at half of a crude square-packing estimate of
/// what fits, and rescue a zero request the way the reference does.
fn clamp_count(boundary: &Boundary, requested: usize, radius: f64) -> usize {
    let per_particle = 4.0 * radius * radius;
    let max_fit = (boundary.area() / per_particle).floor() as usize;
    let limit = max_fit / 2;
    if requested == 0 {
        log::warn!("at least one particle is required; running with 10");
        return 10.min(limit.max(1));
    }
    if requested > 500 {
        log::info!("set-up may take some time with {requested} particles");
    }
    if requested > limit {
        log::warn!(
            "an estimated {max_fit} particles fit this boundary; \
             reducing the requested {requested} to {limit}"
        );
        return limit;
    }
    requested
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BounceMode, BoundaryConfig};
    use rand::SeedableRng;

    fn pentagon() -> Boundary {
        Boundary::from_config(
            &BoundaryConfig::Pentagon {
                inner_radius: 2.0,
                outer_radius: 5.0,
            },
            BounceMode::Clamp,
        )
    }

    fn small_box() -> Boundary {
        Boundary::from_config(
            &BoundaryConfig::Box {
                left: 0.0,
                right: 10.0,
                bottom: 0.0,
                top: 10.0,
            },
            BounceMode::Clamp,
        )
    }

    #[test]
    fn seeded_placement_replays() {
        let boundary = pentagon();
        let mut rng_a = Pcg32::seed_from_u64(7);
        let mut rng_b = Pcg32::seed_from_u64(7);
        let a = place(
            &boundary,
            Placement::Random { count: 40 },
            0.1,
            5.0,
            MassModel::RadiusSquared,
            true,
            &mut rng_a,
        )
        .unwrap();
        let b = place(
            &boundary,
            Placement::Random { count: 40 },
            0.1,
            5.0,
            MassModel::RadiusSquared,
            true,
            &mut rng_b,
        )
        .unwrap();
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
        }
    }

    #[test]
    fn random_placement_clears_walls_and_neighbors() {
        let boundary = pentagon();
        let mut rng = Pcg32::seed_from_u64(3);
        let particles = place(
            &boundary,
            Placement::Random { count: 60 },
            0.1,
            5.0,
            MassModel::RadiusSquared,
            true,
            &mut rng,
        )
        .unwrap();
        assert_eq!(particles.len(), 60);
        for p in &particles {
            assert!(boundary.is_clear(p.pos, p.radius()));
        }
        for i in 0..particles.len() {
            for j in i + 1..particles.len() {
                let sep = (particles[i].pos - particles[j].pos).length();
                assert!(sep >= particles[i].radius() + particles[j].radius());
            }
        }
    }

    #[test]
    fn first_particle_is_the_zombie() {
        let boundary = pentagon();
        let mut rng = Pcg32::seed_from_u64(1);
        let particles = place(
            &boundary,
            Placement::Random { count: 10 },
            0.1,
            5.0,
            MassModel::RadiusSquared,
            true,
            &mut rng,
        )
        .unwrap();
        assert_eq!(particles[0].species, Species::Zombie);
        assert!(
            particles[1..]
                .iter()
                .all(|p| p.species == Species::Human)
        );
    }

    #[test]
    fn grid_fills_the_box() {
        let boundary = small_box();
        let mut rng = Pcg32::seed_from_u64(5);
        let particles = place(
            &boundary,
            Placement::Grid { side: 10 },
            0.1,
            0.0,
            MassModel::Uniform,
            false,
            &mut rng,
        )
        .unwrap();
        assert_eq!(particles.len(), 100);
        for p in &particles {
            assert!(boundary.is_clear(p.pos, p.radius()));
            assert_eq!(p.vel, DVec2::ZERO);
            assert_eq!(p.species, Species::Inert);
        }
    }

    #[test]
    fn grid_radius_follows_the_boundary() {
        // Box lattice: radius is a sixth of the cell diagonal
        let mut rng = Pcg32::seed_from_u64(5);
        let particles = place(
            &small_box(),
            Placement::Grid { side: 10 },
            0.1,
            0.0,
            MassModel::Uniform,
            false,
            &mut rng,
        )
        .unwrap();
        let d: f64 = 10.0 / 11.0;
        assert!((particles[0].radius() - d.hypot(d) / 6.0).abs() < 1e-12);

        // Disk lattice: radius is a sixth of the cell side, not its diagonal
        let boundary = Boundary::from_config(
            &BoundaryConfig::Disk { radius: 5.0 },
            BounceMode::Clamp,
        );
        let particles = place(
            &boundary,
            Placement::Grid { side: 20 },
            0.1,
            0.0,
            MassModel::Uniform,
            false,
            &mut rng,
        )
        .unwrap();
        let ds = 2.0 * (5.0 / 2.0f64.sqrt()) / 21.0;
        assert!((particles[0].radius() - ds / 6.0).abs() < 1e-12);
        for p in &particles {
            assert!(boundary.is_clear(p.pos, p.radius()));
        }
    }

    #[test]
    fn grid_inside_pentagon_is_rejected() {
        let boundary = pentagon();
        let mut rng = Pcg32::seed_from_u64(5);
        let result = place(
            &boundary,
            Placement::Grid { side: 4 },
            0.1,
            1.0,
            MassModel::Uniform,
            false,
            &mut rng,
        );
        assert!(matches!(result, Err(SetupError::InvalidConfig(_))));
    }

    #[test]
    fn absurd_count_is_clamped() {
        let boundary = pentagon();
        let mut rng = Pcg32::seed_from_u64(11);
        let particles = place(
            &boundary,
            Placement::Random { count: 100_000 },
            0.1,
            5.0,
            MassModel::RadiusSquared,
            false,
            &mut rng,
        )
        .unwrap();
        let limit = (boundary.area() / (4.0 * 0.1 * 0.1)).floor() as usize / 2;
        assert_eq!(particles.len(), limit);
    }

    #[test]
    fn impossible_placement_fails_loudly() {
        let boundary = pentagon();
        let mut rng = Pcg32::seed_from_u64(2);
        // The hallway is about 2.43 wide; a circle of radius 1.3 can never
        // clear both walls at once, so every draw is rejected.
        let result = place(
            &boundary,
            Placement::Random { count: 3 },
            1.3,
            1.0,
            MassModel::Uniform,
            false,
            &mut rng,
        );
        assert!(matches!(
            result,
            Err(SetupError::PlacementExhausted { placed: 0, .. })
        ));
    }

    #[test]
    fn separate_overlaps_splits_a_pair() {
        let mut particles = vec![
            Particle::new(
                DVec2::new(0.0, 0.0),
                DVec2::ZERO,
                1.0,
                MassModel::Uniform,
                Species::Inert,
            ),
            Particle::new(
                DVec2::new(1.0, 0.0),
                DVec2::ZERO,
                1.0,
                MassModel::Uniform,
                Species::Inert,
            ),
        ];
        separate_overlaps(&mut particles);
        let sep = (particles[0].pos - particles[1].pos).length();
        assert!((sep - 2.0).abs() < 1e-12);
    }
}
