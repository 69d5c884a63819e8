//! Pairwise elastic collisions
//!
//! Index-ordered O(n^2) scan. Kept quadratic on purpose: the pair order is
//! part of the observable behavior (it decides which particle's species wins
//! simultaneous contacts), so a broad phase that visits pairs in a different
//! order would change results. Fine at the few hundred particles these
//! scenarios run.

use glam::DVec2;

use super::particle::{Particle, Species};

/// Resolve every penetrating or exactly-touching pair, propagating the
/// zombie species on contact. Returns how many particles newly turned.
pub fn resolve_collisions(particles: &mut [Particle]) -> usize {
    let mut turned = 0;
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
                // Penetrating. Push the pair apart along the center line,
                // then apply the impulse. The positional correction is a
                // 50/50 split regardless of mass; only the impulse below is
                // mass-weighted. Asymmetric, but it matches the reference
                // behavior this crate reproduces.
                let unit = rij / sep;
                let push = unit * ((d - sep) / 2.0);
                a.pos += push;
                b.pos -= push;
                apply_impulse(a, b, unit);
                turned += infect(a, b);
            } else if sep == d {
                // Exact contact: impulse only, nothing to separate.
                apply_impulse(a, b, rij / sep);
                turned += infect(a, b);
            }
        }
    }
    turned
}

/// Elastic impulse along the line of centers. With unit masses this reduces
/// to swapping the normal velocity components.
fn apply_impulse(a: &mut Particle, b: &mut Particle, unit: DVec2) {
    let total = a.mass() + b.mass();
    let rel = a.vel - b.vel;
    let dv = 2.0 * rel.dot(unit) * unit / total;
    a.vel -= b.mass() * dv;
    b.vel += a.mass() * dv;
}

/// One zombie in a touching pair turns the other. Species never reverts.
fn infect(a: &mut Particle, b: &mut Particle) -> usize {
    if a.species == Species::Zombie && b.species != Species::Zombie {
        b.species = Species::Zombie;
        1
    } else if b.species == Species::Zombie && a.species != Species::Zombie {
        a.species = Species::Zombie;
        1
    } else {
        0
    }
}
