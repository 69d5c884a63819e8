//! Boundary geometry and wall reflection
//!
//! One strategy type covers the three closed regions particles can bounce
//! inside: an axis-aligned box, a disk, and the hallway between two
//! concentric regular pentagons. Construction precomputes everything
//! derivable from the dimensions; the per-step entry point is
//! [`Boundary::resolve`], which detects a wall crossing and corrects the
//! particle's position and velocity in place.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

use super::particle::Particle;
use crate::config::{BounceMode, BoundaryConfig};
use crate::consts::CORNER_EPS;
use crate::polar_to_cartesian;

/// Reflect `v` off a surface with unit normal `n`: v' = v - 2(v·n)n
#[inline]
pub fn reflect(v: DVec2, n: DVec2) -> DVec2 {
    v - 2.0 * v.dot(n) * n
}

#[derive(Debug, Clone)]
pub enum Boundary {
    Box(BoxBounds),
    Disk { radius: f64 },
    Pentagon(PentagonAnnulus),
}

impl Boundary {
    pub fn from_config(config: &BoundaryConfig, mode: BounceMode) -> Self {
        match *config {
            BoundaryConfig::Box {
                left,
                right,
                bottom,
                top,
            } => Boundary::Box(BoxBounds {
                left,
                right,
                bottom,
                top,
                mode,
            }),
            BoundaryConfig::Disk { radius } => Boundary::Disk { radius },
            BoundaryConfig::Pentagon {
                inner_radius,
                outer_radius,
            } => Boundary::Pentagon(PentagonAnnulus::new(inner_radius, outer_radius)),
        }
    }

    /// Detect a wall crossing and reflect/reposition the particle.
    pub fn resolve(&self, p: &mut Particle, dt: f64) {
        match self {
            Boundary::Box(b) => b.resolve(p),
            Boundary::Disk { radius } => resolve_disk(*radius, p, dt),
            Boundary::Pentagon(pent) => pent.resolve(p),
        }
    }

    /// Whether a circle of `radius` centered at `point` clears every wall.
    /// Placement-time query only; ignores velocity.
    pub fn is_clear(&self, point: DVec2, radius: f64) -> bool {
        match self {
            Boundary::Box(b) => {
                point.x >= b.left + radius
                    && point.x <= b.right - radius
                    && point.y >= b.bottom + radius
                    && point.y <= b.top - radius
            }
            Boundary::Disk { radius: bound } => point.length() + radius <= *bound,
            Boundary::Pentagon(pent) => pent.is_clear(point, radius),
        }
    }

    /// Interior area, used to bound how many circles can plausibly fit.
    pub fn area(&self) -> f64 {
        match self {
            Boundary::Box(b) => (b.right - b.left) * (b.top - b.bottom),
            Boundary::Disk { radius } => PI * radius * radius,
            Boundary::Pentagon(pent) => pent.area(),
        }
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy)]
pub struct BoxBounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub mode: BounceMode,
}

impl BoxBounds {
    /// Axes are resolved independently and unconditionally, so a particle
    /// landing in a corner bounces off both walls in the same step.
    pub fn resolve(&self, p: &mut Particle) {
        let r = p.radius();
        // Y
        if p.pos.y < self.bottom + r {
            p.vel.y = -p.vel.y;
            p.pos.y = self.bounce(p.pos.y, self.bottom + r);
        } else if p.pos.y > self.top - r {
            p.vel.y = -p.vel.y;
            p.pos.y = self.bounce(p.pos.y, self.top - r);
        }
        // X
        if p.pos.x < self.left + r {
            p.vel.x = -p.vel.x;
            p.pos.x = self.bounce(p.pos.x, self.left + r);
        } else if p.pos.x > self.right - r {
            p.vel.x = -p.vel.x;
            p.pos.x = self.bounce(p.pos.x, self.right - r);
        }
    }

    #[inline]
    fn bounce(&self, coord: f64, limit: f64) -> f64 {
        match self.mode {
            BounceMode::Clamp => limit,
            // Mirror the overshoot through the wall: with linear motion
            // within the step this is the exact sub-step bounce position.
            BounceMode::Substep => 2.0 * limit - coord,
        }
    }
}

/// Disk boundary, particles confined inside.
///
/// Resolution uses the midpoint approximation: the half-step position stands
/// in for the unknown true crossing point, gets projected radially onto the
/// wall, and the radial velocity component is reflected about it. Could be
/// iterated to a tolerance; with the stable-dt bound one pass stays within a
/// fraction of a radius of the exact answer.
fn resolve_disk(bound_radius: f64, p: &mut Particle, dt: f64) {
    let r = p.radius();
    if p.pos.length() + r > bound_radius {
        let mid = p.pos - p.vel * (dt / 2.0);
        let mid_len = mid.length();
        let unit = mid / mid_len;
        let on_wall = mid * (bound_radius / mid_len);
        p.vel = reflect(p.vel, unit);
        p.pos = on_wall - unit * r;
    }
}

/// Hallway between two concentric point-up regular pentagons.
///
/// Corresponding edges of the two pentagons are parallel, so one set of unit
/// normals (derived from the inner edge midpoints) serves both walls; only
/// the apothem distance differs.
#[derive(Debug, Clone)]
pub struct PentagonAnnulus {
    inner_radius: f64,
    outer_radius: f64,
    verts_inner: Vec<DVec2>,
    verts_outer: Vec<DVec2>,
    /// Outward-facing unit normal of each edge, shared by both pentagons
    normals: Vec<DVec2>,
    /// Distance from the origin to the inner wall
    inner_apothem: f64,
    /// Distance from the origin to the outer wall
    outer_apothem: f64,
}

impl PentagonAnnulus {
    pub const VERTS: usize = 5;

    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        let verts_inner = Self::vertices(inner_radius);
        let verts_outer = Self::vertices(outer_radius);
        let mids_inner = Self::edge_midpoints(&verts_inner);
        let mids_outer = Self::edge_midpoints(&verts_outer);
        let inner_apothem = mids_inner[0].length();
        let outer_apothem = mids_outer[0].length();
        let normals = mids_inner.iter().map(|m| *m / inner_apothem).collect();
        Self {
            inner_radius,
            outer_radius,
            verts_inner,
            verts_outer,
            normals,
            inner_apothem,
            outer_apothem,
        }
    }

    /// Vertex `i` sits at angle `2*pi*i/N + pi/2` (point-up orientation).
    fn vertices(radius: f64) -> Vec<DVec2> {
        let step = TAU / Self::VERTS as f64;
        (0..Self::VERTS)
            .map(|i| polar_to_cartesian(radius, step * i as f64 + FRAC_PI_2))
            .collect()
    }

    /// Edge midpoints; for a regular polygon each is perpendicular to its
    /// edge, pointing outward from the center.
    fn edge_midpoints(verts: &[DVec2]) -> Vec<DVec2> {
        let n = verts.len();
        (0..n).map(|i| (verts[i] + verts[(i + 1) % n]) / 2.0).collect()
    }

    /// Hallway area between the two pentagons.
    pub fn area(&self) -> f64 {
        let n = Self::VERTS as f64;
        let half_angle = PI / n;
        n * (self.outer_radius * self.outer_radius - self.inner_radius * self.inner_radius)
            * half_angle.sin()
            * half_angle.cos()
    }

    #[inline]
    pub fn inner_apothem(&self) -> f64 {
        self.inner_apothem
    }

    #[inline]
    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Wall outlines for an external renderer.
    pub fn inner_vertices(&self) -> &[DVec2] {
        &self.verts_inner
    }

    pub fn outer_vertices(&self) -> &[DVec2] {
        &self.verts_outer
    }

    pub fn resolve(&self, p: &mut Particle) {
        let r = p.radius();
        // Locate the particle: the edge whose outward normal it projects
        // furthest along. A near-tie between two edges means the particle
        // sits in a corner region of the hallway.
        let mut d = 0.0;
        let mut edge = 0usize;
        let mut partner: Option<usize> = None;
        for (j, n) in self.normals.iter().enumerate() {
            let proj = n.dot(p.pos);
            if proj > 0.0 {
                if proj > d {
                    d = proj;
                    edge = j;
                }
                if j != edge && (d - proj).abs() < CORNER_EPS {
                    partner = Some(j);
                }
            }
        }
        let dist_inner = d - self.inner_apothem - r;
        let dist_outer = self.outer_apothem - d - r;
        if dist_inner <= 0.0 {
            // Crossed the inner wall
            match partner {
                None => {
                    let n = self.normals[edge];
                    let v_dot_n = n.dot(p.vel);
                    let frac = dist_inner / v_dot_n;
                    p.pos -= frac * p.vel;
                    p.vel -= 2.0 * v_dot_n * n;
                }
                Some(other) => {
                    // Corner impact: push out along the averaged normal and
                    // send the particle straight back.
                    let unit = self.corner_unit(edge, other);
                    p.pos += r * unit;
                    p.vel = -p.vel;
                }
            }
        } else if dist_outer <= 0.0 {
            // Crossed the outer wall
            match partner {
                None => {
                    let n = self.normals[edge];
                    let v_dot_n = n.dot(p.vel);
                    let frac = dist_outer / v_dot_n;
                    p.pos += frac * p.vel;
                    p.vel -= 2.0 * v_dot_n * n;
                }
                Some(other) => {
                    let unit = self.corner_unit(edge, other);
                    p.pos -= r * unit;
                    p.vel = -p.vel;
                }
            }
        }
    }

    /// Whether a circle at `point` keeps at least one radius of clearance
    /// from both walls.
    pub fn is_clear(&self, point: DVec2, radius: f64) -> bool {
        let mut d = 0.0f64;
        for n in &self.normals {
            d = d.max(n.dot(point));
        }
        d - self.inner_apothem - radius >= 0.0 && self.outer_apothem - d - radius >= 0.0
    }

    fn corner_unit(&self, a: usize, b: usize) -> DVec2 {
        ((self.normals[a] + self.normals[b]) / 2.0).normalize()
    }
}
