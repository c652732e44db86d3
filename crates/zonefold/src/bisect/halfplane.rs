//! Strict, ordered half-plane sets in 2D (`HalfPlanes`).
//!
//! Purpose
//! - Represent a convex cell as an intersection of closed half-planes
//!   `n·x <= c` with unit normals, angle-sorted and parallel-coalesced, and
//!   recover its vertices with a deque sweep.
//! - A Voronoi cell restricted to a box is exactly such a set: four box sides
//!   plus one bisector half-plane per competing site.
//!
//! Code cross-refs: `voronoi::voronoi_cells`.

use std::collections::VecDeque;

use geo::Rect;
use nalgebra::{matrix, Vector2};

use crate::cfg::FEAS_EPS;

/// Closed half-plane `n · x <= c`.
#[derive(Clone, Copy, Debug)]
pub struct HalfPlane {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl HalfPlane {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Points at least as close to `site` as to `other`.
    ///
    /// `|x-a|² <= |x-b|²` ⇔ `(b-a)·x <= (|b|²-|a|²)/2`.
    #[inline]
    pub fn closer_to(site: Vector2<f64>, other: Vector2<f64>) -> Self {
        Self::new(other - site, (other.norm_squared() - site.norm_squared()) / 2.0)
    }

    #[inline]
    pub fn satisfies_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.n.dot(&p) <= self.c + eps
    }
}

/// Strict, ordered H-representation.
///
/// Invariants:
/// - Unit normals (||n||=1).
/// - Angle-sorted by atan2(n.y, n.x).
/// - Parallels coalesced (keep most restrictive c for each direction).
#[derive(Clone, Debug, Default)]
pub struct HalfPlanes {
    pub hs: Vec<HalfPlane>,
}

impl HalfPlanes {
    /// The four sides of an axis-aligned box.
    pub fn from_rect(rect: Rect<f64>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        let mut out = Self::default();
        out.insert(HalfPlane::new(Vector2::new(1.0, 0.0), max.x));
        out.insert(HalfPlane::new(Vector2::new(-1.0, 0.0), -min.x));
        out.insert(HalfPlane::new(Vector2::new(0.0, 1.0), max.y));
        out.insert(HalfPlane::new(Vector2::new(0.0, -1.0), -min.y));
        out
    }

    /// Insert a half-plane preserving invariants. Returns `false` when the
    /// normal is degenerate (zero or non-finite) and nothing was inserted.
    pub fn insert(&mut self, h: HalfPlane) -> bool {
        let Some((n, c)) = canonicalize_unit(h.n, h.c) else {
            return false;
        };
        let key = angle_of(n);
        let lo = self.hs.partition_point(|g| angle_of(g.n) <= key);
        if lo > 0 && (self.hs[lo - 1].n - n).norm() < FEAS_EPS {
            self.hs[lo - 1].c = self.hs[lo - 1].c.min(c);
            return true;
        }
        if lo < self.hs.len() && (self.hs[lo].n - n).norm() < FEAS_EPS {
            self.hs[lo].c = self.hs[lo].c.min(c);
            return true;
        }
        self.hs.insert(lo, HalfPlane::new(n, c));
        true
    }

    /// Vertices of the intersection, counter-clockwise, or why there are none.
    pub fn intersection(&self) -> Intersection {
        sweep(&self.hs, FEAS_EPS)
    }
}

/// Half-plane intersection result.
#[derive(Clone, Debug)]
pub enum Intersection {
    Empty,
    Unbounded,
    Bounded(Vec<Vector2<f64>>),
}

impl Intersection {
    #[inline]
    pub fn vertices(self) -> Option<Vec<Vector2<f64>>> {
        match self {
            Intersection::Bounded(v) => Some(v),
            _ => None,
        }
    }
}

fn sweep(hs: &[HalfPlane], eps: f64) -> Intersection {
    if hs.is_empty() {
        return Intersection::Unbounded;
    }
    // Opposite parallel pair n·x <= c1, -n·x <= c2 pins s = n·x to [-c2, c1].
    for (i, hi) in hs.iter().enumerate() {
        for hj in &hs[i + 1..] {
            if (hi.n + hj.n).norm() < FEAS_EPS && -hj.c > hi.c + eps {
                return Intersection::Empty;
            }
        }
    }

    let mut dq: VecDeque<usize> = VecDeque::new();
    for (i, h) in hs.iter().enumerate() {
        while dq.len() >= 2 {
            let (l1, l2) = (dq[dq.len() - 2], dq[dq.len() - 1]);
            if let Some(p) = line_intersection(hs[l1], hs[l2]) {
                if h.satisfies_eps(p, eps) {
                    break;
                }
            }
            dq.pop_back();
        }
        while dq.len() >= 2 {
            let (f1, f2) = (dq[0], dq[1]);
            if let Some(p) = line_intersection(hs[f1], hs[f2]) {
                if h.satisfies_eps(p, eps) {
                    break;
                }
            }
            dq.pop_front();
        }
        dq.push_back(i);
    }
    while dq.len() >= 3 {
        let (l1, l2) = (dq[dq.len() - 2], dq[dq.len() - 1]);
        if let Some(p) = line_intersection(hs[l1], hs[l2]) {
            if hs[dq[0]].satisfies_eps(p, eps) {
                break;
            }
        }
        dq.pop_back();
    }
    while dq.len() >= 3 {
        let (f1, f2) = (dq[0], dq[1]);
        if let Some(p) = line_intersection(hs[f1], hs[f2]) {
            if hs[dq[dq.len() - 1]].satisfies_eps(p, eps) {
                break;
            }
        }
        dq.pop_front();
    }
    if dq.is_empty() {
        return Intersection::Empty;
    }
    if dq.len() < 3 {
        return Intersection::Unbounded;
    }

    let m = dq.len();
    let mut verts: Vec<Vector2<f64>> = Vec::with_capacity(m);
    for k in 0..m {
        let Some(p) = line_intersection(hs[dq[k]], hs[dq[(k + 1) % m]]) else {
            return Intersection::Unbounded;
        };
        // A line touching the cell only at a corner repeats that corner.
        if verts.last().map_or(true, |q| (q - p).norm() > FEAS_EPS) {
            verts.push(p);
        }
    }
    if verts.len() > 1 && (verts[0] - verts[verts.len() - 1]).norm() <= FEAS_EPS {
        verts.pop();
    }
    if verts.len() < 3 || !verts.iter().all(|&v| hs.iter().all(|h| h.satisfies_eps(v, 1e-6))) {
        return Intersection::Empty;
    }
    Intersection::Bounded(verts)
}

#[inline]
fn angle_of(n: Vector2<f64>) -> f64 {
    n.y.atan2(n.x)
}

#[inline]
fn canonicalize_unit(n: Vector2<f64>, c: f64) -> Option<(Vector2<f64>, f64)> {
    let norm = n.norm();
    if !norm.is_finite() || norm <= 0.0 || !c.is_finite() {
        return None;
    }
    Some((n / norm, c / norm))
}

fn line_intersection(h1: HalfPlane, h2: HalfPlane) -> Option<Vector2<f64>> {
    let a = matrix![h1.n.x, h1.n.y; h2.n.x, h2.n.y];
    if a.determinant().abs() < 1e-12 {
        return None;
    }
    let inv = a.try_inverse()?;
    Some(inv * Vector2::new(h1.c, h2.c))
}
