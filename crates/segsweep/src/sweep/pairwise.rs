//! Pairwise segment intersection.
//!
//! Both segments are parametrized from their upper endpoint:
//! `s(t) = p + t r`, `o(u) = q + u d`, with `t, u ∈ [0, 1]`.
//! - `r × d ≈ 0`: parallel. Collinear pairs project `o` onto `s` and clip the
//!   interval to [0, 1]; the clipped interval is empty, a point, or an overlap.
//! - Otherwise solve for `(t, u)`; either outside [0, 1] means no intersection.
//!
//! Tolerances are in length units: a parameter may overshoot [0, 1] by
//! `eps / |r|`. Output coordinates are snapped to the epsilon grid.

use std::cmp::Ordering;

use nalgebra::Vector2;

use super::results::IntersectionResult;
use crate::cfg::check_eps;
use crate::geom2::{cross, eq_eps, snap, LineSegment};

/// Geometry of a pairwise test, before contributors are attached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Meet {
    Disjoint,
    Point(Vector2<f64>),
    Overlap(LineSegment),
}

impl Meet {
    /// Attach contributors.
    pub(crate) fn into_result(self, a: LineSegment, b: LineSegment) -> IntersectionResult {
        let mut segments = vec![a, b];
        segments.sort_by(|x, y| x.cmp_canonical(y));
        segments.dedup();
        match self {
            Meet::Disjoint => IntersectionResult::None,
            Meet::Point(at) => IntersectionResult::Point { at, segments },
            Meet::Overlap(segment) => IntersectionResult::OverlappingSegment { segment, segments },
        }
    }
}

/// Classify the intersection of `a` and `b`.
///
/// The result references both inputs as contributors and never fails:
/// numerical edge cases resolve through `eps`.
///
/// # Panics
/// If `eps` is not finite and positive.
pub fn intersect_segments(a: &LineSegment, b: &LineSegment, eps: f64) -> IntersectionResult {
    check_eps(eps);
    meet(a, b, eps).into_result(*a, *b)
}

/// Symmetric in its arguments: the pair is put in canonical order first so
/// `meet(a, b)` and `meet(b, a)` run the same arithmetic.
pub(crate) fn meet(a: &LineSegment, b: &LineSegment, eps: f64) -> Meet {
    let (s, o) = ordered(a, b);
    let p = s.upper();
    let r = s.direction();
    let q = o.upper();
    let d = o.direction();
    let r_len = r.norm();
    let d_len = d.norm();

    if r_len <= eps || d_len <= eps {
        return meet_degenerate(s, o, eps);
    }

    let det = cross(r, d);
    let qp = q - p;
    if det.abs() <= eps * r_len * d_len {
        // Parallel; collinear iff q lies on the line through s.
        if cross(r, qp).abs() > eps * r_len {
            return Meet::Disjoint;
        }
        let rr = r.norm_squared();
        let t0 = qp.dot(&r) / rr;
        let t1 = (qp + d).dot(&r) / rr;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);
        let tol = eps / r_len;
        if lo > hi + tol {
            return Meet::Disjoint;
        }
        if (hi - lo) * r_len <= eps {
            let mid = (0.5 * (lo + hi)).clamp(0.0, 1.0);
            return Meet::Point(snap(p + r * mid, eps));
        }
        let seg = LineSegment::new(snap(p + r * lo, eps), snap(p + r * hi, eps));
        return Meet::Overlap(seg);
    }

    let t = cross(qp, d) / det;
    let u = cross(qp, r) / det;
    let tol_t = eps / r_len;
    let tol_u = eps / d_len;
    if t < -tol_t || t > 1.0 + tol_t || u < -tol_u || u > 1.0 + tol_u {
        return Meet::Disjoint;
    }
    Meet::Point(snap(p + r * t.clamp(0.0, 1.0), eps))
}

#[inline]
fn ordered<'a>(a: &'a LineSegment, b: &'a LineSegment) -> (&'a LineSegment, &'a LineSegment) {
    if a.cmp_canonical(b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    }
}

/// Directions parallel within `eps` (relative to both lengths).
pub(crate) fn parallel(a: &LineSegment, b: &LineSegment, eps: f64) -> bool {
    let (r, d) = (a.direction(), b.direction());
    cross(r, d).abs() <= eps * r.norm() * d.norm()
}

/// Same supporting line, within `eps`.
pub(crate) fn collinear(a: &LineSegment, b: &LineSegment, eps: f64) -> bool {
    let (s, o) = ordered(a, b);
    parallel(s, o, eps) && cross(s.direction(), o.upper() - s.upper()).abs() <= eps * s.length()
}

/// Where the supporting lines cross, snapped; `None` for parallel lines.
/// Uses the same arithmetic as `meet`, so an unclamped crossing lands on the
/// same grid point.
pub(crate) fn line_crossing(a: &LineSegment, b: &LineSegment, eps: f64) -> Option<Vector2<f64>> {
    let (s, o) = ordered(a, b);
    if parallel(s, o, eps) {
        return None;
    }
    let p = s.upper();
    let r = s.direction();
    let d = o.direction();
    let t = cross(o.upper() - p, d) / cross(r, d);
    Some(snap(p + r * t, eps))
}

/// At least one side has zero length: it meets the other iff contained in it.
fn meet_degenerate(s: &LineSegment, o: &LineSegment, eps: f64) -> Meet {
    let (dot, other) = if s.length() <= eps { (s, o) } else { (o, s) };
    let p = dot.upper();
    if other.length() <= eps {
        if eq_eps(p, other.upper(), eps) {
            return Meet::Point(snap(p, eps));
        }
        return Meet::Disjoint;
    }
    if other.contains_eps(p, eps) {
        Meet::Point(snap(p, eps))
    } else {
        Meet::Disjoint
    }
}
