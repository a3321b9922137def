//! Point keys and canonical segments.
//!
//! - `GridKey`: a point quantized to the epsilon grid, ordered in sweep order.
//! - `LineSegment`: closed segment with a fixed upper/lower orientation.

use std::cmp::Ordering;

use nalgebra::Vector2;

use super::util::{distance, eq_eps, grid_index, snap};

/// A point rounded to integer multiples of epsilon.
///
/// Ordering is the sweep order: greater `gy` first, equal `gy` → smaller `gx`
/// first. Two points that round to the same key are the same event point and
/// the same result point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridKey {
    pub gx: i64,
    pub gy: i64,
}

impl GridKey {
    #[inline]
    pub fn of(p: Vector2<f64>, eps: f64) -> Self {
        Self {
            gx: grid_index(p.x, eps),
            gy: grid_index(p.y, eps),
        }
    }
}

impl Ord for GridKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.gy.cmp(&self.gy).then(self.gx.cmp(&other.gx))
    }
}

impl PartialOrd for GridKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `a` comes before `b` in sweep order (exact comparison).
#[inline]
fn precedes(a: Vector2<f64>, b: Vector2<f64>) -> bool {
    a.y > b.y || (a.y == b.y && a.x < b.x)
}

/// Closed line segment with canonical orientation.
///
/// Invariants:
/// - `upper` precedes `lower` in sweep order, or both are equal (degenerate).
/// - `LineSegment::new(a, b) == LineSegment::new(b, a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    upper: Vector2<f64>,
    lower: Vector2<f64>,
}

impl LineSegment {
    /// Canonicalizing constructor; endpoint order does not matter.
    #[inline]
    pub fn new(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        if precedes(b, a) {
            Self { upper: b, lower: a }
        } else {
            Self { upper: a, lower: b }
        }
    }

    #[inline]
    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(Vector2::new(x1, y1), Vector2::new(x2, y2))
    }

    /// Endpoint with the greater y (ties: smaller x).
    #[inline]
    pub fn upper(&self) -> Vector2<f64> {
        self.upper
    }

    #[inline]
    pub fn lower(&self) -> Vector2<f64> {
        self.lower
    }

    /// `lower - upper`.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.lower - self.upper
    }

    #[inline]
    pub fn length(&self) -> f64 {
        distance(self.upper, self.lower)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.upper.iter().chain(self.lower.iter()).all(|v| v.is_finite())
    }

    #[inline]
    pub fn is_degenerate(&self, eps: f64) -> bool {
        eq_eps(self.upper, self.lower, eps)
    }

    #[inline]
    pub fn is_vertical(&self, eps: f64) -> bool {
        (self.upper.x - self.lower.x).abs() <= eps
    }

    #[inline]
    pub fn is_horizontal(&self, eps: f64) -> bool {
        (self.upper.y - self.lower.y).abs() <= eps
    }

    /// dy/dx; `NaN` for vertical segments.
    #[inline]
    pub fn slope(&self) -> f64 {
        let d = self.direction();
        if d.x == 0.0 {
            f64::NAN
        } else {
            d.y / d.x
        }
    }

    /// x of the supporting line at height `y`; `None` for horizontal segments.
    #[inline]
    pub fn x_at_y(&self, y: f64) -> Option<f64> {
        let d = self.direction();
        if d.y == 0.0 {
            return None;
        }
        let t = (y - self.upper.y) / d.y;
        Some(self.upper.x + t * d.x)
    }

    /// Distance from `p` to the closed segment.
    pub fn distance_to(&self, p: Vector2<f64>) -> f64 {
        let d = self.direction();
        let len2 = d.norm_squared();
        if len2 == 0.0 {
            return distance(self.upper, p);
        }
        let t = ((p - self.upper).dot(&d) / len2).clamp(0.0, 1.0);
        distance(self.upper + d * t, p)
    }

    /// Endpoint or interior contains `p`, within `eps`.
    #[inline]
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.distance_to(p) <= eps
    }

    #[inline]
    pub fn eq_eps(&self, other: &LineSegment, eps: f64) -> bool {
        eq_eps(self.upper, other.upper, eps) && eq_eps(self.lower, other.lower, eps)
    }

    /// Endpoints snapped to the epsilon grid, re-canonicalized.
    #[inline]
    pub fn snapped(&self, eps: f64) -> Self {
        Self::new(snap(self.upper, eps), snap(self.lower, eps))
    }

    /// Grid keys of `(upper, lower)`.
    #[inline]
    pub fn keys(&self, eps: f64) -> (GridKey, GridKey) {
        (GridKey::of(self.upper, eps), GridKey::of(self.lower, eps))
    }

    /// Total order on exact coordinates: upper (y desc, x asc), then lower.
    pub fn cmp_canonical(&self, other: &LineSegment) -> Ordering {
        other
            .upper
            .y
            .total_cmp(&self.upper.y)
            .then(self.upper.x.total_cmp(&other.upper.x))
            .then(other.lower.y.total_cmp(&self.lower.y))
            .then(self.lower.x.total_cmp(&other.lower.x))
    }
}
