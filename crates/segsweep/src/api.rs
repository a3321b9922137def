//! Curated API surface.
//!
//! Prefer these re-exports over deep module paths; the internal layout of
//! `geom2` and `sweep` is free to change.

// Primitive layer
pub use crate::geom2::{cross, distance, eq_eps, snap, GridKey, LineSegment};
// Seeded generators
pub use crate::geom2::rand::{draw_segments, ReplayToken as SegmentReplay, SegmentCfg};
// Intersection engine
pub use crate::sweep::{
    find_intersections_fast, find_intersections_slow, intersect_segments, IntersectionResult,
    ResultAggregator,
};

use nalgebra::Vector2;

/// Pre: `a`, `b` are segment endpoints in either order.
/// Post: the canonical segment (upper endpoint first) from raw coordinates.
pub fn segment(a: (f64, f64), b: (f64, f64)) -> LineSegment {
    LineSegment::new(Vector2::new(a.0, a.1), Vector2::new(b.0, b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn segment_is_order_independent() {
        let s = segment((0.0, 0.0), (3.0, 4.0));
        let t = segment((3.0, 4.0), (0.0, 0.0));
        assert_eq!(s, t);
        assert_eq!(s.upper(), Vector2::new(3.0, 4.0));
    }

    #[test]
    fn fast_matches_slow_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        let segs: Vec<LineSegment> = (0..40)
            .map(|_| {
                segment(
                    (rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
                    (rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
                )
            })
            .collect();
        let eps = crate::DEFAULT_EPS;
        assert_eq!(
            find_intersections_fast(&segs, eps),
            find_intersections_slow(&segs, eps)
        );
    }
}
