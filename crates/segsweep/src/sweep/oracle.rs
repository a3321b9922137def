//! All-pairs reference for cross-checking the sweep.

use super::pairwise::meet;
use super::prepare::prepare_segments;
use super::results::{IntersectionResult, ResultAggregator};
use crate::cfg::check_eps;
use crate::geom2::LineSegment;

/// All intersections among `segments` by testing every pair. O(N²).
///
/// Uses the same input filtering (including the grid range check) and the
/// same pairwise test as `find_intersections_fast`; the two agree as sets.
///
/// # Panics
/// If `eps` is not finite and positive.
pub fn find_intersections_slow(segments: &[LineSegment], eps: f64) -> Vec<IntersectionResult> {
    check_eps(eps);
    let prepared = prepare_segments(segments, eps);
    let mut results = ResultAggregator::new(eps);
    for (i, a) in prepared.iter().enumerate() {
        for b in &prepared[i + 1..] {
            let m = meet(&a.snapped, &b.snapped, eps);
            results.insert(m.into_result(a.original, b.original));
        }
    }
    tracing::debug!(
        segments = prepared.len(),
        results = results.len(),
        "all-pairs scan finished"
    );
    results.into_sorted()
}
