//! Input filtering shared by the sweep and the oracle.

use std::collections::BTreeSet;

use crate::cfg::GRID_LIMIT;
use crate::geom2::{GridKey, LineSegment};

/// Whether every coordinate of `s` maps to an exact grid index.
#[inline]
fn within_grid(s: &LineSegment, eps: f64) -> bool {
    let scale = 1.0 / eps;
    s.upper()
        .iter()
        .chain(s.lower().iter())
        .all(|v| (v * scale).abs() <= GRID_LIMIT)
}

/// A segment as the engine sees it, plus the input it came from.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Prepared {
    /// Endpoints on the epsilon grid; all geometry runs on this.
    pub snapped: LineSegment,
    /// Canonicalized input segment, reported as contributor.
    pub original: LineSegment,
}

/// Snap, then drop non-finite, out-of-range, degenerate and duplicate
/// segments.
///
/// Duplicates are detected on snapped endpoints; the first occurrence wins.
pub(crate) fn prepare_segments(segments: &[LineSegment], eps: f64) -> Vec<Prepared> {
    let mut seen: BTreeSet<(GridKey, GridKey)> = BTreeSet::new();
    let mut out = Vec::with_capacity(segments.len());
    let mut non_finite = 0usize;
    let mut out_of_range = 0usize;
    let mut degenerate = 0usize;
    let mut duplicate = 0usize;
    for s in segments {
        if !s.is_finite() {
            non_finite += 1;
            continue;
        }
        if !within_grid(s, eps) {
            out_of_range += 1;
            continue;
        }
        let snapped = s.snapped(eps);
        let (ku, kl) = snapped.keys(eps);
        if ku == kl {
            degenerate += 1;
            continue;
        }
        if !seen.insert((ku, kl)) {
            duplicate += 1;
            continue;
        }
        out.push(Prepared {
            snapped,
            original: *s,
        });
    }
    if non_finite > 0 {
        tracing::warn!(non_finite, "dropped segments with non-finite coordinates");
    }
    if out_of_range > 0 {
        tracing::warn!(
            out_of_range,
            eps,
            "dropped segments beyond the representable epsilon grid"
        );
    }
    tracing::debug!(
        input = segments.len(),
        kept = out.len(),
        degenerate,
        duplicate,
        "prepared segments"
    );
    out
}
