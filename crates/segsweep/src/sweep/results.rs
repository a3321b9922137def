//! Intersection results and the deduplicating aggregator.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use nalgebra::Vector2;

use crate::cfg::check_eps;
use crate::geom2::{GridKey, LineSegment};

/// Outcome of intersecting segments.
///
/// `Point` and `OverlappingSegment` carry the deduplicated input segments that
/// produced them, in canonical order.
#[derive(Clone, Debug, PartialEq)]
pub enum IntersectionResult {
    None,
    Point {
        at: Vector2<f64>,
        segments: Vec<LineSegment>,
    },
    OverlappingSegment {
        segment: LineSegment,
        segments: Vec<LineSegment>,
    },
}

impl IntersectionResult {
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, IntersectionResult::None)
    }

    /// Intersection coordinate of a `Point` result.
    #[inline]
    pub fn point(&self) -> Option<Vector2<f64>> {
        match self {
            IntersectionResult::Point { at, .. } => Some(*at),
            _ => None,
        }
    }

    /// Shared piece of an `OverlappingSegment` result.
    #[inline]
    pub fn overlap(&self) -> Option<&LineSegment> {
        match self {
            IntersectionResult::OverlappingSegment { segment, .. } => Some(segment),
            _ => None,
        }
    }

    /// Contributing input segments (empty for `None`).
    #[inline]
    pub fn segments(&self) -> &[LineSegment] {
        match self {
            IntersectionResult::None => &[],
            IntersectionResult::Point { segments, .. }
            | IntersectionResult::OverlappingSegment { segments, .. } => segments,
        }
    }

    fn segments_mut(&mut self) -> Option<&mut Vec<LineSegment>> {
        match self {
            IntersectionResult::None => None,
            IntersectionResult::Point { segments, .. }
            | IntersectionResult::OverlappingSegment { segments, .. } => Some(segments),
        }
    }
}

/// Geometric identity of a result; the derived ordering is the output order.
///
/// Field order matters: lower endpoint, then upper endpoint (both in sweep
/// order), then variant tag. A point uses its coordinate for both endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ResultKey {
    lower: GridKey,
    upper: GridKey,
    tag: u8,
}

const TAG_POINT: u8 = 0;
const TAG_OVERLAP: u8 = 1;

/// Deduplicating collector keyed by geometric identity.
///
/// Inserting a result whose key already exists unions the contributor lists.
/// `into_sorted` consumes the aggregator, so no state outlives the output.
#[derive(Clone, Debug)]
pub struct ResultAggregator {
    eps: f64,
    entries: BTreeMap<ResultKey, IntersectionResult>,
}

impl ResultAggregator {
    /// # Panics
    /// If `eps` is not finite and positive.
    pub fn new(eps: f64) -> Self {
        check_eps(eps);
        Self {
            eps,
            entries: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn key_of(&self, result: &IntersectionResult) -> Option<ResultKey> {
        match result {
            IntersectionResult::None => None,
            IntersectionResult::Point { at, .. } => {
                let k = GridKey::of(*at, self.eps);
                Some(ResultKey {
                    lower: k,
                    upper: k,
                    tag: TAG_POINT,
                })
            }
            IntersectionResult::OverlappingSegment { segment, .. } => {
                let (upper, lower) = segment.keys(self.eps);
                Some(ResultKey {
                    lower,
                    upper,
                    tag: TAG_OVERLAP,
                })
            }
        }
    }

    /// Add a result; `None` is ignored.
    pub fn insert(&mut self, mut result: IntersectionResult) {
        let Some(key) = self.key_of(&result) else {
            return;
        };
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                if let Some(segs) = result.segments_mut() {
                    segs.sort_by(|a, b| a.cmp_canonical(b));
                    segs.dedup();
                }
                slot.insert(result);
            }
            Entry::Occupied(mut slot) => {
                let Some(existing) = slot.get_mut().segments_mut() else {
                    return;
                };
                for s in result.segments() {
                    if let Err(pos) = existing.binary_search_by(|e| e.cmp_canonical(s)) {
                        existing.insert(pos, *s);
                    }
                }
            }
        }
    }

    /// Results sorted by (lower endpoint, upper endpoint, variant), sweep order.
    pub fn into_sorted(self) -> Vec<IntersectionResult> {
        self.entries.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    const EPS: f64 = 1e-9;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::from_coords(x1, y1, x2, y2)
    }

    #[test]
    fn equal_keys_merge_without_duplicate_contributors() {
        let a = seg(0.0, 0.0, 2.0, 2.0);
        let b = seg(0.0, 2.0, 2.0, 0.0);
        let c = seg(1.0, 0.0, 1.0, 3.0);
        let mut agg = ResultAggregator::new(EPS);
        let hit = IntersectionResult::Point {
            at: vector![1.0, 1.0],
            segments: vec![a, b],
        };
        agg.insert(hit.clone());
        agg.insert(hit);
        agg.insert(IntersectionResult::Point {
            at: vector![1.0 + 1e-12, 1.0],
            segments: vec![c, a],
        });
        agg.insert(IntersectionResult::None);
        assert_eq!(agg.len(), 1);
        let out = agg.into_sorted();
        let segs = out[0].segments();
        assert_eq!(segs.len(), 3);
        for s in [a, b, c] {
            assert_eq!(segs.iter().filter(|t| **t == s).count(), 1);
        }
    }

    #[test]
    fn output_order_is_lower_then_upper_then_variant() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let t = seg(2.0, 0.0, 8.0, 0.0);
        let mut agg = ResultAggregator::new(EPS);
        agg.insert(IntersectionResult::Point {
            at: vector![8.0, 0.0],
            segments: vec![s, t],
        });
        agg.insert(IntersectionResult::OverlappingSegment {
            segment: seg(2.0, 0.0, 8.0, 0.0),
            segments: vec![s, t],
        });
        agg.insert(IntersectionResult::Point {
            at: vector![5.0, 5.0],
            segments: vec![s, t],
        });
        agg.insert(IntersectionResult::Point {
            at: vector![3.0, 0.0],
            segments: vec![s, t],
        });
        let out = agg.into_sorted();
        assert_eq!(out[0].point(), Some(vector![5.0, 5.0]));
        assert_eq!(out[1].point(), Some(vector![3.0, 0.0]));
        // Point (8,0) and the overlap share lower endpoint (8,0); the point's
        // upper endpoint (8,0) comes after the overlap's (2,0).
        assert!(out[2].overlap().is_some());
        assert_eq!(out[3].point(), Some(vector![8.0, 0.0]));
    }
}
