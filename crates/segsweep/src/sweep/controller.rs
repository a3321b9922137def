//! Sweep controller: the event loop of `find_intersections_fast`.
//!
//! Per event point p with upper-endpoint set U(p):
//! 1. Rebuild the status at p. Active segments through p split into L(p)
//!    (p is their lower endpoint) and C(p) (p is interior).
//! 2. If more than one segment touches p, every pair of L ∪ U ∪ C goes through
//!    the pairwise test; points and collinear overlaps are recorded as found.
//! 3. Test U against segments retired in the last two rows, then remove
//!    L ∪ C, rebuild at p; insert U ∪ C, rebuild at p.
//! 4. Test the new neighbor pairs at the edges of U ∪ C (or across p when
//!    U ∪ C is empty), plus every pair the rebuilds swapped or made
//!    adjacent. Whatever they share is recorded; crossings ahead of the
//!    sweep are also queued so the status order flips there.

use nalgebra::Vector2;

use super::events::{Event, EventQueue, SegId};
use super::pairwise::{meet, Meet};
use super::prepare::{prepare_segments, Prepared};
use super::results::{IntersectionResult, ResultAggregator};
use super::status::{Status, TOUCH};
use crate::cfg::check_eps;
use crate::geom2::{GridKey, LineSegment};

/// All intersections among `segments`, found by a plane sweep.
///
/// Degenerate, duplicate and non-finite segments are ignored, as are
/// segments with a coordinate beyond `GRID_LIMIT * eps` (about 9e6 at the
/// default epsilon); each skip of the last kind is logged at warn level. The
/// output is deduplicated by geometric identity and sorted (see
/// `ResultAggregator`); as a set it equals
/// `find_intersections_slow(segments, eps)`.
///
/// # Panics
/// If `eps` is not finite and positive.
pub fn find_intersections_fast(segments: &[LineSegment], eps: f64) -> Vec<IntersectionResult> {
    check_eps(eps);
    let prepared = prepare_segments(segments, eps);
    let mut sweep = Sweep::new(&prepared, eps);
    sweep.run();
    tracing::debug!(
        segments = prepared.len(),
        events = sweep.events_handled,
        discovered = sweep.events_discovered,
        results = sweep.results.len(),
        "sweep finished"
    );
    sweep.results.into_sorted()
}

/// Rows a retired segment stays eligible for tolerance contacts. Two
/// segments within `eps` of touching have endpoints at most two rows apart.
const RETIRED_ROWS: i64 = 2;

/// Bounding boxes of `a` and `b` overlap once grown by `tol`.
fn boxes_within(a: &LineSegment, b: &LineSegment, tol: f64) -> bool {
    let (ax0, ax1) = min_max(a.upper().x, a.lower().x);
    let (bx0, bx1) = min_max(b.upper().x, b.lower().x);
    ax0 - tol <= bx1
        && bx0 - tol <= ax1
        && a.lower().y - tol <= b.upper().y
        && b.lower().y - tol <= a.upper().y
}

#[inline]
fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

struct Sweep<'a> {
    segs: &'a [Prepared],
    eps: f64,
    queue: EventQueue,
    status: Status,
    results: ResultAggregator,
    /// Segments removed at their lower endpoint, with the row they left at.
    retired: Vec<(SegId, i64)>,
    events_handled: usize,
    events_discovered: usize,
}

impl<'a> Sweep<'a> {
    fn new(segs: &'a [Prepared], eps: f64) -> Self {
        let mut queue = EventQueue::new(eps);
        for (i, s) in segs.iter().enumerate() {
            queue.insert_segment(SegId(i), &s.snapped);
        }
        tracing::trace!(events = queue.len(), "queued endpoint events");
        Self {
            segs,
            eps,
            queue,
            status: Status::new(eps),
            results: ResultAggregator::new(eps),
            retired: Vec::new(),
            events_handled: 0,
            events_discovered: 0,
        }
    }

    #[inline]
    fn seg(&self, id: SegId) -> &LineSegment {
        &self.segs[id.0].snapped
    }

    fn run(&mut self) {
        while let Some(event) = self.queue.pop() {
            self.handle(event);
            self.events_handled += 1;
        }
        debug_assert!(
            self.status.is_empty(),
            "status structure not empty after the last event"
        );
    }

    fn handle(&mut self, event: Event) {
        let p = event.point;
        let here = GridKey::of(p, self.eps);
        let upper: Vec<SegId> = event.upper_of.into_iter().collect();
        let mut reordered = self.status.rebuild(p);

        let (lower, interior): (Vec<SegId>, Vec<SegId>) = self
            .status
            .find_containing(p)
            .into_iter()
            .partition(|id| GridKey::of(self.seg(*id).lower(), self.eps) == here);

        tracing::trace!(
            x = p.x,
            y = p.y,
            upper = upper.len(),
            lower = lower.len(),
            interior = interior.len(),
            active = self.status.len(),
            "event"
        );

        let mut touching: Vec<SegId> = upper
            .iter()
            .chain(&lower)
            .chain(&interior)
            .copied()
            .collect();
        touching.sort_unstable();
        touching.dedup();
        if touching.len() > 1 {
            for (i, &a) in touching.iter().enumerate() {
                for &b in &touching[i + 1..] {
                    self.record(a, b);
                }
            }
        }

        self.meet_retired(&upper, here);

        for &id in lower.iter().chain(&interior) {
            let seg = *self.seg(id);
            self.status.remove(id, &seg);
        }
        self.retired.extend(lower.iter().map(|&id| (id, here.gy)));
        reordered.extend(self.status.rebuild(p));
        for &id in upper.iter().chain(&interior) {
            let seg = *self.seg(id);
            self.status.insert(id, seg);
        }
        reordered.extend(self.status.rebuild(p));

        if upper.is_empty() && interior.is_empty() {
            if let (Some(left), Some(right)) = (self.status.floor(p), self.status.ceiling(p)) {
                self.test_pair(left, right, p);
            }
        } else if let Some((leftmost, rightmost)) = self.status.extremes_at(p) {
            if let Some(left) = self.status.floor(p) {
                self.test_pair(left, leftmost, p);
            }
            if let Some(right) = self.status.ceiling(p) {
                self.test_pair(rightmost, right, p);
            }
        }
        // Pairs the re-sort swapped or brought together since the previous event.
        for (a, b) in reordered {
            self.test_pair(a, b, p);
        }
    }

    /// Pairwise test of segments starting at the current event against
    /// segments that ended at most `RETIRED_ROWS` rows above it.
    ///
    /// A pair within `eps` of touching can miss each other in the status:
    /// one is removed before the other is inserted.
    fn meet_retired(&mut self, upper: &[SegId], here: GridKey) {
        self.retired.retain(|&(_, gy)| gy - here.gy <= RETIRED_ROWS);
        if upper.is_empty() || self.retired.is_empty() {
            return;
        }
        let tol = TOUCH * self.eps;
        let pairs: Vec<(SegId, SegId)> = upper
            .iter()
            .flat_map(|&u| self.retired.iter().map(move |&(r, _)| (u, r)))
            .filter(|&(u, r)| boxes_within(self.seg(u), self.seg(r), tol))
            .collect();
        for (u, r) in pairs {
            self.record(u, r);
        }
    }

    fn result_of(&self, meet: Meet, a: SegId, b: SegId) -> IntersectionResult {
        meet.into_result(self.segs[a.0].original, self.segs[b.0].original)
    }

    /// Pairwise test of two segments meeting at the current event.
    fn record(&mut self, a: SegId, b: SegId) {
        let m = meet(self.seg(a), self.seg(b), self.eps);
        let result = self.result_of(m, a, b);
        self.results.insert(result);
    }

    /// Pairwise test of two segments that just became adjacent.
    ///
    /// Anything they share is recorded right away. A crossing ahead of the
    /// sweep (below the line, or on it to the right of `p`) also becomes an
    /// event, so the pair swaps places in the status there.
    fn test_pair(&mut self, a: SegId, b: SegId, p: Vector2<f64>) {
        let m = meet(self.seg(a), self.seg(b), self.eps);
        if let Meet::Point(q) = m {
            if GridKey::of(q, self.eps) > GridKey::of(p, self.eps) && !self.queue.contains(q) {
                self.queue.insert_point(q);
                self.events_discovered += 1;
            }
        }
        let result = self.result_of(m, a, b);
        self.results.insert(result);
    }
}
