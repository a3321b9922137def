//! Status structure: the active segments, ordered left to right just past
//! the current event point.
//!
//! Every derived field of an item (side of the event, x on the sweep line,
//! drift) is computed for one event point. Moving the sweep requires
//! `rebuild`, which recomputes all items from their segments and re-sorts;
//! nothing is patched in place.
//!
//! Order at event p, in priority:
//! - Side: items left of p, items through p, items right of p. An item is
//!   "through" p when it passes within `TOUCH * eps` of it; horizontals are
//!   always through (they start at p for the rest of the sweep).
//! - Through p: drift, i.e. the order just below the line. A diagonal
//!   descending to the left sorts before a vertical, one descending to the
//!   right after it; horizontals sort last.
//! - Left or right of p: x on the sweep line when the gap is clear of
//!   rounding. Otherwise the crossing of the two supporting lines decides:
//!   once its grid key has been swept, drift order; before that, reversed
//!   drift order.
//! - Collinear pairs: upper endpoint, then lower endpoint, in sweep order.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::Range;

use nalgebra::Vector2;

use super::events::SegId;
use super::pairwise::{collinear, line_crossing, parallel};
use crate::geom2::{GridKey, LineSegment};

/// Contact tolerance, in multiples of eps. Snapped crossings sit up to
/// ~1.7 eps from the segments that produced them.
pub(crate) const TOUCH: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Side {
    Left,
    Through,
    Right,
}

/// An active segment with fields derived at the current event point.
#[derive(Clone, Copy, Debug)]
pub(crate) struct StatusItem {
    pub id: SegId,
    pub seg: LineSegment,
    pub side: Side,
    /// x where the segment's line meets the sweep line.
    pub x: f64,
    /// Horizontal movement per unit of descent. Vertical is 0, horizontal +inf.
    pub drift: f64,
    upper: GridKey,
    lower: GridKey,
}

/// The sweep position all comparisons are evaluated at.
#[derive(Clone, Copy, Debug)]
struct SweepLine {
    event: Vector2<f64>,
    here: GridKey,
    eps: f64,
}

impl SweepLine {
    fn new(event: Vector2<f64>, eps: f64) -> Self {
        Self {
            event,
            here: GridKey::of(event, eps),
            eps,
        }
    }

    fn item(&self, id: SegId, seg: LineSegment) -> StatusItem {
        let (upper, lower) = seg.keys(self.eps);
        let horizontal = upper.gy == lower.gy;
        let drift = if horizontal {
            f64::INFINITY
        } else if upper.gx == lower.gx {
            0.0
        } else {
            let d = seg.direction();
            // + 0.0 folds -0.0 into 0.0 for total_cmp.
            d.x / -d.y + 0.0
        };
        let x = seg.x_at_y(self.event.y).unwrap_or(self.event.x);
        let side = if horizontal {
            Side::Through
        } else {
            side_of(&seg, self.event, self.eps)
        };
        StatusItem {
            id,
            seg,
            side,
            x,
            drift,
            upper,
            lower,
        }
    }

    fn cmp(&self, a: &StatusItem, b: &StatusItem) -> Ordering {
        a.side
            .cmp(&b.side)
            .then_with(|| match a.side {
                Side::Through => self.cmp_through(a, b),
                Side::Left | Side::Right => self.cmp_apart(a, b),
            })
            .then_with(|| a.upper.cmp(&b.upper))
            .then_with(|| a.lower.cmp(&b.lower))
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Both pass through the event point.
    fn cmp_through(&self, a: &StatusItem, b: &StatusItem) -> Ordering {
        if parallel(&a.seg, &b.seg, self.eps) {
            return Ordering::Equal;
        }
        a.drift.total_cmp(&b.drift)
    }

    /// Both on the same side of the event point.
    fn cmp_apart(&self, a: &StatusItem, b: &StatusItem) -> Ordering {
        let margin = self.eps * (1.0 + a.drift.abs() + b.drift.abs());
        if (a.x - b.x).abs() > margin {
            return a.x.total_cmp(&b.x);
        }
        match line_crossing(&a.seg, &b.seg, self.eps) {
            Some(q) => {
                let below = a.drift.total_cmp(&b.drift);
                if GridKey::of(q, self.eps) <= self.here {
                    below
                } else {
                    below.reverse()
                }
            }
            None if collinear(&a.seg, &b.seg, self.eps) => Ordering::Equal,
            None => a.x.total_cmp(&b.x),
        }
    }
}

/// Side of `p` on which `seg` crosses the horizontal line through `p`.
fn side_of(seg: &LineSegment, p: Vector2<f64>, eps: f64) -> Side {
    if seg.contains_eps(p, TOUCH * eps) {
        return Side::Through;
    }
    let x = match seg.x_at_y(p.y) {
        Some(x) => x,
        // Horizontal away from p: its near end decides.
        None => seg.upper().x,
    };
    if x < p.x {
        Side::Left
    } else {
        Side::Right
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Status {
    line: SweepLine,
    items: Vec<StatusItem>,
}

impl Status {
    pub fn new(eps: f64) -> Self {
        Self {
            line: SweepLine::new(Vector2::zeros(), eps),
            items: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Active segment ids, left to right.
    #[cfg(test)]
    pub fn order(&self) -> Vec<SegId> {
        self.items.iter().map(|it| it.id).collect()
    }

    /// Insert at its position for the current event point.
    pub fn insert(&mut self, id: SegId, seg: LineSegment) {
        let item = self.line.item(id, seg);
        let line = self.line;
        let pos = self
            .items
            .partition_point(|it| line.cmp(it, &item) == Ordering::Less);
        self.items.insert(pos, item);
    }

    /// # Panics
    /// If `id` is not active; the sweep never removes a segment it did not insert.
    pub fn remove(&mut self, id: SegId, seg: &LineSegment) {
        let target = self.line.item(id, *seg);
        let line = self.line;
        let pos = match self.items.binary_search_by(|it| line.cmp(it, &target)) {
            Ok(pos) if self.items[pos].id == id => Some(pos),
            _ => self.items.iter().position(|it| it.id == id),
        };
        let Some(pos) = pos else {
            panic!("status structure invariant violated: {id:?} is not active");
        };
        self.items.remove(pos);
    }

    /// Recompute every item for a new event point and re-sort.
    ///
    /// Consecutive events change the order only locally, so an insertion
    /// sort does little work here. Returns the pairs whose order changed
    /// (every swap the sort made) followed by the neighbor pairs it created.
    /// A segment can pass several others between two events when their
    /// crossings snap into a row the sweep has already left.
    pub fn rebuild(&mut self, event: Vector2<f64>) -> Vec<(SegId, SegId)> {
        let line = SweepLine::new(event, self.line.eps);
        self.line = line;
        let mut items: Vec<StatusItem> = self
            .items
            .iter()
            .map(|it| line.item(it.id, it.seg))
            .collect();
        let mut changed = Vec::new();
        for i in 1..items.len() {
            let mut j = i;
            while j > 0 && line.cmp(&items[j - 1], &items[j]) == Ordering::Greater {
                changed.push((items[j].id, items[j - 1].id));
                items.swap(j - 1, j);
                j -= 1;
            }
        }
        let before = std::mem::replace(&mut self.items, items);
        if changed.is_empty() {
            return changed;
        }
        let mut seen: HashSet<(SegId, SegId)> = before
            .windows(2)
            .map(|w| (w[0].id, w[1].id))
            .chain(changed.iter().copied())
            .collect();
        for w in self.items.windows(2) {
            if seen.insert((w[0].id, w[1].id)) {
                changed.push((w[0].id, w[1].id));
            }
        }
        changed
    }

    /// Active segments whose closed extent contains `p`, left to right.
    ///
    /// At the current event point this is the "through" block of the order.
    pub fn find_containing(&self, p: Vector2<f64>) -> Vec<SegId> {
        self.items[self.span_at(p)]
            .iter()
            .filter(|it| side_of(&it.seg, p, self.line.eps) == Side::Through)
            .map(|it| it.id)
            .collect()
    }

    /// Index range of items through `p`, with everything left of `p` before
    /// it and everything right of `p` after it.
    fn span_at(&self, p: Vector2<f64>) -> Range<usize> {
        let eps = self.line.eps;
        if GridKey::of(p, eps) != self.line.here {
            // Off the event point the order need not partition around `p`.
            let lo = self
                .items
                .iter()
                .position(|it| side_of(&it.seg, p, eps) != Side::Left)
                .unwrap_or(self.items.len());
            let hi = self
                .items
                .iter()
                .rposition(|it| side_of(&it.seg, p, eps) != Side::Right)
                .map_or(lo, |i| (i + 1).max(lo));
            return lo..hi;
        }
        let lo = self.items.partition_point(|it| it.side == Side::Left);
        let hi = self.items.partition_point(|it| it.side != Side::Right);
        lo..hi
    }

    /// Nearest item strictly left of `p`.
    pub fn floor(&self, p: Vector2<f64>) -> Option<SegId> {
        let span = self.span_at(p);
        span.start.checked_sub(1).map(|i| self.items[i].id)
    }

    /// Nearest item strictly right of `p`.
    pub fn ceiling(&self, p: Vector2<f64>) -> Option<SegId> {
        let span = self.span_at(p);
        self.items.get(span.end).map(|it| it.id)
    }

    /// Leftmost and rightmost items through the event point.
    pub fn extremes_at(&self, p: Vector2<f64>) -> Option<(SegId, SegId)> {
        let block = &self.items[self.span_at(p)];
        let first = block.first()?;
        let last = block.last()?;
        Some((first.id, last.id))
    }

    #[cfg(test)]
    pub(crate) fn items(&self) -> &[StatusItem] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::snap;
    use nalgebra::vector;

    const EPS: f64 = 1e-9;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> LineSegment {
        LineSegment::from_coords(x1, y1, x2, y2)
    }

    fn status_with(event: Vector2<f64>, segs: &[LineSegment]) -> Status {
        let mut st = Status::new(EPS);
        st.rebuild(event);
        for (i, s) in segs.iter().enumerate() {
            st.insert(SegId(i), *s);
        }
        st.rebuild(event);
        st
    }

    #[test]
    fn diagonals_order_around_vertical_by_slope_sign() {
        let p = vector![5.0, 5.0];
        let v = seg(5.0, 10.0, 5.0, 0.0);
        let descends_right = seg(2.0, 8.0, 8.0, 2.0);
        let descends_left = seg(8.0, 8.0, 2.0, 2.0);
        let st = status_with(p, &[v, descends_right, descends_left]);
        assert_eq!(st.order(), vec![SegId(2), SegId(0), SegId(1)]);
        assert!(st.items().iter().all(|it| it.side == Side::Through));
    }

    #[test]
    fn horizontal_through_event_sorts_last() {
        let p = vector![5.0, 5.0];
        let h = seg(5.0, 5.0, 9.0, 5.0);
        let v = seg(5.0, 10.0, 5.0, 0.0);
        let steep = seg(4.0, 9.0, 6.0, 1.0);
        let right = seg(7.0, 9.0, 7.0, 1.0);
        let st = status_with(p, &[h, v, steep, right]);
        assert_eq!(st.order(), vec![SegId(1), SegId(2), SegId(0), SegId(3)]);
    }

    #[test]
    fn collinear_ties_break_on_endpoints() {
        let p = vector![4.0, 4.0];
        let short = seg(2.0, 2.0, 6.0, 6.0);
        let long = seg(0.0, 0.0, 10.0, 10.0);
        let st = status_with(p, &[short, long]);
        // long's upper (10,10) precedes short's upper (6,6).
        assert_eq!(st.order(), vec![SegId(1), SegId(0)]);
    }

    #[test]
    fn rebuild_reorders_after_crossing() {
        let a = seg(0.0, 10.0, 10.0, 0.0);
        let b = seg(0.0, 0.0, 10.0, 10.0);
        let mut st = status_with(vector![100.0, 8.0], &[a, b]);
        assert_eq!(st.order(), vec![SegId(0), SegId(1)]);
        let changed = st.rebuild(vector![100.0, 2.0]);
        assert_eq!(st.order(), vec![SegId(1), SegId(0)]);
        assert_eq!(changed, vec![(SegId(1), SegId(0))]);
        assert!(st.rebuild(vector![100.0, 1.0]).is_empty());
    }

    #[test]
    fn swept_crossing_on_the_event_row_keeps_the_swapped_order() {
        // The crossing of `shallow` and `vertical` at (8, 14/3) snaps slightly
        // above the true point; at a later event on the same row the pair must
        // stay in its post-crossing order even though the line positions have
        // not swapped yet at the snapped y.
        let shallow = seg(9.0, 5.0, 0.0, 2.0);
        let vertical = seg(8.0, 5.0, 8.0, 1.0);
        let through_a = seg(10.0, 5.0, 7.0, 4.0);
        let through_b = seg(9.0, 9.0, 9.0, 2.0);
        let p = snap(vector![9.0, 14.0 / 3.0], EPS);
        let st = status_with(p, &[shallow, vertical, through_a, through_b]);
        assert!(st.items()[0].x > 8.0);
        assert_eq!(st.order(), vec![SegId(0), SegId(1), SegId(2), SegId(3)]);
        assert_eq!(st.floor(p), Some(SegId(1)));
        assert_eq!(st.extremes_at(p), Some((SegId(2), SegId(3))));
        assert_eq!(st.ceiling(p), None);
    }

    #[test]
    fn unswept_crossing_keeps_the_order_above_it() {
        // a and b cross at (6, 5), to the right of the event on its row.
        let a = seg(4.0, 6.0, 8.0, 4.0);
        let b = seg(4.0, 4.0, 8.0, 6.0);
        let p = vector![1.0, 5.0];
        let st = status_with(p, &[a, b]);
        assert_eq!(st.order(), vec![SegId(0), SegId(1)]);
        let q = vector![7.0, 5.0];
        let st = status_with(q, &[a, b]);
        assert_eq!(st.order(), vec![SegId(1), SegId(0)]);
    }

    #[test]
    fn floor_ceiling_and_extremes_around_a_point() {
        let p = vector![5.0, 5.0];
        let left = seg(1.0, 9.0, 1.0, 0.0);
        let through_a = seg(3.0, 7.0, 7.0, 3.0);
        let through_b = seg(5.0, 9.0, 5.0, 1.0);
        let right = seg(8.0, 9.0, 9.0, 0.0);
        let st = status_with(p, &[left, through_a, through_b, right]);
        assert_eq!(st.floor(p), Some(SegId(0)));
        assert_eq!(st.ceiling(p), Some(SegId(3)));
        assert_eq!(st.extremes_at(p), Some((SegId(2), SegId(1))));
        let gap = vector![2.0, 5.0];
        assert_eq!(st.extremes_at(gap), None);
        assert_eq!(st.floor(gap), Some(SegId(0)));
        assert_eq!(st.ceiling(gap), Some(SegId(2)));
    }

    #[test]
    fn find_containing_reports_endpoints_and_interiors() {
        let p = vector![5.0, 5.0];
        let ends_here = seg(5.0, 5.0, 5.0, 9.0);
        let passes = seg(0.0, 10.0, 10.0, 0.0);
        let misses = seg(6.0, 10.0, 6.0, 0.0);
        let st = status_with(p, &[ends_here, passes, misses]);
        let mut found = st.find_containing(p);
        found.sort();
        assert_eq!(found, vec![SegId(0), SegId(1)]);
        assert_eq!(st.find_containing(vector![6.0, 3.0]), vec![SegId(2)]);
    }

    #[test]
    fn remove_drops_item() {
        let p = vector![0.0, 0.0];
        let a = seg(-1.0, 1.0, -1.0, -1.0);
        let b = seg(1.0, 1.0, 1.0, -1.0);
        let mut st = status_with(p, &[a, b]);
        st.remove(SegId(0), &a);
        assert_eq!(st.order(), vec![SegId(1)]);
        assert_eq!(st.len(), 1);
        assert!(!st.is_empty());
    }

    #[test]
    #[should_panic(expected = "is not active")]
    fn removing_inactive_segment_is_fatal() {
        let mut st = Status::new(EPS);
        st.remove(SegId(7), &seg(0.0, 0.0, 1.0, 1.0));
    }
}
