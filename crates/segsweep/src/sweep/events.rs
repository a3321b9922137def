//! Event queue: point-keyed, popped in sweep order.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::Vector2;

use crate::geom2::{GridKey, LineSegment};

/// Index into the prepared segment list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SegId(pub usize);

/// An event point plus the segments whose upper endpoint it is.
///
/// Lower endpoints and discovered crossings carry no segments; membership
/// there is recomputed from the status structure when the event is handled.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Event {
    pub point: Vector2<f64>,
    pub upper_of: BTreeSet<SegId>,
}

#[derive(Clone, Debug)]
pub(crate) struct EventQueue {
    eps: f64,
    by_key: BTreeMap<GridKey, Event>,
}

impl EventQueue {
    pub fn new(eps: f64) -> Self {
        Self {
            eps,
            by_key: BTreeMap::new(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        self.by_key.contains_key(&GridKey::of(p, self.eps))
    }

    fn slot(&mut self, p: Vector2<f64>) -> &mut Event {
        self.by_key
            .entry(GridKey::of(p, self.eps))
            .or_insert_with(|| Event {
                point: p,
                upper_of: BTreeSet::new(),
            })
    }

    /// Queue both endpoints; the upper event carries `id`.
    pub fn insert_segment(&mut self, id: SegId, seg: &LineSegment) {
        self.slot(seg.upper()).upper_of.insert(id);
        self.slot(seg.lower());
    }

    /// Queue a bare point. Returns false if an event already sits there.
    pub fn insert_point(&mut self, p: Vector2<f64>) -> bool {
        let key = GridKey::of(p, self.eps);
        if self.by_key.contains_key(&key) {
            return false;
        }
        self.by_key.insert(
            key,
            Event {
                point: p,
                upper_of: BTreeSet::new(),
            },
        );
        true
    }

    /// Remove and return the next event in sweep order.
    #[inline]
    pub fn pop(&mut self) -> Option<Event> {
        self.by_key.pop_first().map(|(_, ev)| ev)
    }
}
