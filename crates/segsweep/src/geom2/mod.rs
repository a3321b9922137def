//! 2D primitive layer for the intersection engine.
//!
//! Purpose
//! - Points are plain `nalgebra::Vector2<f64>`; this module adds the few
//!   operations the engine needs on top (cross product, epsilon equality,
//!   snapping to the epsilon grid).
//! - `LineSegment` fixes its orientation at construction: the upper endpoint
//!   has the greater y (ties: smaller x). Equality and ordering never depend
//!   on the order the endpoints were given in.
//! - `GridKey` is a point rounded to integer grid units of size epsilon. Its
//!   ordering is the sweep order (greater y first, then smaller x).
//!
//! Code cross-refs: `sweep::{events, status, results}` key on `GridKey`.

pub mod rand;
mod types;
mod util;

pub use types::{GridKey, LineSegment};
pub use util::{cross, distance, eq_eps, snap, snap_coord};
pub(crate) use util::grid_index;
