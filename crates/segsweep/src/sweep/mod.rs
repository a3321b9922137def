//! Segment intersection engine.
//!
//! Purpose
//! - `find_intersections_fast`: sweep-line (Bentley–Ottmann style) search over
//!   N segments, handling vertical/horizontal segments, shared endpoints,
//!   collinear overlaps and many segments through one point.
//! - `find_intersections_slow`: all-pairs reference with contractually the
//!   same output set.
//!
//! Pipeline
//! - `prepare`: snap to the epsilon grid, drop degenerate/duplicate input.
//! - `events`: point-keyed queue (greater y first, then smaller x).
//! - `status`: active segments ordered left to right just below the sweep line.
//! - `controller`: the event loop.
//! - `results`: deduplicating, deterministically ordered collector.
//!
//! Numerics
//! - Epsilon is passed explicitly everywhere. Event points and result points
//!   live on the epsilon grid, so identity and ordering are exact integer
//!   comparisons on `GridKey`.
//!
//! Code cross-refs: `geom2::{LineSegment, GridKey}`.

mod controller;
mod events;
mod oracle;
mod pairwise;
mod prepare;
mod results;
mod status;

pub use controller::find_intersections_fast;
pub use oracle::find_intersections_slow;
pub use pairwise::intersect_segments;
pub use results::{IntersectionResult, ResultAggregator};
