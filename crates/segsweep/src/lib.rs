//! Planar line-segment intersection.
//!
//! The crate has two layers:
//! - `geom2`: the primitive layer (points as `nalgebra::Vector2<f64>`, canonical
//!   `LineSegment`, epsilon-grid keys, seeded random generators).
//! - `sweep`: the intersection engine. `find_intersections_fast` runs a
//!   Bentley–Ottmann style sweep; `find_intersections_slow` is the O(N²)
//!   reference used to cross-check it.
//!
//! Tolerance policy
//! - Every operation takes its epsilon explicitly; nothing reads ambient
//!   configuration. `cfg::DEFAULT_EPS` is the recommended value.
//!
//! API Policy
//! - `api` is the curated surface; module paths may move between versions.

pub mod api;
pub mod cfg;
pub mod geom2;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::DEFAULT_EPS;
pub use geom2::{GridKey, LineSegment};
pub use nalgebra::Vector2 as Vec2;
pub use sweep::{
    find_intersections_fast, find_intersections_slow, intersect_segments, IntersectionResult,
    ResultAggregator,
};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cfg::DEFAULT_EPS;
    pub use crate::geom2::rand::{draw_segments, ReplayToken, SegmentCfg};
    pub use crate::geom2::{cross, distance, eq_eps, snap, GridKey, LineSegment};
    pub use crate::sweep::{
        find_intersections_fast, find_intersections_slow, intersect_segments,
        IntersectionResult, ResultAggregator,
    };
    pub use nalgebra::Vector2 as Vec2;
}
