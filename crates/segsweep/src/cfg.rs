//! Tolerance defaults.
//!
//! Policy
//! - Defaults are fixed constants. Callers pass epsilon explicitly to every
//!   operation; this module only names the value most callers want.

/// Recommended epsilon: coordinates are compared and snapped on a 1e-9 grid.
pub const DEFAULT_EPS: f64 = 1e-9;

/// Largest grid index the engine accepts (2^53).
///
/// Coordinates with `|v / eps|` above this no longer land on distinct grid
/// cells; input segments reaching past it are dropped with a warning.
pub const GRID_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Panics unless `eps` is usable as a tolerance.
#[inline]
#[track_caller]
pub(crate) fn check_eps(eps: f64) {
    assert!(
        eps.is_finite() && eps > 0.0,
        "epsilon must be finite and positive, got {eps}"
    );
}
