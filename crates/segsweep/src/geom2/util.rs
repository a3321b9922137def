use nalgebra::Vector2;

/// Signed area of the parallelogram spanned by `a` and `b` (z of `a × b`).
/// Positive for a→b counterclockwise.
#[inline]
pub fn cross(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Euclidean distance.
#[inline]
pub fn distance(a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    (a - b).norm()
}

/// Coordinate-wise equality within `eps`.
#[inline]
pub fn eq_eps(a: Vector2<f64>, b: Vector2<f64>, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// Round `v` to the nearest multiple of `eps`.
///
/// Computed as `round(v / eps)` divided by `1 / eps` so that decimal
/// epsilons (1e-6, 1e-9) keep integer and short-decimal inputs exact.
#[inline]
pub fn snap_coord(v: f64, eps: f64) -> f64 {
    let scale = 1.0 / eps;
    (v * scale).round() / scale
}

/// Snap both coordinates to the epsilon grid.
#[inline]
pub fn snap(p: Vector2<f64>, eps: f64) -> Vector2<f64> {
    Vector2::new(snap_coord(p.x, eps), snap_coord(p.y, eps))
}

/// Integer grid index of `v`.
///
/// Exact only for `|v / eps| <= GRID_LIMIT`; input preparation rejects
/// anything farther out, so saturation never reaches the sweep.
#[inline]
pub(crate) fn grid_index(v: f64, eps: f64) -> i64 {
    (v * (1.0 / eps)).round() as i64
}
