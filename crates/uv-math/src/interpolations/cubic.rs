//! Four-point cubic interpolation on equally spaced nodes.

use uv_core::Real;

/// Evaluate the cubic through four equally spaced samples.
///
/// The samples sit at parameters `-1, 0, 1, 2`; `mu ∈ [0, 1]` walks from
/// `y1` to `y2`. The polynomial reproduces all four samples exactly, so any
/// cubic is interpolated without error.
///
/// This is not the four-coefficient blend
/// `a0·mu³ + a1·mu² + a2·mu + y1` with `a0 = y3 − y2 − y0 + y1`,
/// `a1 = y0 − y1 − a0`, `a2 = y2 − y0` that grid readers sometimes use.
/// That blend misses even quadratics, so the two readings differ off the
/// nodes (by about `1.6e-3` for an at-the-money binary call).
#[inline]
pub fn lagrange_cubic(y0: Real, y1: Real, y2: Real, y3: Real, mu: Real) -> Real {
    let a = mu + 1.0;
    let b = mu - 1.0;
    let c = mu - 2.0;
    -mu * b * c / 6.0 * y0 + a * b * c / 2.0 * y1 - a * mu * c / 2.0 * y2
        + a * mu * b / 6.0 * y3
}
