//! Standard normal distribution.

use std::f64::consts::FRAC_1_SQRT_2;

use uv_core::Real;

/// The standard normal cumulative distribution function Φ(x).
///
/// Evaluated as `erfc(-x/√2) / 2` so the lower tail keeps full relative
/// precision.
pub fn normal_cdf(x: Real) -> Real {
    0.5 * statrs::function::erf::erfc(-x * FRAC_1_SQRT_2)
}
