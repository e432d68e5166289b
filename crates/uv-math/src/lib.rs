//! # uv-math
//!
//! Mathematical utilities for the uncertain-volatility pricer: grid
//! interpolation (linear and 4-point cubic), the normal distribution (via
//! statrs), and a derivative-free global optimizer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// 1D interpolation schemes.
pub mod interpolations;

/// Bounded derivative-free optimization.
pub mod optimization;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::normal_cdf;
pub use interpolations::{Interpolation, Interpolation1D, UniformGridInterpolation};
pub use optimization::{Direct, OptimizationResult, Termination};
