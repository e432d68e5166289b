//! # uv-methods
//!
//! Explicit finite-difference solver for the Black-Scholes-Barenblatt
//! (uncertain volatility) PDE.
//!
//! A portfolio of European contracts is marched backward from its furthest
//! expiry to time zero on a uniform price ladder. At every node the local
//! variance is picked from `{minVol², maxVol²}` so that the portfolio value is
//! the worst case (bid) or the best case (ask) over the volatility band.
//!
//! # Modules
//!
//! * [`finite_differences`] — price grid, value buffers, volatility selector,
//!   marching kernels and the [`UncertainVolPricer`] that drives them

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Finite difference methods: grid, kernels, uncertain-volatility pricer.
pub mod finite_differences;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use finite_differences::{
    Detail, KernelKind, PriceGrid, PricerConfig, Side, UncertainVolPricer, Valuation,
    STABILITY_SAFETY_FACTOR,
};
