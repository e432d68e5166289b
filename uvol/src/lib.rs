//! # uvol
//!
//! Uncertain-volatility (Black-Scholes-Barenblatt) option pricing with an
//! explicit finite-difference scheme.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `uv-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! uvol = "0.1"
//! ```
//!
//! ```rust
//! use uvol::instruments::OptionContract;
//! use uvol::methods::{PricerConfig, Side, UncertainVolPricer};
//! use uvol::pricingengines::binary_call_price;
//!
//! // Volatility known only to lie in [10%, 30%]
//! let config = PricerConfig::new(0.10, 0.30, 0.05, 200.0, 80);
//! let mut pricer = UncertainVolPricer::new(config)?;
//! pricer.add_contract(OptionContract::binary_call(0.5, 100.0)?);
//!
//! let bid = pricer.valuate(100.0, Side::Bid)?;
//! let ask = pricer.valuate(100.0, Side::Ask)?;
//! assert!(bid < ask);
//!
//! let mid_vol = binary_call_price(0.20, 0.05, 0.5, 100.0, 100.0);
//! assert!(bid < mid_vol && mid_vol < ask);
//! # Ok::<(), uvol::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use uv_core as core;

/// Mathematical utilities: interpolation, normal distribution, DIRECT.
pub use uv_math as math;

/// Option contracts, payoffs and the tabular loader.
pub use uv_instruments as instruments;

/// Finite-difference grid, kernels and the uncertain-volatility pricer.
pub use uv_methods as methods;

/// Closed-form reference prices and static-hedge calibration.
pub use uv_pricingengines as pricingengines;
