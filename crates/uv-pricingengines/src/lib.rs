//! # uv-pricingengines
//!
//! Engines built around the uncertain-volatility pricer.
//!
//! ## Engines
//!
//! - [`black_scholes_put_call`], [`binary_call_price`], [`binary_put_price`] —
//!   closed-form Black-Scholes prices used as a reference and to price hedges
//! - [`StaticHedge`] — chooses vanilla hedge quantities that maximize the
//!   worst-case value of a hedged digital, using the DIRECT global search

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black_scholes;
pub mod static_hedge;

pub use black_scholes::{
    binary_call_price, binary_put_price, black_scholes_put_call, closed_form_price, PutCallPair,
};
pub use static_hedge::{HedgeCalibration, HedgeCalibrationOptions, StaticHedge};
