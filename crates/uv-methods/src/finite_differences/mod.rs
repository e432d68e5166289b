//! Finite difference methods for the uncertain-volatility PDE.
//!
//! # Overview
//!
//! * [`PriceGrid`] — the uniform price ladder `0, Δp, …, maxPrice`
//! * [`ValueBuffers`] — double-buffered value workspace
//! * [`Side`] and the [`VolatilitySelector`] types — branch-free choice of
//!   the worst- or best-case variance at each node
//! * [`KernelKind`] — scalar or lane-chunked sub-step kernel
//! * [`PricerConfig`] — volatility band, rate, grid size, interpolation
//! * [`UncertainVolPricer`] — the marching engine

pub mod config;
pub mod grid;
pub mod kernel;
pub mod pricer;
pub mod selector;

pub use config::{PricerConfig, STABILITY_SAFETY_FACTOR};
pub use grid::{PriceGrid, ValueBuffers};
pub use kernel::KernelKind;
pub use pricer::{Detail, UncertainVolPricer, Valuation};
pub use selector::{BestCase, Side, VolatilitySelector, WorstCase};
