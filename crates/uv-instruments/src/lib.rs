//! # uv-instruments
//!
//! European vanilla and digital option contracts: the closed set of payoff
//! kinds, their point and cell-average payoffs, and a loader that builds
//! contracts from tabular columns.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
pub mod loader;
pub mod payoff;

pub use contract::OptionContract;
pub use loader::contracts_from_columns;
pub use payoff::ContractKind;
