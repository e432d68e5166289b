//! Error types for the uncertain-volatility pricer.
//!
//! Every failure is fatal and surfaces immediately: configuration problems
//! are rejected when a pricer or contract is built, input problems when a
//! valuation or a parse is attempted. Nothing is clamped silently.

use thiserror::Error;

/// The top-level error type used throughout the workspace.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (raised by [`fail!`](crate::fail)).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated, typically a configuration error detected at
    /// construction time (raised by [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A textual tag (contract kind, side, interpolation mode) was not
    /// recognised.
    #[error("unknown {kind} tag: {tag:?}")]
    UnknownTag {
        /// What the tag was supposed to name.
        kind: &'static str,
        /// The offending tag.
        tag: String,
    },

    /// The requested spot lies outside the simulated price ladder.
    #[error("spot {spot} outside simulated price range [0, {max_price}]")]
    SpotOutOfRange {
        /// The requested spot.
        spot: f64,
        /// Upper end of the price ladder.
        max_price: f64,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use uv_core::{ensure, errors::Error};
/// fn positive(x: f64) -> uv_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use uv_core::{fail, errors::Error};
/// fn always_err() -> uv_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
