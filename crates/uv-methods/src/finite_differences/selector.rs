//! Worst/best-case variance selection.
//!
//! The theta term `−½·σ²·S²·γ` is minimized or maximized by picking `σ²` from
//! `{minVol², maxVol²}`. Rather than branching on the sign of the curvature
//! `γ`, the selector takes the min or max of the two signed products
//! `γ·minVol²` and `γ·maxVol²`, which keeps the node update branch-free.

use std::fmt;
use std::str::FromStr;

use uv_core::{errors::Error, Real};

/// Which bound of the uncertain-volatility price to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Worst-case value over the volatility band.
    Bid,
    /// Best-case value over the volatility band.
    Ask,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bid" => Ok(Side::Bid),
            "ask" => Ok(Side::Ask),
            _ => Err(Error::UnknownTag {
                kind: "side",
                tag: s.to_string(),
            }),
        }
    }
}

/// Picks one of the two variance-scaled curvature terms.
///
/// Implemented by zero-sized marker types so the choice is resolved at
/// compile time and the kernels stay monomorphic.
pub trait VolatilitySelector {
    /// Return `low_term` or `high_term`, where `low_term = γ·minVol²` and
    /// `high_term = γ·maxVol²`.
    fn select(low_term: Real, high_term: Real) -> Real;
}

/// Bid-side selector: the smaller term.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorstCase;

/// Ask-side selector: the larger term.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestCase;

impl VolatilitySelector for WorstCase {
    #[inline(always)]
    fn select(low_term: Real, high_term: Real) -> Real {
        low_term.min(high_term)
    }
}

impl VolatilitySelector for BestCase {
    #[inline(always)]
    fn select(low_term: Real, high_term: Real) -> Real {
        low_term.max(high_term)
    }
}
