//! 1D interpolation on the price ladder.
//!
//! The pricer only ever reads values off a uniform grid, so the schemes here
//! are the two it offers: linear between the bracketing nodes, and a 4-point
//! cubic through the two nodes on either side of the spot.

use std::fmt;
use std::str::FromStr;

use uv_core::{errors::Error, Real};

pub mod cubic;
pub mod uniform_grid;

pub use cubic::lagrange_cubic;
pub use uniform_grid::UniformGridInterpolation;

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolation1D: fmt::Debug {
    /// Evaluate the interpolation at `x`.
    ///
    /// # Errors
    /// Returns an error if `x` lies outside `[x_min, x_max]`.
    fn value(&self, x: Real) -> uv_core::Result<Real>;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Interpolation mode used when reading a value off the finished grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Interpolation {
    /// Linear between the two bracketing nodes.
    #[default]
    Linear,
    /// 4-point cubic; falls back to linear next to either end of the grid.
    Cubic,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::Linear => write!(f, "linear"),
            Interpolation::Cubic => write!(f, "cubic"),
        }
    }
}

impl FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Interpolation::Linear),
            "cubic" => Ok(Interpolation::Cubic),
            _ => Err(Error::UnknownTag {
                kind: "interpolation mode",
                tag: s.to_string(),
            }),
        }
    }
}

/// Linear blend of two neighbouring nodes.
///
/// `k` is the distance from `x` to the *upper* node in units of the node
/// spacing, so `k = 1` returns `lower` and `k = 0` returns `upper`.
#[inline]
pub fn linear_blend(lower: Real, upper: Real, k: Real) -> Real {
    lower * k + upper * (1.0 - k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_blend_endpoints() {
        assert_eq!(linear_blend(3.0, 7.0, 1.0), 3.0);
        assert_eq!(linear_blend(3.0, 7.0, 0.0), 7.0);
        assert!((linear_blend(3.0, 7.0, 0.25) - 6.0).abs() < 1e-15);
    }

    #[test]
    fn interpolation_tags() {
        assert_eq!("linear".parse::<Interpolation>(), Ok(Interpolation::Linear));
        assert_eq!(" Cubic ".parse::<Interpolation>(), Ok(Interpolation::Cubic));
        assert_eq!(Interpolation::Cubic.to_string(), "cubic");
        assert!(matches!(
            "spline".parse::<Interpolation>(),
            Err(Error::UnknownTag { kind: "interpolation mode", .. })
        ));
        assert_eq!(Interpolation::default(), Interpolation::Linear);
    }
}
