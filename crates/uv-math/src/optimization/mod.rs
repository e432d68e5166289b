//! Bounded, derivative-free optimization.
//!
//! Provides the objective trait, box bounds, the result type, and the DIRECT
//! global optimizer used to calibrate static hedges against the pricer.

use uv_core::{ensure, Real, Result};

pub mod direct;

pub use direct::Direct;

// ── Objective trait ───────────────────────────────────────────────────────────

/// A scalar objective function to be minimized.
///
/// Takes `&mut self` so that objectives can reuse internal workspace (a pricer,
/// for instance) between evaluations. Any `FnMut(&[Real]) -> Real` qualifies.
pub trait Objective {
    /// Evaluate the objective at `x`.
    fn value(&mut self, x: &[Real]) -> Real;
}

impl<F> Objective for F
where
    F: FnMut(&[Real]) -> Real,
{
    fn value(&mut self, x: &[Real]) -> Real {
        self(x)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Box constraint: each parameter `x[i]` must lie within `[lower[i], upper[i]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxBounds {
    lower: Vec<Real>,
    upper: Vec<Real>,
}

impl BoxBounds {
    /// Create box bounds from per-dimension limits.
    ///
    /// # Errors
    /// Returns an error if the limits have different lengths, are empty, or
    /// some `lower[i] >= upper[i]`.
    pub fn new(lower: Vec<Real>, upper: Vec<Real>) -> Result<Self> {
        ensure!(!lower.is_empty(), "bounds must have at least one dimension");
        ensure!(
            lower.len() == upper.len(),
            "lower and upper bounds must have the same length"
        );
        for (i, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            ensure!(
                lo.is_finite() && hi.is_finite() && lo < hi,
                "invalid bounds for dimension {i}: [{lo}, {hi}]"
            );
        }
        Ok(Self { lower, upper })
    }

    /// The same interval `[lo, hi]` in each of `dimension` dimensions.
    pub fn uniform(dimension: usize, lo: Real, hi: Real) -> Result<Self> {
        Self::new(vec![lo; dimension], vec![hi; dimension])
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Return `true` if `x` satisfies the constraint.
    pub fn test(&self, x: &[Real]) -> bool {
        x.len() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    /// Map a point of the unit hypercube onto the box.
    pub(crate) fn from_unit(&self, u: &[Real], out: &mut [Real]) {
        for (i, x) in out.iter_mut().enumerate() {
            *x = self.lower[i] + u[i] * (self.upper[i] - self.lower[i]);
        }
    }
}

// ── Result ────────────────────────────────────────────────────────────────────

/// The reason an optimization terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The evaluation budget was exhausted.
    MaxEvaluations,
    /// The search was stopped by the iteration limit.
    MaxIterations,
}

/// Result of an optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Best parameter values found.
    pub x: Vec<Real>,
    /// Objective value at `x`.
    pub value: Real,
    /// Number of objective evaluations performed.
    pub evaluations: usize,
    /// Reason for termination.
    pub termination: Termination,
}
