//! Explicit sub-step kernels.
//!
//! One sub-step maps the values `V` at time `t` to `V'` at `t − Δt`:
//!
//! ```text
//! delta = (V[i+1] − V[i−1]) / 2Δp
//! γ     = (V[i+1] − 2V[i] + V[i−1]) / Δp²
//! theta = r·V[i] − ½·select(γ·minVol², γ·maxVol²)·S[i]² − r·S[i]·delta
//! V'[i] = V[i] − Δt·theta
//! ```
//!
//! with `V'[0] = (1 − rΔt)·V[0]` and `V'[N] = 2V'[N−1] − V'[N−2]`.
//!
//! Both kernels call the same [`node_update`], so their outputs agree bit for
//! bit; the lane kernel only changes how the interior is traversed.

use std::fmt;
use std::str::FromStr;

use uv_core::{errors::Error, Real};

use super::selector::VolatilitySelector;

/// Width of the blocks processed by [`KernelKind::Lanes`].
pub const LANES: usize = 4;

/// Selects the sub-step kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KernelKind {
    /// Node-by-node reference loop.
    #[default]
    Scalar,
    /// Fixed-width blocks of [`LANES`] nodes the compiler can vectorize.
    Lanes,
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelKind::Scalar => write!(f, "scalar"),
            KernelKind::Lanes => write!(f, "lanes"),
        }
    }
}

impl FromStr for KernelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scalar" => Ok(KernelKind::Scalar),
            "lanes" => Ok(KernelKind::Lanes),
            _ => Err(Error::UnknownTag {
                kind: "kernel",
                tag: s.to_string(),
            }),
        }
    }
}

/// Per-interval constants shared by every node of a sub-step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StepCoefficients {
    rate: Real,
    dt: Real,
    inv_two_dp: Real,
    inv_dp_sq: Real,
    min_var: Real,
    max_var: Real,
}

impl StepCoefficients {
    pub(crate) fn new(rate: Real, dt: Real, dp: Real, min_var: Real, max_var: Real) -> Self {
        Self {
            rate,
            dt,
            inv_two_dp: 1.0 / (2.0 * dp),
            inv_dp_sq: 1.0 / (dp * dp),
            min_var,
            max_var,
        }
    }
}

/// New value of one interior node.
#[inline(always)]
fn node_update<S: VolatilitySelector>(
    c: &StepCoefficients,
    down: Real,
    at: Real,
    up: Real,
    price: Real,
) -> Real {
    let delta = (up - down) * c.inv_two_dp;
    let gamma = (up - 2.0 * at + down) * c.inv_dp_sq;
    let vg = S::select(gamma * c.min_var, gamma * c.max_var);
    let theta = c.rate * at - 0.5 * vg * price * price - c.rate * price * delta;
    at - c.dt * theta
}

#[inline]
fn apply_boundaries(c: &StepCoefficients, current: &[Real], next: &mut [Real]) {
    let last = next.len() - 1;
    next[0] = (1.0 - c.rate * c.dt) * current[0];
    next[last] = 2.0 * next[last - 1] - next[last - 2];
}

fn step_scalar<S: VolatilitySelector>(
    c: &StepCoefficients,
    prices: &[Real],
    current: &[Real],
    next: &mut [Real],
) {
    let last = current.len() - 1;
    for i in 1..last {
        next[i] = node_update::<S>(c, current[i - 1], current[i], current[i + 1], prices[i]);
    }
    apply_boundaries(c, current, next);
}

fn step_lanes<S: VolatilitySelector>(
    c: &StepCoefficients,
    prices: &[Real],
    current: &[Real],
    next: &mut [Real],
) {
    let last = current.len() - 1;
    let mut blocks = next[1..last].chunks_exact_mut(LANES);
    let mut i = 1;
    for out in &mut blocks {
        let down = &current[i - 1..i - 1 + LANES];
        let at = &current[i..i + LANES];
        let up = &current[i + 1..i + 1 + LANES];
        let s = &prices[i..i + LANES];
        for lane in 0..LANES {
            out[lane] = node_update::<S>(c, down[lane], at[lane], up[lane], s[lane]);
        }
        i += LANES;
    }
    for (j, out) in blocks.into_remainder().iter_mut().enumerate() {
        let k = i + j;
        *out = node_update::<S>(c, current[k - 1], current[k], current[k + 1], prices[k]);
    }
    apply_boundaries(c, current, next);
}

/// Advance `current` by one sub-step into `next`.
///
/// All slices have the grid's node count (at least 4).
#[inline]
pub(crate) fn step<S: VolatilitySelector>(
    kind: KernelKind,
    c: &StepCoefficients,
    prices: &[Real],
    current: &[Real],
    next: &mut [Real],
) {
    debug_assert_eq!(current.len(), next.len());
    debug_assert_eq!(current.len(), prices.len());
    match kind {
        KernelKind::Scalar => step_scalar::<S>(c, prices, current, next),
        KernelKind::Lanes => step_lanes::<S>(c, prices, current, next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finite_differences::selector::{BestCase, WorstCase};
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn ladder(n: usize, dp: Real) -> Vec<Real> {
        (0..n).map(|i| i as Real * dp).collect()
    }

    #[test]
    fn linear_profile_only_discounts_its_intercept() {
        // γ = 0 and r·S·delta cancels the slope part of r·V
        let prices = ladder(9, 1.0);
        let current: Vec<Real> = prices.iter().map(|s| 3.0 + 0.5 * s).collect();
        let mut next = vec![0.0; 9];
        let c = StepCoefficients::new(0.05, 0.01, 1.0, 0.01, 0.09);
        step::<WorstCase>(KernelKind::Scalar, &c, &prices, &current, &mut next);
        for (i, s) in prices.iter().enumerate().skip(1) {
            assert_abs_diff_eq!(next[i], 3.0 * (1.0 - 0.05 * 0.01) + 0.5 * s, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(next[0], 3.0 * (1.0 - 0.05 * 0.01), epsilon = 1e-15);
    }

    #[test]
    fn upper_boundary_extrapolates_linearly() {
        let prices = ladder(6, 2.0);
        let current = [0.0, 0.0, 1.0, 4.0, 9.0, 16.0];
        let mut next = [0.0; 6];
        let c = StepCoefficients::new(0.0, 0.001, 2.0, 0.04, 0.04);
        step::<BestCase>(KernelKind::Lanes, &c, &prices, &current, &mut next);
        assert_eq!(next[5], 2.0 * next[4] - next[3]);
    }

    #[test]
    fn kernel_tags() {
        assert_eq!("lanes".parse::<KernelKind>(), Ok(KernelKind::Lanes));
        assert_eq!(KernelKind::default(), KernelKind::Scalar);
        assert_eq!(KernelKind::Lanes.to_string(), "lanes");
        assert!("simd".parse::<KernelKind>().is_err());
    }

    proptest! {
        #[test]
        fn lane_kernel_matches_scalar_kernel_exactly(
            values in prop::collection::vec(-10.0_f64..10.0, 4..40),
            bid in any::<bool>(),
        ) {
            let n = values.len();
            let prices = ladder(n, 0.7);
            let c = StepCoefficients::new(0.03, 1e-4, 0.7, 0.0225, 0.16);
            let mut scalar = vec![0.0; n];
            let mut lanes = vec![0.0; n];
            if bid {
                step::<WorstCase>(KernelKind::Scalar, &c, &prices, &values, &mut scalar);
                step::<WorstCase>(KernelKind::Lanes, &c, &prices, &values, &mut lanes);
            } else {
                step::<BestCase>(KernelKind::Scalar, &c, &prices, &values, &mut scalar);
                step::<BestCase>(KernelKind::Lanes, &c, &prices, &values, &mut lanes);
            }
            prop_assert_eq!(scalar, lanes);
        }
    }
}
