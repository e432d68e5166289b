//! Interpolation over values sampled on a uniform, increasing ladder.

use uv_core::{ensure, errors::Error, Real, Result};

use super::{lagrange_cubic, linear_blend, Interpolation, Interpolation1D};

/// Reads values off a uniformly spaced grid without copying it.
///
/// The lookup finds the first node strictly above `x`, then blends the
/// bracketing pair linearly. In cubic mode, when two nodes exist on each side,
/// it evaluates the 4-point cubic through them instead.
#[derive(Debug, Clone, Copy)]
pub struct UniformGridInterpolation<'a> {
    xs: &'a [Real],
    ys: &'a [Real],
    dx: Real,
    method: Interpolation,
}

impl<'a> UniformGridInterpolation<'a> {
    /// Wrap a ladder `xs` (uniform spacing, increasing) and its values `ys`.
    ///
    /// # Errors
    /// Returns an error if the slices have different lengths, fewer than 2
    /// points, or non-increasing nodes.
    pub fn new(xs: &'a [Real], ys: &'a [Real], method: Interpolation) -> Result<Self> {
        ensure!(xs.len() >= 2, "need at least 2 points for interpolation");
        ensure!(
            xs.len() == ys.len(),
            "xs and ys must have the same length ({} vs {})",
            xs.len(),
            ys.len()
        );
        let dx = xs[1] - xs[0];
        ensure!(dx > 0.0, "grid nodes must be increasing");
        Ok(Self { xs, ys, dx, method })
    }

    /// The interpolation mode in use.
    pub fn method(&self) -> Interpolation {
        self.method
    }
}

impl Interpolation1D for UniformGridInterpolation<'_> {
    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }

    fn value(&self, x: Real) -> Result<Real> {
        // NaN fails the range test as well
        if !self.is_in_range(x) {
            return Err(Error::SpotOutOfRange {
                spot: x,
                max_price: self.x_max(),
            });
        }

        let n = self.xs.len();
        let idx = self.xs.partition_point(|&p| p <= x);
        if idx == 0 {
            return Ok(self.ys[0]);
        }
        if idx == n {
            // x sits exactly on the top node
            return Ok(self.ys[n - 1]);
        }

        let k = (self.xs[idx] - x) / self.dx;
        if self.method == Interpolation::Cubic && idx > 1 && idx + 1 < n {
            Ok(lagrange_cubic(
                self.ys[idx - 2],
                self.ys[idx - 1],
                self.ys[idx],
                self.ys[idx + 1],
                1.0 - k,
            ))
        } else {
            Ok(linear_blend(self.ys[idx - 1], self.ys[idx], k))
        }
    }
}
