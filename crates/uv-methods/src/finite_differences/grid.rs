//! Price ladder and value workspace.

use uv_core::{ensure, Real, Result, Size};

// ─── Price grid ───────────────────────────────────────────────────────────────

/// Uniform price ladder with `N + 1` nodes `0, Δp, …, N·Δp = maxPrice`.
///
/// Immutable after construction. The top node is set to `maxPrice` exactly so
/// that a spot equal to `maxPrice` lands on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGrid {
    prices: Vec<Real>,
    step: Real,
}

impl PriceGrid {
    /// Build a ladder of `num_steps` cells over `[0, max_price]`.
    ///
    /// # Errors
    /// Returns an error if `num_steps < 3` (the upper boundary extrapolates
    /// from the two nodes below it) or `max_price` is not finite and positive.
    pub fn new(max_price: Real, num_steps: Size) -> Result<Self> {
        ensure!(
            num_steps >= 3,
            "number of price steps must be at least 3, got {num_steps}"
        );
        ensure!(
            max_price.is_finite() && max_price > 0.0,
            "maximum price must be finite and positive, got {max_price}"
        );
        let step = max_price / num_steps as Real;
        let mut prices: Vec<Real> = (0..=num_steps).map(|i| i as Real * step).collect();
        prices[num_steps] = max_price;
        Ok(Self { prices, step })
    }

    /// Node prices, increasing from 0 to `maxPrice`.
    #[inline]
    pub fn prices(&self) -> &[Real] {
        &self.prices
    }

    /// Node spacing `Δp`.
    #[inline]
    pub fn step(&self) -> Real {
        self.step
    }

    /// Number of cells `N` (one less than the number of nodes).
    #[inline]
    pub fn num_steps(&self) -> Size {
        self.prices.len() - 1
    }

    /// Number of nodes `N + 1`.
    #[inline]
    pub fn len(&self) -> Size {
        self.prices.len()
    }

    /// Always `false`; a grid has at least four nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Top of the ladder.
    #[inline]
    pub fn max_price(&self) -> Real {
        self.prices[self.prices.len() - 1]
    }

    /// The cell `[node − Δp/2, node + Δp/2)` around every node, in order.
    pub fn cells(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        let half = 0.5 * self.step;
        self.prices.iter().map(move |&p| (p - half, p + half))
    }
}

// ─── Value buffers ────────────────────────────────────────────────────────────

/// Two value arrays, one per side of a sub-step.
///
/// `current` holds the portfolio value at the present simulation time; a
/// kernel reads it and writes `next`, then [`swap`](Self::swap) makes the
/// result current. Allocated once and reused for every valuation.
#[derive(Debug, Clone)]
pub struct ValueBuffers {
    current: Vec<Real>,
    next: Vec<Real>,
}

impl ValueBuffers {
    /// Zeroed buffers with `len` nodes each.
    pub fn new(len: Size) -> Self {
        Self {
            current: vec![0.0; len],
            next: vec![0.0; len],
        }
    }

    /// Zero both buffers.
    pub fn reset(&mut self) {
        self.current.fill(0.0);
        self.next.fill(0.0);
    }

    /// Values at the present simulation time.
    #[inline]
    pub fn current(&self) -> &[Real] {
        &self.current
    }

    /// Mutable access to the present values (payoff injection).
    #[inline]
    pub fn current_mut(&mut self) -> &mut [Real] {
        &mut self.current
    }

    /// Read-only current values alongside the writable next buffer.
    #[inline]
    pub fn split(&mut self) -> (&[Real], &mut [Real]) {
        (&self.current, &mut self.next)
    }

    /// Make the freshly written buffer current.
    #[inline]
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}
