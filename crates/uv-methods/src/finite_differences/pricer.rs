//! Uncertain-volatility marching engine.
//!
//! A valuation zeroes the workspace, walks the contracts from the furthest
//! expiry down, injects each contract's cell-averaged payoff and marches the
//! grid back to the next expiry (or to time zero after the last one). The
//! value at the spot is then read off the grid.
//!
//! Expiries closer together than one target time step are treated as
//! simultaneous: their payoffs are injected into the same grid state.

use tracing::{debug, trace};
use uv_core::{errors::Error, Real, Result, Size, Time};
use uv_instruments::{ContractKind, OptionContract};
use uv_math::{Interpolation1D, UniformGridInterpolation};

use super::config::PricerConfig;
use super::grid::{PriceGrid, ValueBuffers};
use super::kernel::{self, StepCoefficients};
use super::selector::{BestCase, Side, VolatilitySelector, WorstCase};

// ─── Valuation output ─────────────────────────────────────────────────────────

/// How much of the marching state a valuation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Detail {
    /// Only the value at the spot.
    #[default]
    Value,
    /// Also the final value at every node.
    Grid,
    /// Also the value at every node at the start of every sub-step.
    Trajectory,
}

impl Detail {
    /// Map a numeric level to a detail: `0` (or below) is
    /// [`Value`](Detail::Value), `1` is [`Grid`](Detail::Grid), `2` and above
    /// is [`Trajectory`](Detail::Trajectory).
    pub fn from_level(level: i32) -> Self {
        match level {
            i32::MIN..=0 => Detail::Value,
            1 => Detail::Grid,
            _ => Detail::Trajectory,
        }
    }
}

/// Result of [`UncertainVolPricer::valuate_with_detail`].
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    /// Portfolio value at the spot.
    pub value: Real,
    /// Time-zero value at every node of [`UncertainVolPricer::prices`].
    pub grid: Option<Vec<Real>>,
    /// Node values at the start of every sub-step, in marching order.
    pub trajectory: Option<Vec<Vec<Real>>>,
}

// ─── Contract set ─────────────────────────────────────────────────────────────

/// Append-only contract list, sorted by descending expiry on demand.
#[derive(Debug, Clone, Default)]
struct ContractSet {
    contracts: Vec<OptionContract>,
    sorted: bool,
}

impl ContractSet {
    fn push(&mut self, contract: OptionContract) {
        self.contracts.push(contract);
        self.sorted = false;
    }

    /// Stable, so contracts sharing an expiry keep their relative order.
    fn sort_by_expiry_desc(&mut self) {
        if !self.sorted {
            self.contracts
                .sort_by(|a, b| b.expiry().total_cmp(&a.expiry()));
            self.sorted = true;
        }
    }
}

// ─── Pricer ───────────────────────────────────────────────────────────────────

/// Explicit finite-difference pricer for the uncertain volatility model.
///
/// The grid, the time step and the value buffers are fixed at construction
/// and reused by every valuation. Valuations take `&mut self`; an instance
/// serves one caller at a time, and separate instances share nothing.
///
/// # Note
/// The top node is extrapolated linearly from its two neighbours rather than
/// solved. For portfolios with strikes close to `max_price` this can push the
/// bid above the ask at spots near the top of the ladder. Keep `max_price`
/// well above every strike and the spots of interest.
///
/// # Example
/// ```
/// use uv_instruments::OptionContract;
/// use uv_methods::{PricerConfig, Side, UncertainVolPricer};
///
/// let config = PricerConfig::new(0.10, 0.30, 0.05, 200.0, 60);
/// let mut pricer = UncertainVolPricer::new(config).unwrap();
/// pricer.add_contract(OptionContract::binary_call(0.25, 100.0).unwrap());
///
/// let bid = pricer.valuate(100.0, Side::Bid).unwrap();
/// let ask = pricer.valuate(100.0, Side::Ask).unwrap();
/// assert!(0.0 <= bid && bid <= ask && ask <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct UncertainVolPricer {
    config: PricerConfig,
    grid: PriceGrid,
    buffers: ValueBuffers,
    contracts: ContractSet,
    target_dt: Time,
    min_var: Real,
    max_var: Real,
}

impl UncertainVolPricer {
    /// Validate `config` and allocate the grid and workspace.
    ///
    /// # Errors
    /// Returns an error if [`PricerConfig::validate`] fails.
    pub fn new(config: PricerConfig) -> Result<Self> {
        config.validate()?;
        let grid = PriceGrid::new(config.max_price, config.num_price_steps)?;
        let buffers = ValueBuffers::new(grid.len());
        Ok(Self {
            target_dt: config.target_time_step(),
            min_var: config.min_vol * config.min_vol,
            max_var: config.max_vol * config.max_vol,
            config,
            grid,
            buffers,
            contracts: ContractSet::default(),
        })
    }

    /// Add a contract to the portfolio.
    pub fn add_contract(&mut self, contract: OptionContract) {
        self.contracts.push(contract);
    }

    /// Build and add a contract.
    ///
    /// # Errors
    /// Returns an error if [`OptionContract::new`] rejects the fields.
    pub fn add(
        &mut self,
        kind: ContractKind,
        expiry: Time,
        strike: Real,
        multiplier: Real,
    ) -> Result<()> {
        self.add_contract(OptionContract::new(kind, expiry, strike, multiplier)?);
        Ok(())
    }

    /// The portfolio. After a valuation the contracts are listed by
    /// descending expiry.
    pub fn contracts(&self) -> &[OptionContract] {
        &self.contracts.contracts
    }

    /// The configuration this pricer was built with.
    pub fn config(&self) -> &PricerConfig {
        &self.config
    }

    /// Node prices of the grid.
    pub fn prices(&self) -> &[Real] {
        self.grid.prices()
    }

    /// Target sub-step length.
    pub fn target_time_step(&self) -> Time {
        self.target_dt
    }

    /// Bid or ask value of the portfolio at `spot`.
    ///
    /// # Errors
    /// Returns [`Error::SpotOutOfRange`] if `spot` is NaN or outside
    /// `[0, maxPrice]`.
    pub fn valuate(&mut self, spot: Real, side: Side) -> Result<Real> {
        self.valuate_with_detail(spot, side, Detail::Value)
            .map(|valuation| valuation.value)
    }

    /// Bid or ask value at `spot`, with the grid or the full trajectory when
    /// requested. The detail never changes the value.
    ///
    /// # Errors
    /// Returns [`Error::SpotOutOfRange`] if `spot` is NaN or outside
    /// `[0, maxPrice]`.
    pub fn valuate_with_detail(
        &mut self,
        spot: Real,
        side: Side,
        detail: Detail,
    ) -> Result<Valuation> {
        let max_price = self.grid.max_price();
        if !(0.0..=max_price).contains(&spot) {
            return Err(Error::SpotOutOfRange { spot, max_price });
        }

        self.contracts.sort_by_expiry_desc();
        debug!(
            %side,
            spot,
            contracts = self.contracts.contracts.len(),
            kernel = %self.config.kernel,
            "uncertain-volatility valuation started"
        );

        let mut trajectory = (detail >= Detail::Trajectory).then(Vec::new);
        let sub_steps = match side {
            Side::Bid => self.march::<WorstCase>(trajectory.as_mut()),
            Side::Ask => self.march::<BestCase>(trajectory.as_mut()),
        };

        let values = self.buffers.current();
        let value = UniformGridInterpolation::new(self.grid.prices(), values, self.config.interpolation)?
            .value(spot)?;
        debug!(%side, value, sub_steps, "uncertain-volatility valuation finished");

        Ok(Valuation {
            value,
            grid: (detail >= Detail::Grid).then(|| values.to_vec()),
            trajectory,
        })
    }

    /// March the portfolio to time zero. Returns the number of sub-steps.
    fn march<S: VolatilitySelector>(&mut self, mut trajectory: Option<&mut Vec<Vec<Real>>>) -> Size {
        self.buffers.reset();
        let contracts = &self.contracts.contracts;
        let mut sub_steps = 0;

        for (pos, contract) in contracts.iter().enumerate() {
            let multiplier = contract.multiplier();
            for (value, (low, high)) in self.buffers.current_mut().iter_mut().zip(self.grid.cells()) {
                *value += contract.average_payoff(low, high) * multiplier;
            }

            let next_expiry = contracts.get(pos + 1).map_or(0.0, |c| c.expiry());
            let gap = contract.expiry() - next_expiry;
            if gap < self.target_dt {
                if pos + 1 < contracts.len() {
                    debug!(
                        expiry = contract.expiry(),
                        next_expiry,
                        "merging near-simultaneous expiries"
                    );
                }
                continue;
            }

            let steps = (gap / self.target_dt).ceil();
            let dt = gap / steps;
            let steps = steps as Size;
            trace!(from = contract.expiry(), to = next_expiry, steps, dt, "marching interval");

            let coefficients = StepCoefficients::new(
                self.config.risk_free_rate,
                dt,
                self.grid.step(),
                self.min_var,
                self.max_var,
            );
            for _ in 0..steps {
                if let Some(trajectory) = trajectory.as_deref_mut() {
                    trajectory.push(self.buffers.current().to_vec());
                }
                let (current, next) = self.buffers.split();
                kernel::step::<S>(self.config.kernel, &coefficients, self.grid.prices(), current, next);
                self.buffers.swap();
            }
            sub_steps += steps;
        }
        sub_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finite_differences::KernelKind;
    use approx::assert_abs_diff_eq;
    use uv_math::Interpolation;

    fn binary_pricer(kernel: KernelKind) -> UncertainVolPricer {
        let config = PricerConfig::new(0.1, 0.3, 0.05, 200.0, 41).with_kernel(kernel);
        let mut pricer = UncertainVolPricer::new(config).unwrap();
        pricer.add(ContractKind::BinaryCall, 0.5, 100.0, 1.0).unwrap();
        pricer.add(ContractKind::Call, 0.5, 90.0, -0.1).unwrap();
        pricer.add(ContractKind::Call, 0.25, 100.0, 0.1).unwrap();
        pricer
    }

    #[test]
    fn detail_levels() {
        assert_eq!(Detail::from_level(-3), Detail::Value);
        assert_eq!(Detail::from_level(0), Detail::Value);
        assert_eq!(Detail::from_level(1), Detail::Grid);
        assert_eq!(Detail::from_level(7), Detail::Trajectory);
    }

    #[test]
    fn construction_validates_the_configuration() {
        assert!(UncertainVolPricer::new(PricerConfig::new(0.3, 0.1, 0.05, 200.0, 50)).is_err());
        assert!(UncertainVolPricer::new(PricerConfig::new(0.1, 0.3, 0.05, 200.0, 2)).is_err());
        let pricer = UncertainVolPricer::new(PricerConfig::new(0.1, 0.3, 0.05, 200.0, 50)).unwrap();
        assert_eq!(pricer.prices().len(), 51);
        assert_eq!(pricer.target_time_step(), pricer.config().target_time_step());
    }

    #[test]
    fn empty_portfolio_is_worth_nothing() {
        let mut pricer = UncertainVolPricer::new(PricerConfig::new(0.1, 0.3, 0.05, 200.0, 20)).unwrap();
        assert_eq!(pricer.valuate(100.0, Side::Bid).unwrap(), 0.0);
        assert_eq!(pricer.valuate(100.0, Side::Ask).unwrap(), 0.0);
    }

    #[test]
    fn spot_outside_the_ladder_is_rejected() {
        let mut pricer = binary_pricer(KernelKind::Scalar);
        for spot in [-1.0, 200.5, Real::NAN] {
            assert!(matches!(
                pricer.valuate(spot, Side::Bid),
                Err(Error::SpotOutOfRange { .. })
            ));
        }
        assert!(pricer.valuate(200.0, Side::Ask).is_ok());
    }

    #[test]
    fn spot_on_a_node_reads_the_node_exactly() {
        let mut pricer = binary_pricer(KernelKind::Scalar);
        let valuation = pricer.valuate_with_detail(0.0, Side::Bid, Detail::Grid).unwrap();
        let grid = valuation.grid.unwrap();
        assert_eq!(valuation.value, grid[0]);
        let top = pricer.valuate(200.0, Side::Bid).unwrap();
        assert_eq!(top, grid[grid.len() - 1]);
    }

    #[test]
    fn zero_expiry_returns_the_injected_payoff() {
        let mut pricer = UncertainVolPricer::new(PricerConfig::new(0.1, 0.3, 0.05, 200.0, 200)).unwrap();
        pricer.add(ContractKind::Call, 0.0, 100.0, 2.0).unwrap();
        let valuation = pricer.valuate_with_detail(100.0, Side::Ask, Detail::Trajectory).unwrap();
        // cell [99.5, 100.5): 0.5² / 2 on average, times the multiplier
        assert_abs_diff_eq!(valuation.value, 0.25, epsilon = 1e-12);
        assert_eq!(valuation.trajectory, Some(Vec::new()));
    }

    #[test]
    fn bid_never_exceeds_ask() {
        let mut pricer = binary_pricer(KernelKind::Scalar);
        for spot in [20.0, 80.0, 95.0, 100.0, 104.3, 130.0] {
            let bid = pricer.valuate(spot, Side::Bid).unwrap();
            let ask = pricer.valuate(spot, Side::Ask).unwrap();
            assert!(bid <= ask, "spot {spot}: bid {bid} > ask {ask}");
        }
    }

    #[test]
    fn repeated_valuations_are_identical() {
        let mut pricer = binary_pricer(KernelKind::Scalar);
        let first = pricer.valuate(100.0, Side::Bid).unwrap();
        pricer.valuate(100.0, Side::Ask).unwrap();
        assert_eq!(pricer.valuate(100.0, Side::Bid).unwrap(), first);
    }

    #[test]
    fn kernels_agree_bit_for_bit() {
        for side in [Side::Bid, Side::Ask] {
            let scalar = binary_pricer(KernelKind::Scalar)
                .valuate_with_detail(100.0, side, Detail::Grid)
                .unwrap();
            let lanes = binary_pricer(KernelKind::Lanes)
                .valuate_with_detail(100.0, side, Detail::Grid)
                .unwrap();
            assert_eq!(scalar, lanes);
        }
    }

    #[test]
    fn detail_does_not_change_the_value() {
        let mut pricer = binary_pricer(KernelKind::Scalar);
        let plain = pricer.valuate(101.3, Side::Ask).unwrap();
        let grid = pricer.valuate_with_detail(101.3, Side::Ask, Detail::Grid).unwrap();
        let full = pricer
            .valuate_with_detail(101.3, Side::Ask, Detail::Trajectory)
            .unwrap();
        assert_eq!(grid.value, plain);
        assert_eq!(full.value, plain);
        assert!(grid.trajectory.is_none());
        assert_eq!(full.grid, grid.grid);

        let trajectory = full.trajectory.unwrap();
        let target_dt = pricer.target_time_step();
        let expected = (0.25 / target_dt).ceil() as usize * 2;
        assert_eq!(trajectory.len(), expected);
        assert!(trajectory.iter().all(|state| state.len() == pricer.prices().len()));
    }

    #[test]
    fn trajectory_starts_from_the_injected_payoffs() {
        let mut pricer = UncertainVolPricer::new(PricerConfig::new(0.2, 0.2, 0.0, 10.0, 10)).unwrap();
        pricer.add(ContractKind::BinaryPut, 1.0, 5.0, 3.0).unwrap();
        let valuation = pricer.valuate_with_detail(5.0, Side::Bid, Detail::Trajectory).unwrap();
        let first = &valuation.trajectory.unwrap()[0];
        assert_eq!(first[4], 3.0);
        assert_eq!(first[5], 1.5);
        assert_eq!(first[6], 0.0);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let contracts = [
            OptionContract::binary_call(1.0, 100.0).unwrap(),
            OptionContract::put(0.5, 90.0).unwrap().with_multiplier(-0.3).unwrap(),
            OptionContract::call(1.0, 110.0).unwrap().with_multiplier(0.2).unwrap(),
            OptionContract::call(0.75, 100.0).unwrap(),
        ];
        let config = PricerConfig::new(0.15, 0.25, 0.03, 200.0, 40);
        let mut forward = UncertainVolPricer::new(config).unwrap();
        let mut backward = UncertainVolPricer::new(config).unwrap();
        for c in contracts {
            forward.add_contract(c);
        }
        for c in contracts.into_iter().rev() {
            backward.add_contract(c);
        }
        for side in [Side::Bid, Side::Ask] {
            let a = forward.valuate(100.0, side).unwrap();
            let b = backward.valuate(100.0, side).unwrap();
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }
        let expiries: Vec<Real> = forward.contracts().iter().map(|c| c.expiry()).collect();
        assert_eq!(expiries, vec![1.0, 1.0, 0.75, 0.5]);
    }

    #[test]
    fn cubic_differs_from_linear_only_between_nodes() {
        let config = PricerConfig::new(0.2, 0.2, 0.05, 200.0, 50);
        let mut linear = UncertainVolPricer::new(config).unwrap();
        let mut cubic =
            UncertainVolPricer::new(config.with_interpolation(Interpolation::Cubic)).unwrap();
        linear.add_contract(OptionContract::call(1.0, 100.0).unwrap());
        cubic.add_contract(OptionContract::call(1.0, 100.0).unwrap());
        assert_eq!(
            linear.valuate(100.0, Side::Bid).unwrap(),
            cubic.valuate(100.0, Side::Bid).unwrap()
        );
        assert_ne!(
            linear.valuate(101.3, Side::Bid).unwrap(),
            cubic.valuate(101.3, Side::Bid).unwrap()
        );
    }
}
