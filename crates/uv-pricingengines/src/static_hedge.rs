//! Static hedging of a digital with two vanillas.
//!
//! A digital's worst-case (bid) value under uncertain volatility is poor on
//! its own: the payoff's curvature flips sign at the strike. Holding vanilla
//! options against it, bought or sold at their market prices, can raise the
//! bid of the package. The calibration searches hedge quantities
//! `x ∈ [lower, upper]²` for the largest
//!
//! ```text
//! Valuate(Bid){target, hedge₀·x₀, hedge₁·x₁} − (price₀·x₀ + price₁·x₁)
//! ```
//!
//! with the DIRECT global search. Each evaluation prices a freshly built
//! portfolio, so contracts are never mutated in place.

use tracing::{debug, info};
use uv_core::{ensure, fail, Error, Real, Result, Size, Volatility};
use uv_instruments::OptionContract;
use uv_math::optimization::BoxBounds;
use uv_math::Direct;
use uv_methods::{PricerConfig, Side, UncertainVolPricer};

use crate::black_scholes::closed_form_price;

/// Search settings for [`StaticHedge::calibrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgeCalibrationOptions {
    /// Objective evaluation budget.
    pub max_evaluations: Size,
    /// Lower bound of each hedge quantity.
    pub lower: Real,
    /// Upper bound of each hedge quantity.
    pub upper: Real,
}

impl Default for HedgeCalibrationOptions {
    fn default() -> Self {
        Self {
            max_evaluations: 1000,
            lower: -1.0,
            upper: 1.0,
        }
    }
}

/// Outcome of a hedge calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgeCalibration {
    /// Best quantities found for the two hedges.
    pub quantities: [Real; 2],
    /// Bid of the hedged package net of the hedge cost.
    pub hedged_bid: Real,
    /// Market cost of the hedges at `quantities`.
    pub hedge_cost: Real,
    /// Objective evaluations spent.
    pub evaluations: Size,
}

/// A target contract and two hedge instruments with fixed market prices.
#[derive(Debug, Clone)]
pub struct StaticHedge {
    config: PricerConfig,
    spot: Real,
    target: OptionContract,
    hedges: [OptionContract; 2],
    hedge_prices: [Real; 2],
}

impl StaticHedge {
    /// Set up a hedge problem.
    ///
    /// The hedges' own multipliers are ignored: each is held in the quantity
    /// under search, and `hedge_prices` are per unit.
    ///
    /// # Errors
    /// Returns an error if `config` is invalid, `spot` lies outside the
    /// price ladder, or a hedge price is not finite.
    pub fn new(
        config: PricerConfig,
        spot: Real,
        target: OptionContract,
        hedges: [OptionContract; 2],
        hedge_prices: [Real; 2],
    ) -> Result<Self> {
        config.validate()?;
        if !(0.0..=config.max_price).contains(&spot) {
            return Err(Error::SpotOutOfRange {
                spot,
                max_price: config.max_price,
            });
        }
        ensure!(
            hedge_prices.iter().all(|p| p.is_finite()),
            "hedge prices must be finite, got {hedge_prices:?}"
        );
        Ok(Self {
            config,
            spot,
            target,
            hedges,
            hedge_prices,
        })
    }

    /// Set up a hedge problem whose hedges are priced by Black-Scholes at a
    /// single implied volatility and the pricer's rate.
    ///
    /// # Errors
    /// As [`StaticHedge::new`].
    pub fn at_implied_vol(
        config: PricerConfig,
        spot: Real,
        target: OptionContract,
        hedges: [OptionContract; 2],
        implied_vol: Volatility,
    ) -> Result<Self> {
        let mut prices = [0.0; 2];
        for (price, hedge) in prices.iter_mut().zip(&hedges) {
            let unit = hedge.with_multiplier(1.0)?;
            *price = closed_form_price(&unit, implied_vol, config.risk_free_rate, spot);
        }
        Self::new(config, spot, target, hedges, prices)
    }

    /// Per-unit market prices of the two hedges.
    pub fn hedge_prices(&self) -> [Real; 2] {
        self.hedge_prices
    }

    /// Market cost of holding `quantities` of the hedges.
    pub fn hedge_cost(&self, quantities: [Real; 2]) -> Real {
        self.hedge_prices[0] * quantities[0] + self.hedge_prices[1] * quantities[1]
    }

    /// Value of the hedged package on `side`, net of the hedge cost.
    ///
    /// # Errors
    /// Returns an error if a quantity is not finite.
    pub fn hedged_value(&self, quantities: [Real; 2], side: Side) -> Result<Real> {
        let mut pricer = UncertainVolPricer::new(self.config)?;
        pricer.add_contract(self.target);
        for (hedge, &quantity) in self.hedges.iter().zip(&quantities) {
            pricer.add_contract(hedge.with_multiplier(quantity)?);
        }
        Ok(pricer.valuate(self.spot, side)? - self.hedge_cost(quantities))
    }

    /// Search for the hedge quantities that maximize the hedged bid.
    ///
    /// # Errors
    /// Returns an error if the options are invalid or an evaluation fails.
    pub fn calibrate(&self, options: &HedgeCalibrationOptions) -> Result<HedgeCalibration> {
        ensure!(
            options.max_evaluations >= 1,
            "evaluation budget must be positive"
        );
        let bounds = BoxBounds::uniform(2, options.lower, options.upper)?;

        let mut failure = None;
        let mut objective = |x: &[Real]| match self.hedged_value([x[0], x[1]], Side::Bid) {
            Ok(value) => -value,
            Err(e) => {
                failure.get_or_insert(e);
                Real::INFINITY
            }
        };
        let result = Direct::new(options.max_evaluations).minimize(&mut objective, &bounds)?;
        if let Some(e) = failure {
            return Err(e);
        }
        if !result.value.is_finite() {
            fail!("hedge search found no finite objective value");
        }
        debug!(termination = ?result.termination, "hedge search stopped");

        let quantities = [result.x[0], result.x[1]];
        let calibration = HedgeCalibration {
            quantities,
            hedged_bid: -result.value,
            hedge_cost: self.hedge_cost(quantities),
            evaluations: result.evaluations,
        };
        info!(
            contract = %self.target,
            x0 = quantities[0],
            x1 = quantities[1],
            hedged_bid = calibration.hedged_bid,
            hedge_cost = calibration.hedge_cost,
            evaluations = calibration.evaluations,
            "static hedge calibrated"
        );
        Ok(calibration)
    }
}
