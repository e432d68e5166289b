//! Pricer configuration.

use uv_core::{ensure, Rate, Real, Result, Size, Time, Volatility};
use uv_math::Interpolation;

use super::kernel::KernelKind;

/// Fraction of the explicit-scheme stability limit used for the target time
/// step: `targetΔt = STABILITY_SAFETY_FACTOR / (N² · maxVol²)`.
pub const STABILITY_SAFETY_FACTOR: Real = 0.9;

/// Volatility band, rate and grid of an [`UncertainVolPricer`](super::UncertainVolPricer).
///
/// # Example
/// ```
/// use uv_methods::{KernelKind, PricerConfig};
/// use uv_math::Interpolation;
///
/// let config = PricerConfig::new(0.10, 0.30, 0.05, 200.0, 201)
///     .with_interpolation(Interpolation::Cubic)
///     .with_kernel(KernelKind::Lanes);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricerConfig {
    /// Lower volatility bound.
    pub min_vol: Volatility,
    /// Upper volatility bound.
    pub max_vol: Volatility,
    /// Continuously compounded risk-free rate.
    pub risk_free_rate: Rate,
    /// Top of the price ladder.
    pub max_price: Real,
    /// Number of price cells `N`; the ladder has `N + 1` nodes.
    pub num_price_steps: Size,
    /// How the spot value is read off the finished grid.
    #[cfg_attr(feature = "serde", serde(default))]
    pub interpolation: Interpolation,
    /// Sub-step kernel.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kernel: KernelKind,
}

impl PricerConfig {
    /// Configuration with linear interpolation and the scalar kernel.
    pub fn new(
        min_vol: Volatility,
        max_vol: Volatility,
        risk_free_rate: Rate,
        max_price: Real,
        num_price_steps: Size,
    ) -> Self {
        Self {
            min_vol,
            max_vol,
            risk_free_rate,
            max_price,
            num_price_steps,
            interpolation: Interpolation::default(),
            kernel: KernelKind::default(),
        }
    }

    /// Use `interpolation` to read the spot value.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Use `kernel` for the sub-steps.
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Precondition`](uv_core::Error::Precondition) if
    /// `min_vol < 0`, `max_vol < min_vol`, `max_vol == 0`, the rate is not
    /// finite, `max_price <= 0` or `num_price_steps < 3`.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.min_vol.is_finite() && self.min_vol >= 0.0,
            "minimum volatility must be finite and non-negative, got {}",
            self.min_vol
        );
        ensure!(
            self.max_vol.is_finite() && self.max_vol >= self.min_vol,
            "maximum volatility ({}) must be finite and not below the minimum ({})",
            self.max_vol,
            self.min_vol
        );
        ensure!(self.max_vol > 0.0, "maximum volatility must be positive");
        ensure!(
            self.risk_free_rate.is_finite(),
            "risk-free rate must be finite, got {}",
            self.risk_free_rate
        );
        ensure!(
            self.max_price.is_finite() && self.max_price > 0.0,
            "maximum price must be finite and positive, got {}",
            self.max_price
        );
        ensure!(
            self.num_price_steps >= 3,
            "number of price steps must be at least 3, got {}",
            self.num_price_steps
        );
        Ok(())
    }

    /// Target sub-step length, derived from `maxVol` for both sides.
    pub fn target_time_step(&self) -> Time {
        let n = self.num_price_steps as Real;
        STABILITY_SAFETY_FACTOR / (n * n * self.max_vol * self.max_vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uv_core::Error;

    #[test]
    fn defaults_and_builders() {
        let config = PricerConfig::new(0.1, 0.3, 0.05, 200.0, 201);
        assert_eq!(config.interpolation, Interpolation::Linear);
        assert_eq!(config.kernel, KernelKind::Scalar);
        let config = config.with_interpolation(Interpolation::Cubic);
        assert_eq!(config.interpolation, Interpolation::Cubic);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn target_time_step_uses_max_vol() {
        let config = PricerConfig::new(0.1, 0.3, 0.05, 200.0, 100);
        assert_relative_eq!(config.target_time_step(), 0.9 / (10_000.0 * 0.09), max_relative = 1e-14);
    }

    #[test]
    fn invalid_configurations_are_rejected() {
        let ok = PricerConfig::new(0.1, 0.3, 0.05, 200.0, 201);
        let bad = [
            PricerConfig { max_vol: 0.05, ..ok },
            PricerConfig { min_vol: -0.1, ..ok },
            PricerConfig { min_vol: 0.0, max_vol: 0.0, ..ok },
            PricerConfig { num_price_steps: 2, ..ok },
            PricerConfig { max_price: 0.0, ..ok },
            PricerConfig { risk_free_rate: Real::NAN, ..ok },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(Error::Precondition(_))),
                "{config:?}"
            );
        }
        assert!(PricerConfig { min_vol: 0.2, max_vol: 0.2, ..ok }.validate().is_ok());
        assert!(PricerConfig { risk_free_rate: -0.01, ..ok }.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_defaults() {
        let json = r#"{"min_vol":0.1,"max_vol":0.3,"risk_free_rate":0.05,"max_price":200.0,"num_price_steps":201}"#;
        let config: PricerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config, PricerConfig::new(0.1, 0.3, 0.05, 200.0, 201));
        let json = r#"{"min_vol":0.1,"max_vol":0.3,"risk_free_rate":0.05,"max_price":200.0,"num_price_steps":201,"interpolation":"cubic","kernel":"lanes"}"#;
        let config: PricerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.interpolation, Interpolation::Cubic);
        assert_eq!(config.kernel, KernelKind::Lanes);
    }
}
