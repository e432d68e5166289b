//! European option contract held in a portfolio.

use std::fmt;

use uv_core::{ensure, Real, Result, Time};

use crate::payoff::ContractKind;

/// A European contract: payoff kind, expiry, strike and signed quantity.
///
/// Contracts are immutable once built; [`OptionContract::new`] rejects
/// negative expiries, non-positive strikes and non-finite fields.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    kind: ContractKind,
    expiry: Time,
    strike: Real,
    multiplier: Real,
}

impl OptionContract {
    /// Create a contract.
    ///
    /// # Errors
    /// Returns an error if `expiry < 0`, `strike <= 0`, or any field is not
    /// finite.
    pub fn new(kind: ContractKind, expiry: Time, strike: Real, multiplier: Real) -> Result<Self> {
        ensure!(
            expiry.is_finite() && expiry >= 0.0,
            "expiry must be finite and non-negative, got {expiry}"
        );
        ensure!(
            strike.is_finite() && strike > 0.0,
            "strike must be finite and positive, got {strike}"
        );
        ensure!(
            multiplier.is_finite(),
            "multiplier must be finite, got {multiplier}"
        );
        Ok(Self {
            kind,
            expiry,
            strike,
            multiplier,
        })
    }

    /// Long one vanilla call.
    pub fn call(expiry: Time, strike: Real) -> Result<Self> {
        Self::new(ContractKind::Call, expiry, strike, 1.0)
    }

    /// Long one vanilla put.
    pub fn put(expiry: Time, strike: Real) -> Result<Self> {
        Self::new(ContractKind::Put, expiry, strike, 1.0)
    }

    /// Long one binary (cash-or-nothing) call paying 1.
    pub fn binary_call(expiry: Time, strike: Real) -> Result<Self> {
        Self::new(ContractKind::BinaryCall, expiry, strike, 1.0)
    }

    /// Long one binary (cash-or-nothing) put paying 1.
    pub fn binary_put(expiry: Time, strike: Real) -> Result<Self> {
        Self::new(ContractKind::BinaryPut, expiry, strike, 1.0)
    }

    /// The same contract held in a different quantity.
    pub fn with_multiplier(self, multiplier: Real) -> Result<Self> {
        Self::new(self.kind, self.expiry, self.strike, multiplier)
    }

    /// Payoff kind.
    pub fn kind(&self) -> ContractKind {
        self.kind
    }

    /// Time to expiry in years.
    pub fn expiry(&self) -> Time {
        self.expiry
    }

    /// Strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Signed quantity held.
    pub fn multiplier(&self) -> Real {
        self.multiplier
    }

    /// Payoff per unit at `price` (the multiplier is not applied).
    #[inline]
    pub fn payoff(&self, price: Real) -> Real {
        self.kind.payoff(price, self.strike)
    }

    /// Average payoff per unit over `[low, high)` (the multiplier is not applied).
    #[inline]
    pub fn average_payoff(&self, low: Real, high: Real) -> Real {
        self.kind.average_payoff(low, high, self.strike)
    }
}

impl fmt::Display for OptionContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x {} K={} T={}",
            self.multiplier, self.kind, self.strike, self.expiry
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uv_core::Error;

    #[test]
    fn accessors_and_payoffs() {
        let c = OptionContract::new(ContractKind::Put, 0.5, 90.0, -2.0).unwrap();
        assert_eq!(c.kind(), ContractKind::Put);
        assert_eq!(c.expiry(), 0.5);
        assert_eq!(c.strike(), 90.0);
        assert_eq!(c.multiplier(), -2.0);
        assert_eq!(c.payoff(80.0), 10.0);
        assert_eq!(c.average_payoff(70.0, 80.0), 15.0);
        assert_eq!(c.to_string(), "-2 x put K=90 T=0.5");
    }

    #[test]
    fn zero_expiry_is_allowed() {
        assert!(OptionContract::call(0.0, 100.0).is_ok());
    }

    #[test]
    fn invalid_fields_are_rejected() {
        assert!(matches!(
            OptionContract::call(-0.1, 100.0),
            Err(Error::Precondition(_))
        ));
        assert!(OptionContract::put(1.0, 0.0).is_err());
        assert!(OptionContract::binary_call(1.0, Real::NAN).is_err());
        assert!(OptionContract::binary_put(Real::INFINITY, 100.0).is_err());
        let c = OptionContract::call(1.0, 100.0).unwrap();
        assert!(c.with_multiplier(Real::NAN).is_err());
        assert_eq!(c.with_multiplier(0.25).unwrap().multiplier(), 0.25);
    }
}
