//! Closed-form Black-Scholes prices for the four contract kinds.
//!
//! No dividends; constant volatility and rate. These are the deterministic
//! volatility prices the uncertain-volatility bid and ask bracket, and the
//! market prices charged for vanilla hedges.

use uv_core::{Rate, Real, Time, Volatility};
use uv_instruments::{ContractKind, OptionContract};
use uv_math::normal_cdf;

/// Vanilla call and put prices for the same strike and expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PutCallPair {
    /// Call price.
    pub call: Real,
    /// Put price.
    pub put: Real,
}

/// `(d2, discount factor)`, with `d2 = ±∞` for a degenerate standard deviation.
fn d2_and_discount(vol: Volatility, rate: Rate, expiry: Time, spot: Real, strike: Real) -> (Real, Real) {
    let df = (-rate * expiry).exp();
    let std_dev = vol * expiry.sqrt();
    let d2 = if std_dev > 1e-15 {
        ((spot / strike).ln() + (rate - 0.5 * vol * vol) * expiry) / std_dev
    } else if spot > strike * df {
        Real::INFINITY
    } else {
        Real::NEG_INFINITY
    };
    (d2, df)
}

/// Black-Scholes call and put prices.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2), \quad P = C - S + K e^{-rT}$$
///
/// with $d_1 = \frac{\ln(S/K) + (r + \sigma^2/2)T}{\sigma\sqrt{T}}$ and
/// $d_2 = d_1 - \sigma\sqrt{T}$. At `expiry <= 0` the intrinsic values are
/// returned.
pub fn black_scholes_put_call(
    vol: Volatility,
    rate: Rate,
    expiry: Time,
    spot: Real,
    strike: Real,
) -> PutCallPair {
    if expiry <= 0.0 {
        return PutCallPair {
            call: (spot - strike).max(0.0),
            put: (strike - spot).max(0.0),
        };
    }
    let (d2, df) = d2_and_discount(vol, rate, expiry, spot, strike);
    let d1 = d2 + vol * expiry.sqrt();
    let call = spot * normal_cdf(d1) - strike * df * normal_cdf(d2);
    PutCallPair {
        call,
        put: call - spot + strike * df,
    }
}

/// Cash-or-nothing call paying 1: $e^{-rT} N(d_2)$.
pub fn binary_call_price(vol: Volatility, rate: Rate, expiry: Time, spot: Real, strike: Real) -> Real {
    if expiry <= 0.0 {
        return ContractKind::BinaryCall.payoff(spot, strike);
    }
    let (d2, df) = d2_and_discount(vol, rate, expiry, spot, strike);
    df * normal_cdf(d2)
}

/// Cash-or-nothing put paying 1: $e^{-rT} N(-d_2)$.
pub fn binary_put_price(vol: Volatility, rate: Rate, expiry: Time, spot: Real, strike: Real) -> Real {
    if expiry <= 0.0 {
        return ContractKind::BinaryPut.payoff(spot, strike);
    }
    let (d2, df) = d2_and_discount(vol, rate, expiry, spot, strike);
    df * normal_cdf(-d2)
}

/// Closed-form value of a contract, scaled by its multiplier.
pub fn closed_form_price(contract: &OptionContract, vol: Volatility, rate: Rate, spot: Real) -> Real {
    let (t, k) = (contract.expiry(), contract.strike());
    let unit = match contract.kind() {
        ContractKind::Call => black_scholes_put_call(vol, rate, t, spot, k).call,
        ContractKind::Put => black_scholes_put_call(vol, rate, t, spot, k).put,
        ContractKind::BinaryCall => binary_call_price(vol, rate, t, spot, k),
        ContractKind::BinaryPut => binary_put_price(vol, rate, t, spot, k),
    };
    unit * contract.multiplier()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn bs_call_price() {
        // S=100, K=100, r=5%, σ=20%, T=1
        let prices = black_scholes_put_call(0.20, 0.05, 1.0, 100.0, 100.0);
        assert_abs_diff_eq!(prices.call, 10.4506, epsilon = 1e-3);
        assert_abs_diff_eq!(prices.put, 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn binary_call_reference_values() {
        assert_abs_diff_eq!(binary_call_price(0.10, 0.05, 1.0, 100.0, 100.0), 0.6408, epsilon = 1e-4);
        assert_abs_diff_eq!(binary_call_price(0.30, 0.05, 1.0, 100.0, 100.0), 0.4819, epsilon = 1e-4);
    }

    #[test]
    fn binary_call_is_minus_the_strike_derivative_of_the_call() {
        let h = 1e-3;
        let up = black_scholes_put_call(0.25, 0.03, 0.7, 95.0, 100.0 + h).call;
        let down = black_scholes_put_call(0.25, 0.03, 0.7, 95.0, 100.0 - h).call;
        let binary = binary_call_price(0.25, 0.03, 0.7, 95.0, 100.0);
        assert_abs_diff_eq!((down - up) / (2.0 * h), binary, epsilon = 1e-6);
    }

    #[test]
    fn expired_contracts_pay_intrinsic() {
        let prices = black_scholes_put_call(0.2, 0.05, 0.0, 110.0, 100.0);
        assert_eq!(prices, PutCallPair { call: 10.0, put: 0.0 });
        assert_eq!(binary_call_price(0.2, 0.05, 0.0, 100.0, 100.0), 0.0);
        assert_eq!(binary_put_price(0.2, 0.05, 0.0, 99.0, 100.0), 1.0);
    }

    #[test]
    fn zero_vol_prices_are_discounted_forwards() {
        let prices = black_scholes_put_call(0.0, 0.05, 1.0, 100.0, 95.0);
        assert_relative_eq!(prices.call, 100.0 - 95.0 * (-0.05_f64).exp(), max_relative = 1e-12);
        assert_abs_diff_eq!(binary_call_price(0.0, 0.05, 1.0, 100.0, 95.0), (-0.05_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn closed_form_dispatch_applies_the_multiplier() {
        let call = OptionContract::call(1.0, 100.0).unwrap().with_multiplier(-2.0).unwrap();
        let reference = black_scholes_put_call(0.2, 0.05, 1.0, 100.0, 100.0).call;
        assert_relative_eq!(closed_form_price(&call, 0.2, 0.05, 100.0), -2.0 * reference);
        let bput = OptionContract::binary_put(1.0, 100.0).unwrap();
        assert_relative_eq!(
            closed_form_price(&bput, 0.2, 0.05, 100.0),
            binary_put_price(0.2, 0.05, 1.0, 100.0, 100.0)
        );
    }

    proptest! {
        #[test]
        fn parities_hold(
            vol in 0.05_f64..0.8,
            rate in -0.02_f64..0.1,
            expiry in 0.05_f64..3.0,
            spot in 20.0_f64..200.0,
            strike in 20.0_f64..200.0,
        ) {
            let df = (-rate * expiry).exp();
            let binaries = binary_call_price(vol, rate, expiry, spot, strike)
                + binary_put_price(vol, rate, expiry, spot, strike);
            prop_assert!((binaries - df).abs() < 1e-12);

            let prices = black_scholes_put_call(vol, rate, expiry, spot, strike);
            prop_assert!(prices.call >= -1e-10 && prices.put >= -1e-10);
            prop_assert!((prices.call - prices.put - (spot - strike * df)).abs() < 1e-9);
        }
    }
}
