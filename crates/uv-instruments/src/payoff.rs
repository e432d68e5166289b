//! Payoff kinds.
//!
//! A contract's payoff is one of four closed forms. Besides the usual point
//! payoff, each kind provides the exact *average* payoff over a price cell.
//! The finite-difference grid injects cell averages instead of point samples:
//! digital payoffs are discontinuous, and sampling them at a node that sits on
//! the strike costs an O(1) pointwise error.

use std::fmt;
use std::str::FromStr;

use uv_core::{errors::Error, Real};

/// Option payoff kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContractKind {
    /// `max(S − K, 0)`.
    Call,
    /// `max(K − S, 0)`.
    Put,
    /// Pays 1 if `S > K`.
    BinaryCall,
    /// Pays 1 if `S < K`.
    BinaryPut,
}

impl ContractKind {
    /// All kinds, in tag order.
    pub const ALL: [ContractKind; 4] = [
        ContractKind::Call,
        ContractKind::Put,
        ContractKind::BinaryCall,
        ContractKind::BinaryPut,
    ];

    /// Short textual tag (`"call"`, `"put"`, `"bcall"`, `"bput"`).
    pub fn tag(self) -> &'static str {
        match self {
            ContractKind::Call => "call",
            ContractKind::Put => "put",
            ContractKind::BinaryCall => "bcall",
            ContractKind::BinaryPut => "bput",
        }
    }

    /// `true` for the digital (cash-or-nothing) kinds.
    pub fn is_binary(self) -> bool {
        matches!(self, ContractKind::BinaryCall | ContractKind::BinaryPut)
    }

    /// Payoff per unit at `price` for a contract struck at `strike`.
    #[inline]
    pub fn payoff(self, price: Real, strike: Real) -> Real {
        match self {
            ContractKind::Call => (price - strike).max(0.0),
            ContractKind::Put => (strike - price).max(0.0),
            ContractKind::BinaryCall => {
                if price > strike {
                    1.0
                } else {
                    0.0
                }
            }
            ContractKind::BinaryPut => {
                if price < strike {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Exact average of [`payoff`](Self::payoff) over `[low, high)`.
    ///
    /// Requires `low < high`.
    #[inline]
    pub fn average_payoff(self, low: Real, high: Real, strike: Real) -> Real {
        let width = high - low;
        match self {
            ContractKind::Call => {
                if low >= strike {
                    0.5 * (low + high) - strike
                } else if high > strike {
                    0.5 * (high - strike) * (high - strike) / width
                } else {
                    0.0
                }
            }
            ContractKind::Put => {
                if high <= strike {
                    strike - 0.5 * (low + high)
                } else if low < strike {
                    0.5 * (strike - low) * (strike - low) / width
                } else {
                    0.0
                }
            }
            ContractKind::BinaryCall => {
                if low >= strike {
                    1.0
                } else if high > strike {
                    (high - strike) / width
                } else {
                    0.0
                }
            }
            ContractKind::BinaryPut => {
                if high <= strike {
                    1.0
                } else if low < strike {
                    (strike - low) / width
                } else {
                    0.0
                }
            }
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ContractKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        ContractKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| Error::UnknownTag {
                kind: "contract kind",
                tag: s.to_string(),
            })
    }
}
