//! Build contracts from tabular data.
//!
//! Portfolios usually arrive column-wise (a data frame or a CSV with one row
//! per position). [`contracts_from_columns`] turns parallel columns of type
//! tag, expiry, strike and quantity into contracts, one per row, in row order.

use uv_core::{errors::Error, Real, Result};

use crate::contract::OptionContract;
use crate::payoff::ContractKind;

/// Build one contract per row from parallel columns.
///
/// `types` holds the tags `"call"`, `"put"`, `"bcall"` or `"bput"`.
///
/// # Errors
/// * [`Error::InvalidArgument`] if the columns have different lengths.
/// * [`Error::UnknownTag`] if a type tag is not recognised.
/// * [`Error::Precondition`] if a row holds an invalid expiry, strike or
///   quantity; the message names the row.
pub fn contracts_from_columns<S: AsRef<str>>(
    types: &[S],
    expiries: &[Real],
    strikes: &[Real],
    quantities: &[Real],
) -> Result<Vec<OptionContract>> {
    let rows = types.len();
    if expiries.len() != rows || strikes.len() != rows || quantities.len() != rows {
        return Err(Error::InvalidArgument(format!(
            "column lengths differ: types {rows}, expiries {}, strikes {}, quantities {}",
            expiries.len(),
            strikes.len(),
            quantities.len()
        )));
    }

    types
        .iter()
        .zip(expiries)
        .zip(strikes)
        .zip(quantities)
        .enumerate()
        .map(|(row, (((tag, &expiry), &strike), &quantity))| {
            let kind: ContractKind = tag.as_ref().parse()?;
            OptionContract::new(kind, expiry, strike, quantity).map_err(|e| match e {
                Error::Precondition(msg) => Error::Precondition(format!("row {row}: {msg}")),
                other => other,
            })
        })
        .collect()
}
