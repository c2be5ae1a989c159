//! Conversion between whole CTC and the ledger's smallest unit.
//!
//! One CTC is `10^18` smallest units. Formatting back to CTC uses integer
//! division, so any fractional remainder is dropped rather than rounded.

use alloy::primitives::U256;
use thiserror::Error;

/// Smallest units per whole CTC.
pub const MICROUNITS_PER_CTC: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Number of decimal places in one CTC.
pub const CTC_DECIMALS: usize = 18;

/// Currency suffix appended by [`to_ctc_string`].
pub const CTC_SUFFIX: &str = "CTC";

/// Errors from parsing a CTC amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{0}': expected a non-negative decimal number")]
    Invalid(String),

    #[error("amount '{0}' has more than 18 decimal places")]
    TooPrecise(String),

    #[error("amount '{0}' is too large")]
    Overflow(String),
}

/// Parse a whole-token decimal string (e.g. `"5"` or `"0.25"`) into smallest units.
pub fn parse_ctc_string(amount: &str) -> Result<U256, UnitsError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(UnitsError::Invalid(amount.to_string()));
    }
    if fraction.len() > CTC_DECIMALS {
        return Err(UnitsError::TooPrecise(amount.to_string()));
    }

    let overflow = || UnitsError::Overflow(amount.to_string());

    let whole_units = if whole.is_empty() {
        U256::ZERO
    } else {
        let value = U256::from_str_radix(whole, 10).map_err(|_| overflow())?;
        value.checked_mul(MICROUNITS_PER_CTC).ok_or_else(overflow)?
    };

    let fraction_units = if fraction.is_empty() {
        U256::ZERO
    } else {
        // Right-pad to 18 digits so "25" after the point means 0.25 CTC.
        let padded = format!("{:0<width$}", fraction, width = CTC_DECIMALS);
        U256::from_str_radix(&padded, 10).map_err(|_| overflow())?
    };

    whole_units.checked_add(fraction_units).ok_or_else(overflow)
}

/// Convert a whole number of CTC into smallest units.
pub fn to_microunits(amount: impl Into<U256>) -> Result<U256, UnitsError> {
    let amount = amount.into();
    amount
        .checked_mul(MICROUNITS_PER_CTC)
        .ok_or_else(|| UnitsError::Overflow(amount.to_string()))
}

/// Whole CTC contained in `amount`, as a plain numeral.
pub fn to_ctc_decimal(amount: U256) -> String {
    (amount / MICROUNITS_PER_CTC).to_string()
}

/// Format smallest units as whole CTC with the currency suffix, e.g. `"5CTC"`.
pub fn to_ctc_string(amount: U256) -> String {
    format!("{}{}", to_ctc_decimal(amount), CTC_SUFFIX)
}
