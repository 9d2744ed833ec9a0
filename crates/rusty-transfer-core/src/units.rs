//! Decimal <-> minimal-unit conversion for the chain's native currency.

use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::error::TransferError;

/// Parses a user-entered decimal amount into minimal units.
///
/// Negative values and values with more fractional digits than `decimals`
/// are rejected.
pub fn parse_amount(raw: &str, decimals: u8) -> Result<U256, TransferError> {
    let trimmed = raw.trim();
    let well_formed = trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
        && trimmed.matches('.').count() <= 1;
    if !well_formed {
        return Err(TransferError::InvalidAmount);
    }
    // excess precision is rejected here, not rounded by parse_units
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > decimals as usize {
            return Err(TransferError::InvalidAmount);
        }
    }
    match parse_units(trimmed, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(TransferError::InvalidAmount),
        Err(e) => {
            tracing::debug!(amount = trimmed, error = %e, "amount rejected");
            Err(TransferError::InvalidAmount)
        }
    }
}

/// Formats minimal units as a decimal string: "1.5", "2.0", "0.0".
pub fn format_amount(value: U256, decimals: u8) -> Result<String, TransferError> {
    let formatted = format_units(value, decimals).map_err(|e| {
        tracing::warn!(%value, decimals, error = %e, "balance formatting failed");
        TransferError::ProviderUnavailable
    })?;
    Ok(trim_fraction(formatted))
}

fn trim_fraction(formatted: String) -> String {
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{fraction}")
            }
        }
        None => format!("{formatted}.0"),
    }
}
