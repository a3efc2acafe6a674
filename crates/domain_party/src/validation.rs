//! Party validation rules
//!
//! # Validation Rules
//!
//! ## CNPJ
//! - Must contain exactly 14 digits after stripping formatting (`.`, `/`, `-`)
//! - Must not be a repetition of a single digit (e.g. `11.111.111/1111-11`)
//! - Both verification digits must match the mod-11 weighted checksum
//!
//! ## Retention percentage
//! - Must lie in [0, 100]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::PartyError;

/// Weights for the first CNPJ verification digit
const CNPJ_WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
/// Weights for the second CNPJ verification digit
const CNPJ_WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Strips formatting characters from a CNPJ, keeping digits only
///
/// `"12.345.678/0001-95"` becomes `"12345678000195"`. No validation is
/// performed; use [`validate_cnpj`] for that.
pub fn normalize_cnpj(cnpj: &str) -> String {
    cnpj.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a CNPJ and returns its normalized (digits-only) form
///
/// Accepts both formatted (`12.345.678/0001-95`) and bare
/// (`12345678000195`) input.
///
/// # Errors
///
/// Returns `PartyError::InvalidCnpj` when the digit count, digit variety,
/// or either check digit is wrong.
pub fn validate_cnpj(cnpj: &str) -> Result<String, PartyError> {
    let digits = normalize_cnpj(cnpj);

    if digits.len() != 14 {
        return Err(PartyError::InvalidCnpj(format!(
            "{cnpj}: expected 14 digits, found {}",
            digits.len()
        )));
    }

    let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

    // 00.000.000/0000-00 and friends pass the checksum but are not valid ids
    if values.iter().all(|&d| d == values[0]) {
        return Err(PartyError::InvalidCnpj(format!(
            "{cnpj}: repeated single digit"
        )));
    }

    let dv1 = check_digit(&values[..12], &CNPJ_WEIGHTS_1);
    let dv2 = check_digit(&values[..13], &CNPJ_WEIGHTS_2);

    if values[12] != dv1 || values[13] != dv2 {
        return Err(PartyError::InvalidCnpj(format!(
            "{cnpj}: check digits do not match"
        )));
    }

    Ok(digits)
}

/// Computes a CNPJ verification digit over `digits` with the given weights
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        rest => 11 - rest,
    }
}

/// Validates that a retention percentage lies in [0, 100]
///
/// The retention calculator itself does not clamp its input; this check
/// belongs at the edge where client data is accepted.
pub fn validate_retention_percent(percent: Decimal) -> Result<Decimal, PartyError> {
    if percent < dec!(0) || percent > dec!(100) {
        return Err(PartyError::InvalidRetentionPercent(format!(
            "{percent}: must be between 0 and 100"
        )));
    }
    Ok(percent)
}
