//! Arbitrary-base digit strings
//!
//! Share values arrive as digit strings in a declared radix. Digits run `0-9`
//! then `a-z` (case-insensitive), so bases 2 through 36 are supported.

use crate::error::{RecoveryError, Result};
use num_bigint::BigUint;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Fails with `InvalidBase` unless `base` is in `MIN_BASE..=MAX_BASE`.
pub fn check_base(base: u32) -> Result<()> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(RecoveryError::InvalidBase {
            base: base.to_string(),
        });
    }
    Ok(())
}

/// Parse a declared base such as `"16"` into a radix.
///
/// Only plain decimal digits are accepted; the result must lie in
/// `MIN_BASE..=MAX_BASE`.
pub fn parse_base(text: &str) -> Result<u32> {
    let invalid = || RecoveryError::InvalidBase {
        base: text.to_string(),
    };
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let base: u32 = text.parse().map_err(|_| invalid())?;
    check_base(base).map_err(|_| invalid())?;
    Ok(base)
}

/// Decode `digits` written in `base` into an arbitrary-precision integer.
///
/// # Errors
/// - `InvalidBase` if `base` is outside `2..=36`
/// - `EmptyDigits` for an empty string
/// - `InvalidDigit` naming the first offending character and its position
pub fn decode(digits: &str, base: u32) -> Result<BigUint> {
    check_base(base)?;
    if digits.is_empty() {
        return Err(RecoveryError::EmptyDigits);
    }

    let values = digits
        .chars()
        .enumerate()
        .map(|(position, digit)| {
            digit
                .to_digit(base)
                .map(|d| d as u8)
                .ok_or(RecoveryError::InvalidDigit {
                    digit,
                    position,
                    base,
                })
        })
        .collect::<Result<Vec<u8>>>()?;

    BigUint::from_radix_be(&values, base).ok_or_else(|| RecoveryError::InvalidBase {
        base: base.to_string(),
    })
}

/// Render `value` in `base` using lowercase digits. Inverse of [`decode`].
pub fn encode(value: &BigUint, base: u32) -> Result<String> {
    check_base(base)?;
    Ok(value.to_str_radix(base))
}
