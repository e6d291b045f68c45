//! Error taxonomy for share decoding and secret reconstruction.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecoveryError>;

/// Every failure the recovery pipeline can surface.
///
/// Each stage reports its own kind so callers can tell a bad digit from a
/// truncated document without matching on message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    /// A character is not a digit of the declared base.
    #[error("invalid digit '{digit}' at position {position} for base {base}")]
    InvalidDigit {
        digit: char,
        position: usize,
        base: u32,
    },

    /// The declared base is not a supported radix.
    #[error("invalid base '{base}': expected an integer between 2 and 36")]
    InvalidBase { base: String },

    #[error("empty digit string")]
    EmptyDigits,

    /// Structural violation in the input document. `position` is a byte
    /// offset into the whitespace-stripped text.
    #[error("malformed input at position {position}: {reason}")]
    MalformedInput { position: usize, reason: String },

    #[error("invalid integer literal '{literal}'")]
    InvalidNumber { literal: String },

    /// A required field is absent or has the wrong type.
    #[error("missing or mistyped field '{field}'")]
    MissingField { field: String },

    #[error("invalid threshold: k = {k}, n = {n} (need 1 <= k <= n)")]
    InvalidThreshold { n: i64, k: i64 },

    #[error("not enough points to reconstruct the polynomial: have {available}, need {required}")]
    InsufficientPoints { available: usize, required: usize },

    /// The shares do not describe an integer constant term.
    #[error("reconstruction failed: {reason}")]
    ReconstructionError { reason: String },
}

impl RecoveryError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        RecoveryError::MalformedInput {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        RecoveryError::MissingField {
            field: field.into(),
        }
    }
}
