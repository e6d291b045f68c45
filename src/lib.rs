//! Shamir secret recovery from base-encoded shares.
//!
//! ```text
//! text ──parser::parse──▶ Object ──shares::collect──▶ ShareSet
//!      ──lagrange::interpolate──▶ secret (f(0))
//! ```

use num_bigint::BigInt;

pub mod crypto;
pub mod error;
pub mod parser;
pub mod recover;
pub mod shares;

pub use crypto::lagrange::DivisionMode;
pub use error::{RecoveryError, Result};
pub use shares::{Point, ShareSet};

/// Result from a command, separating human-readable output from the
/// machine-readable result
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Explanation of what was read and computed
    pub output: String,
    /// JSON result
    pub result: String,
}

/// Outcome of reconstructing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    pub n: u64,
    pub k: usize,
    /// The first `k` points, in ascending `x`.
    pub used: Vec<Point>,
    /// Surplus points that took no part in interpolation.
    pub ignored: Vec<Point>,
    pub secret: BigInt,
}

/// Parse a share document and reconstruct its secret.
pub fn find_secret(text: &str, mode: DivisionMode) -> Result<Recovery> {
    let root = parser::parse(text)?;
    let set = shares::collect(&root)?;
    let secret = crypto::lagrange::interpolate(set.points(), set.k(), mode)?;

    Ok(Recovery {
        n: set.n(),
        k: set.k(),
        used: set.threshold_points().to_vec(),
        ignored: set.surplus_points().to_vec(),
        secret,
    })
}
