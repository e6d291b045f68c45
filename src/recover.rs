//! Command Cores
//!
//! `recover_core` and `split_core` do the work behind the CLI subcommands and
//! return a [`CommandResult`]; `main.rs` only reads inputs and prints.

use crate::crypto::radix;
use crate::crypto::split::{self, SplitOptions};
use crate::{find_secret, CommandResult, DivisionMode};
use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// JSON result of a recovery
#[derive(Serialize, Debug, Clone)]
pub struct RecoveryReport {
    pub source: String,
    pub n: u64,
    pub k: usize,
    pub used: Vec<u64>,
    pub ignored: Vec<u64>,
    /// Decimal; secrets routinely exceed every fixed-width JSON number.
    pub secret: String,
    pub mode: &'static str,
}

/// Reconstruct the secret of one share document.
///
/// `source` labels the document (usually its path) in the output.
pub fn recover_core(source: &str, text: &str, mode: DivisionMode) -> Result<CommandResult> {
    let recovery = find_secret(text, mode).with_context(|| format!("Failed to recover {}", source))?;

    let mut out = String::new();
    out.push_str(&format!("Share document: {}\n", source));
    out.push_str(&format!(
        "Config: {}-of-{} ({} shares present)\n\n",
        recovery.k,
        recovery.n,
        recovery.used.len() + recovery.ignored.len()
    ));

    out.push_str("Lagrange interpolation at x = 0 over:\n");
    for point in &recovery.used {
        out.push_str(&format!("   x = {:<3} y = {}\n", point.x, point.y));
    }
    if !recovery.ignored.is_empty() {
        let ignored: Vec<u64> = recovery.ignored.iter().map(|p| p.x).collect();
        out.push_str(&format!("Ignored surplus shares: {:?}\n", ignored));
    }
    if mode == DivisionMode::Truncating {
        out.push_str("Division: truncating (lenient)\n");
    }
    out.push_str(&format!("\nSecret: {}\n", recovery.secret));

    let report = RecoveryReport {
        source: source.to_string(),
        n: recovery.n,
        k: recovery.k,
        used: recovery.used.iter().map(|p| p.x).collect(),
        ignored: recovery.ignored.iter().map(|p| p.x).collect(),
        secret: recovery.secret.to_string(),
        mode: match mode {
            DivisionMode::Exact => "exact",
            DivisionMode::Truncating => "truncating",
        },
    };

    Ok(CommandResult {
        output: out,
        result: serde_json::to_string(&report)?,
    })
}

/// Split a decimal `secret` into a share document.
///
/// A `seed` makes the output reproducible; without one the generator is
/// seeded from the OS.
pub fn split_core(
    secret: &str,
    n: u64,
    k: u64,
    seed: Option<u64>,
    options: &SplitOptions,
) -> Result<CommandResult> {
    let secret = radix::decode(secret, 10).context("Secret must be a non-negative decimal integer")?;

    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let document = split::split(&secret, n, k, options, &mut rng)?;

    let mut out = String::new();
    out.push_str(&format!("Split secret into {}-of-{} shares\n", k, n));
    out.push_str(&format!(
        "Wrote {} shares in bases 2..={}\n",
        document.shares.len(),
        options.max_base
    ));
    if !options.omit.is_empty() {
        out.push_str(&format!("Omitted indices: {:?}\n", options.omit));
    }

    Ok(CommandResult {
        output: out,
        result: document.to_json()?,
    })
}
