//! Share Generation
//!
//! Produces share documents in the same shape `recover` reads: a random
//! polynomial with the secret as constant term, evaluated at x = 1..=n, each
//! evaluation written in a randomly chosen base.

use crate::crypto::polynomial::Polynomial;
use crate::crypto::radix::{self, MIN_BASE};
use crate::error::{RecoveryError, Result};
use num_bigint::BigUint;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Keys {
    pub n: u64,
    pub k: u64,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodedShare {
    pub base: String,
    pub value: String,
}

/// `{"keys": {...}, "1": {...}, "2": {...}, ...}`
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ShareDocument {
    pub keys: Keys,
    #[serde(flatten)]
    pub shares: BTreeMap<String, EncodedShare>,
}

impl ShareDocument {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Largest base a share may be written in.
    pub max_base: u32,
    /// Indices left out of the document.
    pub omit: Vec<u64>,
    pub coefficient_bits: u64,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            max_base: 16,
            omit: Vec::new(),
            coefficient_bits: 64,
        }
    }
}

/// Split `secret` into `n` shares, any `k` of which recover it.
///
/// # Errors
/// - `InvalidThreshold` unless `1 <= k <= n`
/// - `InvalidBase` if `options.max_base` is not a supported radix
pub fn split<R: Rng>(
    secret: &BigUint,
    n: u64,
    k: u64,
    options: &SplitOptions,
    rng: &mut R,
) -> Result<ShareDocument> {
    if k < 1 || k > n {
        return Err(RecoveryError::InvalidThreshold {
            n: i64::try_from(n).unwrap_or(i64::MAX),
            k: i64::try_from(k).unwrap_or(i64::MAX),
        });
    }
    radix::check_base(options.max_base)?;

    let polynomial = Polynomial::random(
        secret.clone(),
        (k - 1) as usize,
        options.coefficient_bits,
        rng,
    );

    let mut shares = BTreeMap::new();
    for (x, y) in polynomial.evaluations(n) {
        if options.omit.contains(&x) {
            continue;
        }
        let base = rng.gen_range(MIN_BASE..=options.max_base);
        shares.insert(
            x.to_string(),
            EncodedShare {
                base: base.to_string(),
                value: radix::encode(&y, base)?,
            },
        );
    }

    debug!(n, k, written = shares.len(), "generated shares");
    if (shares.len() as u64) < k {
        warn!(
            written = shares.len(),
            k, "fewer shares than the threshold; the secret cannot be recovered"
        );
    }

    Ok(ShareDocument {
        keys: Keys { n, k },
        shares,
    })
}
