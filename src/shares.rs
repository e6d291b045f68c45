//! Share Collection
//!
//! Walks a parsed share document and turns it into interpolation points.
//!
//! ```text
//! {
//!   "keys": { "n": 4, "k": 3 },
//!   "1": { "base": "10", "value": "4" },     → (1, 4)
//!   "2": { "base": "2",  "value": "111" },   → (2, 7)
//!   "3": { "base": "10", "value": "12" },    → (3, 12)
//!   "6": { "base": "4",  "value": "213" }    → ignored, 6 > n
//! }
//! ```
//!
//! Indices `1..=n` may be sparse: an absent index is skipped, not an error.
//! The collected points are ordered by ascending `x`; interpolation uses the
//! first `k` of them and ignores the rest.

use crate::crypto::radix;
use crate::error::{RecoveryError, Result};
use crate::parser::{Object, Value};
use num_bigint::BigUint;
use tracing::debug;

/// One share: the polynomial evaluated at `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: u64,
    pub y: BigUint,
}

impl Point {
    pub fn new(x: u64, y: impl Into<BigUint>) -> Self {
        Self { x, y: y.into() }
    }
}

/// Shares extracted from one document, ordered by `x`.
///
/// Only [`collect`] builds one, so it always holds at least `k` points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareSet {
    n: u64,
    k: usize,
    points: Vec<Point>,
}

impl ShareSet {
    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Every share present, in ascending `x`.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The points interpolation will use.
    pub fn threshold_points(&self) -> &[Point] {
        self.points.get(..self.k).unwrap_or(&self.points)
    }

    /// Points beyond the threshold; never cross-checked.
    pub fn surplus_points(&self) -> &[Point] {
        self.points.get(self.k..).unwrap_or(&[])
    }
}

/// Extract `keys.n`, `keys.k` and every share present in `root`.
///
/// # Errors
/// - `MissingField` when `keys`, `keys.n`, `keys.k` or a share's `base` /
///   `value` is absent or has the wrong type
/// - `InvalidThreshold` unless `1 <= k <= n`
/// - `InvalidBase` / `InvalidDigit` / `EmptyDigits` from decoding a share
/// - `InsufficientPoints` when fewer than `k` shares are present
pub fn collect(root: &Object) -> Result<ShareSet> {
    let keys = root
        .get("keys")
        .and_then(Value::as_object)
        .ok_or_else(|| RecoveryError::missing("keys"))?;

    let n = read_integer(keys, "n")?;
    let k = read_integer(keys, "k")?;
    if n < 1 || k < 1 || k > n {
        return Err(RecoveryError::InvalidThreshold { n, k });
    }
    let threshold = usize::try_from(k).map_err(|_| RecoveryError::InvalidThreshold { n, k })?;
    let n = n as u64;

    let mut points = Vec::new();
    for (key, entry) in root {
        let Some(x) = share_index(key, n) else {
            continue;
        };
        points.push(decode_share(x, entry)?);
    }
    points.sort_by_key(|point| point.x);

    for (from, to) in absent_indices(&points, n) {
        debug!(from, to, "share indices absent; skipping");
    }
    debug!(n, k, present = points.len(), "collected shares");

    if points.len() < threshold {
        return Err(RecoveryError::InsufficientPoints {
            available: points.len(),
            required: threshold,
        });
    }

    Ok(ShareSet {
        n,
        k: threshold,
        points,
    })
}

fn read_integer(keys: &Object, name: &str) -> Result<i64> {
    keys.get(name)
        .and_then(Value::as_integer)
        .ok_or_else(|| RecoveryError::missing(format!("keys.{}", name)))
}

// Only the canonical decimal form of an index in 1..=n names a share.
fn share_index(key: &str, n: u64) -> Option<u64> {
    let index: u64 = key.parse().ok()?;
    (1..=n)
        .contains(&index)
        .then_some(index)
        .filter(|index| index.to_string() == key)
}

// Runs of indices in 1..=n with no share, as inclusive `(from, to)` pairs.
// `points` must be sorted by `x` and lie within 1..=n.
fn absent_indices(points: &[Point], n: u64) -> Vec<(u64, u64)> {
    let mut gaps = Vec::new();
    let mut next = 1;
    for point in points {
        if point.x > next {
            gaps.push((next, point.x - 1));
        }
        next = point.x + 1;
    }
    if next <= n {
        gaps.push((next, n));
    }
    gaps
}

fn decode_share(x: u64, entry: &Value) -> Result<Point> {
    let fields = entry
        .as_object()
        .ok_or_else(|| RecoveryError::missing(x.to_string()))?;

    let base = match fields.get("base") {
        Some(Value::String(text)) => radix::parse_base(text)?,
        Some(Value::Integer(b)) => u32::try_from(*b).map_err(|_| RecoveryError::InvalidBase {
            base: b.to_string(),
        })?,
        _ => return Err(RecoveryError::missing(format!("{}.base", x))),
    };

    let digits = fields
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| RecoveryError::missing(format!("{}.value", x)))?;

    let y = radix::decode(digits, base)?;
    debug!(x, base, %y, "decoded share");

    Ok(Point { x, y })
}
