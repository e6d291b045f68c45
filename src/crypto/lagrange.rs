//! Lagrange Interpolation at Zero
//!
//! Reconstructs the constant term of the degree `k - 1` polynomial through
//! `k` points:
//!
//! ```text
//! f(0) = Σ_i y_i · λ_i(0)
//! λ_i(0) = Π_{j≠i} (0 - x_j) / (x_i - x_j)
//! ```
//!
//! All arithmetic is exact. Each basis value is accumulated as one full
//! numerator product and one full denominator product before any division
//! happens; dividing factor by factor would truncate intermediate quotients
//! that are not integers.

use crate::error::{RecoveryError, Result};
use crate::shares::Point;
use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::collections::HashSet;
use tracing::{debug, warn};

/// How each interpolation term is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionMode {
    /// Sum the terms as exact fractions; fail unless the sum is an integer.
    #[default]
    Exact,
    /// Divide each term once with truncation toward zero and sum the
    /// quotients. Lenient: never fails on inconsistent shares, but the result
    /// is only meaningful when every term divides evenly.
    Truncating,
}

/// Numerator and denominator products of `λ_i(0)` over `xs`, unreduced.
///
/// `numerator = Π_{j≠i} (-x_j)`, `denominator = Π_{j≠i} (x_i - x_j)`.
pub fn basis_at_zero(xs: &[BigInt], i: usize) -> (BigInt, BigInt) {
    let mut numerator = BigInt::one();
    let mut denominator = BigInt::one();

    for (j, x_j) in xs.iter().enumerate() {
        if j == i {
            continue;
        }
        numerator *= -x_j;
        denominator *= &xs[i] - x_j;
    }

    (numerator, denominator)
}

/// Compute the Lagrange coefficients `λ_i(0)` as reduced fractions.
///
/// # Errors
/// `ReconstructionError` if two `x` values coincide.
pub fn lagrange_coefficients_at_zero(xs: &[u64]) -> Result<Vec<BigRational>> {
    ensure_distinct(xs)?;
    let xs: Vec<BigInt> = xs.iter().copied().map(BigInt::from).collect();

    Ok((0..xs.len())
        .map(|i| {
            let (numerator, denominator) = basis_at_zero(&xs, i);
            BigRational::new(numerator, denominator)
        })
        .collect())
}

/// Recover `f(0)` from the first `k` of `points`.
///
/// Points after the first `k` are ignored.
///
/// # Errors
/// - `InvalidThreshold` if `k == 0`
/// - `InsufficientPoints` if fewer than `k` points are supplied
/// - `ReconstructionError` for duplicate `x` values, or in `Exact` mode when
///   the points do not determine an integer constant term
pub fn interpolate(points: &[Point], k: usize, mode: DivisionMode) -> Result<BigInt> {
    if k == 0 {
        return Err(RecoveryError::InvalidThreshold {
            n: i64::try_from(points.len()).unwrap_or(i64::MAX),
            k: 0,
        });
    }
    if points.len() < k {
        return Err(RecoveryError::InsufficientPoints {
            available: points.len(),
            required: k,
        });
    }

    let used = &points[..k];
    if points.len() > k {
        debug!(ignored = points.len() - k, "ignoring points beyond threshold");
    }

    let xs: Vec<u64> = used.iter().map(|p| p.x).collect();
    match mode {
        DivisionMode::Exact => interpolate_exact(used, &xs),
        DivisionMode::Truncating => interpolate_truncating(used, &xs),
    }
}

fn interpolate_exact(used: &[Point], xs: &[u64]) -> Result<BigInt> {
    let coefficients = lagrange_coefficients_at_zero(xs)?;

    let mut sum = BigRational::zero();
    for (coefficient, point) in coefficients.iter().zip(used) {
        sum += coefficient * BigRational::from_integer(BigInt::from(point.y.clone()));
    }

    if !sum.is_integer() {
        return Err(RecoveryError::ReconstructionError {
            reason: format!(
                "constant term {} is not an integer; shares are inconsistent or fewer than the polynomial's degree requires",
                sum
            ),
        });
    }

    Ok(sum.to_integer())
}

fn interpolate_truncating(used: &[Point], xs: &[u64]) -> Result<BigInt> {
    ensure_distinct(xs)?;
    let xs: Vec<BigInt> = xs.iter().copied().map(BigInt::from).collect();

    let mut result = BigInt::zero();
    for (i, point) in used.iter().enumerate() {
        let (numerator, denominator) = basis_at_zero(&xs, i);
        let (quotient, remainder) = (BigInt::from(point.y.clone()) * numerator).div_rem(&denominator);
        if !remainder.is_zero() {
            warn!(x = point.x, %remainder, "term does not divide evenly; truncating");
        }
        result += quotient;
    }

    Ok(result)
}

fn ensure_distinct(xs: &[u64]) -> Result<()> {
    let mut seen = HashSet::new();
    for x in xs {
        if !seen.insert(*x) {
            return Err(RecoveryError::ReconstructionError {
                reason: format!("duplicate x-coordinate {}", x),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(pairs: &[(u64, u64)]) -> Vec<Point> {
        pairs.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_lagrange_coefficients_sum_to_one() {
        for xs in [vec![1u64, 2, 3], vec![2, 5, 9, 11], vec![7]] {
            let sum: BigRational = lagrange_coefficients_at_zero(&xs).unwrap().into_iter().sum();
            assert_eq!(sum, BigRational::one(), "xs = {:?}", xs);
        }
    }

    #[test]
    fn test_basis_products_are_unreduced() {
        let xs: Vec<BigInt> = [1, 2, 3].into_iter().map(BigInt::from).collect();
        // λ_0(0) = (-2)(-3) / ((1-2)(1-3)) = 6 / 2
        assert_eq!(basis_at_zero(&xs, 0), (BigInt::from(6), BigInt::from(2)));
        // λ_1(0) = (-1)(-3) / ((2-1)(2-3)) = 3 / -1
        assert_eq!(basis_at_zero(&xs, 1), (BigInt::from(3), BigInt::from(-1)));
    }

    #[test]
    fn test_reference_quadratic() {
        // f(x) = x² + 3
        let pts = points(&[(1, 4), (2, 7), (3, 12)]);
        for mode in [DivisionMode::Exact, DivisionMode::Truncating] {
            assert_eq!(interpolate(&pts, 3, mode).unwrap(), BigInt::from(3));
        }
    }

    #[test]
    fn test_uses_only_first_k_points() {
        // f(x) = 2x + 5 on the first two points; the third is garbage.
        let pts = points(&[(1, 7), (2, 9), (3, 1000)]);
        assert_eq!(
            interpolate(&pts, 2, DivisionMode::Exact).unwrap(),
            BigInt::from(5)
        );
    }

    #[test]
    fn test_negative_constant_term() {
        // f(x) = 10x - 5
        let pts = points(&[(1, 5), (2, 15)]);
        assert_eq!(
            interpolate(&pts, 2, DivisionMode::Exact).unwrap(),
            BigInt::from(-5)
        );
    }

    #[test]
    fn test_non_consecutive_x_values() {
        // f(x) = 3x² + 2x + 9 sampled at 2, 5, 9; individual terms are not
        // integers but their sum is.
        let f = |x: u64| 3 * x * x + 2 * x + 9;
        let pts = points(&[(2, f(2)), (5, f(5)), (9, f(9))]);
        assert_eq!(
            interpolate(&pts, 3, DivisionMode::Exact).unwrap(),
            BigInt::from(9)
        );
    }

    #[test]
    fn test_single_point_is_its_own_constant() {
        let pts = points(&[(4, 42)]);
        assert_eq!(
            interpolate(&pts, 1, DivisionMode::Exact).unwrap(),
            BigInt::from(42)
        );
    }

    #[test]
    fn test_exact_mode_rejects_inconsistent_shares() {
        // Through (1, 1) and (3, 2): f(0) = 1/2.
        let pts = points(&[(1, 1), (3, 2)]);
        assert!(matches!(
            interpolate(&pts, 2, DivisionMode::Exact),
            Err(RecoveryError::ReconstructionError { .. })
        ));
    }

    #[test]
    fn test_truncating_mode_truncates_each_term() {
        // Terms: 1·(-3)/(-2) = 1.5 → 1, 2·(-1)/2 = -1 → -1.
        let pts = points(&[(1, 1), (3, 2)]);
        assert_eq!(
            interpolate(&pts, 2, DivisionMode::Truncating).unwrap(),
            BigInt::from(0)
        );
    }

    #[test]
    fn test_rejects_duplicate_x() {
        let pts = points(&[(1, 4), (1, 4)]);
        for mode in [DivisionMode::Exact, DivisionMode::Truncating] {
            assert!(matches!(
                interpolate(&pts, 2, mode),
                Err(RecoveryError::ReconstructionError { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_too_few_points() {
        let pts = points(&[(1, 4), (2, 7)]);
        assert_eq!(
            interpolate(&pts, 3, DivisionMode::Exact),
            Err(RecoveryError::InsufficientPoints {
                available: 2,
                required: 3
            })
        );
        assert!(matches!(
            interpolate(&pts, 0, DivisionMode::Exact),
            Err(RecoveryError::InvalidThreshold { k: 0, .. })
        ));
    }
}
