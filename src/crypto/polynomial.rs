//! Integer Polynomials
//!
//! The dealer side of a split: a random polynomial whose constant term is the
//! secret, evaluated at x = 1..=n.

use num_bigint::{BigUint, RandBigInt};
use num_traits::Zero;
use rand::Rng;

/// A univariate polynomial with non-negative integer coefficients.
/// Note: The polynomial terms are: coefficients[i] * x^i
///       E.g. 3 + 2x + x^2 is encoded as:
///       Polynomial{ coefficients: [3,2,1] }
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    pub coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// A random polynomial of exactly `degree` with `secret` as constant term.
    ///
    /// Higher coefficients are drawn below `2^coefficient_bits`; the leading
    /// one is forced non-zero.
    pub fn random<R: Rng>(
        secret: BigUint,
        degree: usize,
        coefficient_bits: u64,
        rng: &mut R,
    ) -> Self {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret);
        for i in 1..=degree {
            let mut c = rng.gen_biguint(coefficient_bits);
            if i == degree && c.is_zero() {
                c = BigUint::from(1u32);
            }
            coefficients.push(c);
        }
        Polynomial { coefficients }
    }

    /// Evaluate the polynomial at x
    /// Note: This uses Horner's method: https://en.wikipedia.org/wiki/Horner%27s_method
    pub fn evaluate_at(&self, x: &BigUint) -> BigUint {
        self.coefficients
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, coeff| acc * x + coeff)
    }

    /// Evaluations at x = 1..=n.
    pub fn evaluations(&self, n: u64) -> Vec<(u64, BigUint)> {
        (1..=n)
            .map(|x| (x, self.evaluate_at(&BigUint::from(x))))
            .collect()
    }
}
