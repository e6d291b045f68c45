//! Arithmetic Primitives
//!
//! - **radix**: digit strings in bases 2–36 to and from big integers
//! - **lagrange**: exact Lagrange interpolation at x = 0
//! - **polynomial**: integer polynomials for share generation
//! - **split**: share documents from a secret

pub mod lagrange;
pub mod polynomial;
pub mod radix;
pub mod split;
