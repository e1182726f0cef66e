//! Signed-square exact values.
//!
//! True Clebsch-Gordan coefficients are generally irrational (signed square
//! roots of rationals), but every quantity the table algorithm manipulates
//! stays rational when a coefficient `c` is stored as the single rational
//! `sign(c) * c^2`. Addition of two such encodings is still closed: the cross
//! term `2|x||y|` is the square root of a product of two rational squares,
//! which must itself be an exact rational for mutually consistent
//! coefficients. A non-exact root therefore signals a bug in the algebra and
//! surfaces as [`CgError::Invariant`].

use std::fmt::{self, Display};

use num_bigint::{BigInt, Sign};
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::errors::{CgError, ErrorInfo};

/// A real value `x` encoded exactly as the rational `sign(x) * x^2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedSquare(BigRational);

impl SignedSquare {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// The encoding of the real value 1.
    pub fn one() -> Self {
        Self(BigRational::one())
    }

    /// Wraps an already signed-square encoded rational.
    pub fn from_signed_square(encoded: BigRational) -> Self {
        Self(encoded)
    }

    /// Returns the encoded rational `sign(x) * x^2`.
    pub fn signed_square(&self) -> &BigRational {
        &self.0
    }

    /// Returns the squared magnitude `x^2`.
    pub fn magnitude_squared(&self) -> BigRational {
        self.0.abs()
    }

    /// Whether the encoded value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Sign of the underlying real value: -1, 0 or 1.
    pub fn signum(&self) -> i32 {
        sign_of(self.0.numer())
    }

    /// The encoding of `-x`.
    pub fn negated(&self) -> Self {
        Self(-&self.0)
    }

    /// Multiplies the underlying value by a non-negative rational factor
    /// given through its square `k2`, i.e. encodes `k * x` from `k^2`.
    pub fn scaled(&self, k2: &BigRational) -> Self {
        debug_assert!(!k2.is_negative());
        Self(&self.0 * k2)
    }

    /// The encoding of the product `x * y`, exact for any two encodings.
    pub fn product(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }

    /// The encoding of the sum `x + y`, computed without ever leaving
    /// rational arithmetic.
    ///
    /// The sign of the sum is read off the cross term, and the cross term
    /// `2|x||y|` is obtained by extracting the exact square root of
    /// `x^2 * y^2`. A non-exact root is an invariant violation: it can only
    /// happen when the two operands do not stem from consistent CG algebra.
    pub fn combine(&self, other: &Self) -> Result<Self, CgError> {
        let a = &self.0;
        let b = &other.0;
        let lead = a.numer() * b.denom() + a.denom() * b.numer();
        if lead.is_zero() {
            return Ok(Self::zero());
        }
        let abs_a = a.abs();
        let abs_b = b.abs();
        let cross = &abs_a * &abs_b;
        let root = exact_sqrt(&cross).ok_or_else(|| {
            CgError::Invariant(
                ErrorInfo::new("cross-term-not-square", "cross term is not a rational square")
                    .with_context("lhs", a.to_string())
                    .with_context("rhs", b.to_string()),
            )
        })?;
        let cross_sign = sign_of(a.numer()) * sign_of(b.numer());
        let mut sum = &abs_a + &abs_b;
        sum += root * BigRational::from_integer(BigInt::from(2 * cross_sign));
        if sign_of(&lead) < 0 {
            sum = -sum;
        }
        Ok(Self(sum))
    }
}

impl Display for SignedSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_zero() {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

fn sign_of(x: &BigInt) -> i32 {
    match x.sign() {
        Sign::Minus => -1,
        Sign::NoSign => 0,
        Sign::Plus => 1,
    }
}

/// Exact square root of a non-negative rational, if one exists.
fn exact_sqrt(r: &BigRational) -> Option<BigRational> {
    let numer = int_sqrt_exact(r.numer())?;
    let denom = int_sqrt_exact(r.denom())?;
    Some(BigRational::new(numer, denom))
}

fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let root = x.sqrt();
    if &(&root * &root) == x {
        Some(root)
    } else {
        None
    }
}
