use cg_core::{CgError, SignedSquare};
use num_bigint::BigInt;
use num_rational::BigRational;

fn enc(numer: i64, denom: i64) -> SignedSquare {
    SignedSquare::from_signed_square(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
}

fn rat(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

#[test]
fn combine_with_zero_is_identity() {
    let x = enc(1, 2);
    assert_eq!(SignedSquare::zero().combine(&x).unwrap(), x);
    assert_eq!(x.combine(&SignedSquare::zero()).unwrap(), x);
}

#[test]
fn combine_equal_magnitudes() {
    // 1/sqrt(2) + 1/sqrt(2) = sqrt(2), encoded as +2.
    let x = enc(1, 2);
    assert_eq!(x.combine(&x).unwrap(), enc(2, 1));
}

#[test]
fn combine_opposite_signs_cancels() {
    let x = enc(1, 4);
    let y = enc(-1, 4);
    assert!(x.combine(&y).unwrap().is_zero());
}

#[test]
fn combine_mixed_signs() {
    // 3/4 - 1/4 = 1/2, i.e. +9/16 combined with -1/16 encodes +1/4.
    let sum = enc(9, 16).combine(&enc(-1, 16)).unwrap();
    assert_eq!(sum, enc(1, 4));
    // 1/4 - 3/4 = -1/2.
    let sum = enc(1, 16).combine(&enc(-9, 16)).unwrap();
    assert_eq!(sum, enc(-1, 4));
}

#[test]
fn combine_rejects_non_square_cross_term() {
    // 1 + 1/sqrt(2): the cross term 2*sqrt(1/2) is irrational.
    let err = enc(1, 1).combine(&enc(1, 2)).unwrap_err();
    assert!(matches!(err, CgError::Invariant(_)));
    assert_eq!(err.info().code, "cross-term-not-square");
    assert!(err.is_fatal());
}

#[test]
fn scaling_applies_squared_factor() {
    // 2 * (1/sqrt(2)) = sqrt(2): scaling the encoding of 1/sqrt(2) by 4.
    let x = enc(1, 2);
    assert_eq!(x.scaled(&rat(4, 1)), enc(2, 1));
    // Scaling preserves sign.
    assert_eq!(enc(-1, 2).scaled(&rat(4, 1)), enc(-2, 1));
    // Scaling by zero annihilates.
    assert!(x.scaled(&rat(0, 1)).is_zero());
}

#[test]
fn negation_and_sign() {
    let x = enc(1, 2);
    assert_eq!(x.signum(), 1);
    assert_eq!(x.negated(), enc(-1, 2));
    assert_eq!(x.negated().signum(), -1);
    assert_eq!(SignedSquare::zero().signum(), 0);
}

#[test]
fn product_multiplies_encodings() {
    // (1/sqrt(2)) * (-1/sqrt(2)) = -1/2, encoded as -1/4.
    let p = enc(1, 2).product(&enc(-1, 2));
    assert_eq!(p, enc(-1, 4));
    assert_eq!(SignedSquare::one().product(&enc(1, 2)), enc(1, 2));
}

#[test]
fn magnitude_squared_drops_sign() {
    assert_eq!(enc(-1, 2).magnitude_squared(), rat(1, 2));
}

#[test]
fn display_matches_encoded_rational() {
    assert_eq!(SignedSquare::zero().to_string(), "0");
    assert_eq!(enc(1, 2).to_string(), "1/2");
    assert_eq!(enc(-1, 2).to_string(), "-1/2");
    assert_eq!(enc(2, 1).to_string(), "2");
}
