use cg_core::{CgError, SignedSquare};
use cg_table::Table;
use num_rational::BigRational;
use num_traits::{One, Zero};

fn doubled_m_values(twoj: i32) -> impl Iterator<Item = i32> {
    (0..=twoj).map(move |k| twoj - 2 * k)
}

/// Sum over m1 of the squared coefficient magnitudes for a fixed (j, m).
fn norm_squared(table: &Table, twoj: i32, twom: i32) -> BigRational {
    let mut sum = BigRational::zero();
    for twom1 in doubled_m_values(table.twoj1()) {
        let twom2 = twom - twom1;
        sum += table.query(twoj, twom, twom1, twom2).magnitude_squared();
    }
    sum
}

/// Sum over m1 of coefficient products for two different j at the same m,
/// accumulated in signed-square space.
fn overlap(table: &Table, twoj_a: i32, twoj_b: i32, twom: i32) -> SignedSquare {
    let mut acc = SignedSquare::zero();
    for twom1 in doubled_m_values(table.twoj1()) {
        let twom2 = twom - twom1;
        let a = table.query(twoj_a, twom, twom1, twom2);
        let b = table.query(twoj_b, twom, twom1, twom2);
        acc = acc.combine(&a.product(&b)).expect("orthogonality sum stays rational");
    }
    acc
}

#[test]
fn rejects_non_positive_inputs() {
    for (twoj1, twoj2) in [(0, 1), (1, 0), (-2, 2), (3, -1), (0, 0)] {
        let err = Table::build(twoj1, twoj2).unwrap_err();
        assert!(matches!(err, CgError::Input(_)), "({twoj1}, {twoj2})");
        assert_eq!(err.info().code, "non-positive-j");
        assert!(!err.is_fatal());
    }
}

#[test]
fn construction_succeeds_for_valid_inputs() {
    // Invariant violations must never trigger for positive doubled inputs.
    for twoj1 in 1..=6 {
        for twoj2 in 1..=6 {
            Table::build(twoj1, twoj2)
                .unwrap_or_else(|err| panic!("build({twoj1}, {twoj2}) failed: {err}"));
        }
    }
}

#[test]
fn every_column_is_normalized() {
    for twoj1 in 1..=6 {
        for twoj2 in 1..=twoj1 {
            let table = Table::build(twoj1, twoj2).unwrap();
            let mut twoj = twoj1 - twoj2;
            while twoj <= twoj1 + twoj2 {
                for twom in doubled_m_values(twoj) {
                    assert_eq!(
                        norm_squared(&table, twoj, twom),
                        BigRational::one(),
                        "norm failed for twoj1={twoj1} twoj2={twoj2} twoj={twoj} twom={twom}"
                    );
                }
                twoj += 2;
            }
        }
    }
}

#[test]
fn different_j_columns_are_orthogonal() {
    for (twoj1, twoj2) in [(1, 1), (2, 1), (2, 2), (3, 2), (4, 3), (5, 5)] {
        let table = Table::build(twoj1, twoj2).unwrap();
        let mut twoj_a = twoj1 - twoj2;
        while twoj_a <= twoj1 + twoj2 {
            let mut twoj_b = twoj_a + 2;
            while twoj_b <= twoj1 + twoj2 {
                // Shared m values are bounded by the smaller j.
                for twom in doubled_m_values(twoj_a) {
                    let acc = overlap(&table, twoj_a, twoj_b, twom);
                    assert!(
                        acc.is_zero(),
                        "overlap({twoj_a}, {twoj_b}) at twom={twom} is {acc}"
                    );
                }
                twoj_b += 2;
            }
            twoj_a += 2;
        }
    }
}

#[test]
fn repeated_builds_are_bit_identical() {
    let first = Table::build(5, 4).unwrap();
    for _ in 0..3 {
        let rebuilt = Table::build(5, 4).unwrap();
        let mut twoj = 1;
        while twoj <= 9 {
            for twom in doubled_m_values(twoj) {
                for twom1 in doubled_m_values(5) {
                    let twom2 = twom - twom1;
                    assert_eq!(
                        first.query(twoj, twom, twom1, twom2),
                        rebuilt.query(twoj, twom, twom1, twom2)
                    );
                }
            }
            twoj += 2;
        }
    }
}
