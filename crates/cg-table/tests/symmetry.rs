use cg_core::SignedSquare;
use cg_table::Table;
use num_bigint::BigInt;
use num_rational::BigRational;

fn enc(numer: i64, denom: i64) -> SignedSquare {
    SignedSquare::from_signed_square(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
}

fn doubled_m_values(twoj: i32) -> impl Iterator<Item = i32> {
    (0..=twoj).map(move |k| twoj - 2 * k)
}

fn j_values(table: &Table) -> impl Iterator<Item = i32> {
    let lo = (table.twoj1() - table.twoj2()).abs();
    let hi = table.twoj1() + table.twoj2();
    (0..=(hi - lo) / 2).map(move |k| lo + 2 * k)
}

#[test]
fn two_spin_half_scenario() {
    let table = Table::build(1, 1).unwrap();
    // Triplet m=0: both entries are 1/sqrt(2), signed square +1/2.
    assert_eq!(table.query(2, 0, 1, -1), enc(1, 2));
    assert_eq!(table.query(2, 0, -1, 1), enc(1, 2));
    // Singlet: antisymmetric combination of equal magnitude.
    assert_eq!(table.query(0, 0, 1, -1), enc(1, 2));
    assert_eq!(table.query(0, 0, -1, 1), enc(-1, 2));
    // Stretched state is exactly 1.
    assert_eq!(table.query(2, 2, 1, 1), enc(1, 1));
}

#[test]
fn spin_one_spin_half_scenario() {
    let table = Table::build(2, 1).unwrap();
    assert_eq!(table.query(3, 3, 2, 1), enc(1, 1));
    // Lowered once: |3/2,1/2> = sqrt(2/3)|1,0>|1/2,1/2> + sqrt(1/3)|1,1>|1/2,-1/2>.
    assert_eq!(table.query(3, 1, 0, 1), enc(2, 3));
    assert_eq!(table.query(3, 1, 2, -1), enc(1, 3));
    // Orthogonal j=1/2 column at the same m.
    assert_eq!(table.query(1, 1, 0, 1), enc(-1, 3));
    assert_eq!(table.query(1, 1, 2, -1), enc(2, 3));
}

#[test]
fn negating_all_m_applies_alternating_phase() {
    let table = Table::build(3, 2).unwrap();
    for twoj in j_values(&table) {
        let dj = (3 + 2 - twoj) / 2;
        for twom in doubled_m_values(twoj) {
            for twom1 in doubled_m_values(3) {
                let twom2 = twom - twom1;
                let plain = table.query(twoj, twom, twom1, twom2);
                let negated = table.query(twoj, -twom, -twom1, -twom2);
                let expected = if dj % 2 != 0 { plain.negated() } else { plain };
                assert_eq!(
                    negated, expected,
                    "twoj={twoj} twom={twom} twom1={twom1}"
                );
            }
        }
    }
}

#[test]
fn exchanged_query_applies_alternating_phase() {
    let table = Table::build(3, 2).unwrap();
    for twoj in j_values(&table) {
        let dj = (3 + 2 - twoj) / 2;
        for twom in doubled_m_values(twoj) {
            for twom1 in doubled_m_values(3) {
                let twom2 = twom - twom1;
                let plain = table.query(twoj, twom, twom1, twom2);
                let exchanged = table.query_exchanged(twoj, twom, twom1, twom2);
                let expected = if dj % 2 != 0 { plain.negated() } else { plain };
                assert_eq!(exchanged, expected);
            }
        }
    }
}

#[test]
fn table_built_in_exchanged_order_answers_in_caller_order() {
    // (j1=1, j2=3/2) is stored internally as (3/2, 1); queries must still
    // answer in the caller's operand order.
    let swapped = Table::build(2, 3).unwrap();
    let canonical = Table::build(3, 2).unwrap();
    assert_eq!(swapped.twoj1(), 2);
    assert_eq!(swapped.twoj2(), 3);
    for twoj in j_values(&canonical) {
        for twom in doubled_m_values(twoj) {
            for twom1 in doubled_m_values(2) {
                let twom2 = twom - twom1;
                // <1,m1; 3/2,m2 | j,m> = exchanged query on the canonical table.
                assert_eq!(
                    swapped.query(twoj, twom, twom1, twom2),
                    canonical.query_exchanged(twoj, twom, twom2, twom1),
                    "twoj={twoj} twom={twom} twom1={twom1}"
                );
                // Swapping roles twice is the identity.
                assert_eq!(
                    swapped.query_exchanged(twoj, twom, twom1, twom2),
                    canonical.query(twoj, twom, twom2, twom1)
                );
            }
        }
    }
}

#[test]
fn invalid_combinations_yield_zero() {
    let table = Table::build(2, 1).unwrap();
    // m != m1 + m2.
    assert!(table.query(3, 1, 2, 1).is_zero());
    // |m| > j.
    assert!(table.query(1, 3, 2, 1).is_zero());
    // j outside the triangle range.
    assert!(table.query(5, 1, 0, 1).is_zero());
    assert!(table.query(-1, 0, 1, -1).is_zero());
    // Parity mismatch between j and the table's j1 + j2.
    assert!(table.query(2, 0, 1, -1).is_zero());
    // |m1| > j1 or |m2| > j2.
    assert!(table.query(3, 3, 4, -1).is_zero());
    assert!(table.query(3, 3, 0, 3).is_zero());
}
