//! Columns of the coefficient table and the two-phase fill algorithm.

use std::sync::OnceLock;

use cg_core::{CgError, ErrorInfo, SignedSquare};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed};

use crate::cell::{m1_range, Cell};
use crate::latch::Latch;
use crate::table::Table;

/// Error code used when a column aborts because another column failed.
pub(crate) const ABORTED: &str = "construction-aborted";

/// All cells for one fixed total angular momentum j = j1 + j2 - dj.
///
/// Cells are indexed by row, row 0 holding m = j and each following row
/// lowering m by one unit. Each cell slot is written exactly once by this
/// column's task and read by larger columns only after the corresponding
/// latch release, so no locking is needed on the storage itself.
#[derive(Debug)]
pub(crate) struct Column {
    pub(crate) dj: i32,
    pub(crate) twoj: i32,
    pub(crate) cells: Vec<OnceLock<Cell>>,
    /// Top-cell seeding waits on one completion per smaller column.
    pub(crate) latch: Latch,
}

impl Column {
    pub(crate) fn new(twoj1: i32, twoj2: i32, dj: i32) -> Self {
        let twoj = twoj1 + twoj2 - 2 * dj;
        let cell_count = ((twoj1 + twoj2) / 2 + 1 - dj) as usize;
        let mut cells = Vec::with_capacity(cell_count);
        cells.resize_with(cell_count, OnceLock::new);
        Self {
            dj,
            twoj,
            cells,
            latch: Latch::new(dj as usize),
        }
    }
}

/// Runs the full two-phase computation for one column: wait for the diagonal
/// dependencies, seed the top cell, then walk down the lowering-operator
/// ladder, releasing one dependency of column dj+i+1 after finishing row i+1.
pub(crate) fn compute(table: &Table, dj: usize) -> Result<(), CgError> {
    let col = &table.columns[dj];
    col.latch.wait().map_err(|_| {
        CgError::Invariant(ErrorInfo::new(
            ABORTED,
            "column aborted after a failure in another column",
        ))
    })?;

    let mut current = publish(col, 0, compute_top(table, dj)?)?;
    for i in 0..col.cells.len() - 1 {
        let next = lower_row(table, col, current, i)?;
        current = publish(col, i + 1, next)?;
        if let Some(dependent) = table.columns.get(dj + i + 1) {
            dependent.latch.count_down();
        }
    }
    Ok(())
}

fn publish(col: &Column, row: usize, cell: Cell) -> Result<&Cell, CgError> {
    if col.cells[row].set(cell).is_err() {
        return Err(cell_state_error(col.dj, row, "cell written twice"));
    }
    col.cells[row]
        .get()
        .ok_or_else(|| cell_state_error(col.dj, row, "cell missing after publication"))
}

fn cell_state_error(dj: i32, row: usize, message: &str) -> CgError {
    CgError::Invariant(
        ErrorInfo::new("cell-state", message)
            .with_context("column", dj.to_string())
            .with_context("row", row.to_string()),
    )
}

/// Phase 1: seeds the top cell (m = j) of column dj.
///
/// Entry 0 (maximal m1) is fixed by normalization: 1 minus the squared
/// magnitudes of the same-m diagonal peers of all smaller columns, with
/// positive sign by convention. Entries 1..=dj follow from orthogonality
/// against each peer.
fn compute_top(table: &Table, dj: usize) -> Result<Cell, CgError> {
    let col = &table.columns[dj];
    let (min_twom1, max_twom1) = m1_range(table.twoj1, table.twoj2, col.twoj);
    let len = ((max_twom1 - min_twom1) / 2 + 1) as usize;
    let mut coeffs = Vec::with_capacity(len);

    let mut c0 = BigRational::one();
    for peer_dj in 0..dj {
        let peer = table.peer(peer_dj, dj)?;
        c0 -= peer.coeff(0).magnitude_squared();
    }
    if !c0.is_positive() {
        return Err(CgError::Invariant(
            ErrorInfo::new(
                "normalization-non-positive",
                "squared magnitude of the top coefficient is not positive",
            )
            .with_context("column", dj.to_string())
            .with_context("value", c0.to_string()),
        ));
    }
    coeffs.push(SignedSquare::from_signed_square(c0.clone()));

    for l in 1..len {
        let mut acc = SignedSquare::zero();
        for peer_dj in 0..dj {
            let peer = table.peer(peer_dj, dj)?;
            acc = acc.combine(&peer.coeff(0).product(peer.coeff(l)))?;
        }
        coeffs.push(SignedSquare::from_signed_square(-(acc.signed_square() / &c0)));
    }
    Ok(Cell::new(min_twom1, max_twom1, coeffs))
}

/// Phase 2: derives row i+1 of the column from row i via the lowering
/// operator recursion
///
/// `c(m1, m-1) * N(j, m) = c(m1+1, m) * A(j1, m1) + c(m1, m) * A(j2, m2)`
///
/// with N(j,m) = sqrt((j+m)(j-m+1)) and A(j,m) = sqrt((j+1+m)(j-m)). All
/// three factors enter through their squares, so every intermediate stays in
/// the signed-square encoding. Terms whose source m1 falls outside the upper
/// cell's range contribute nothing.
fn lower_row(table: &Table, col: &Column, current: &Cell, i: usize) -> Result<Cell, CgError> {
    let twom = col.twoj - 2 * i as i32;
    let (min_twom1, max_twom1) = m1_range(table.twoj1, table.twoj2, twom - 2);
    let len = ((max_twom1 - min_twom1) / 2 + 1) as usize;
    let mut coeffs = Vec::with_capacity(len);
    for l in 0..len {
        let twom1 = max_twom1 - 2 * l as i32;
        let twom2 = twom - 2 - twom1;
        let mut value = SignedSquare::zero();
        if current.is_valid_twom1(twom1 + 2) {
            // A(j1, m1)^2 = (j1+1+m1)(j1-m1)
            let a1 = squared_prefactor(table.twoj1 + 2 + twom1, table.twoj1 - twom1);
            value = value.combine(&current.get(twom1 + 2).scaled(&a1))?;
        }
        if current.is_valid_twom1(twom1) {
            // A(j2, m2)^2 = (j2+1+m2)(j2-m2)
            let a2 = squared_prefactor(table.twoj2 + 2 + twom2, table.twoj2 - twom2);
            value = value.combine(&current.get(twom1).scaled(&a2))?;
        }
        // 1 / N(j, m)^2 = 1 / ((j+m)(j-m+1))
        let n2 = BigRational::new(
            BigInt::from(4),
            BigInt::from((col.twoj + 2 - twom) as i64 * (col.twoj + twom) as i64),
        );
        coeffs.push(value.scaled(&n2));
    }
    Ok(Cell::new(min_twom1, max_twom1, coeffs))
}

/// A squared lowering prefactor over doubled arguments: both inputs carry a
/// factor of two, hence the division by four.
fn squared_prefactor(a: i32, b: i32) -> BigRational {
    BigRational::new(BigInt::from(a as i64 * b as i64), BigInt::from(4))
}
