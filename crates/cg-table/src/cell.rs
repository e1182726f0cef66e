//! Cells of the coefficient table.

use cg_core::SignedSquare;

/// All coefficients for one fixed pair (j, m), indexed by m1.
///
/// The owning column fixes j, the cell's row fixes m. The stored sequence
/// holds one signed-square value per valid doubled m1, ordered by decreasing
/// m1 (index 0 holds the maximal m1).
#[derive(Debug)]
pub(crate) struct Cell {
    /// Inclusive doubled-m1 range, from the triangle constraints
    /// -j1 <= m1 <= j1 and -j2 <= m-m1 <= j2.
    min_twom1: i32,
    max_twom1: i32,
    coeffs: Box<[SignedSquare]>,
}

/// Valid doubled-m1 bounds for a cell at total doubled m, taking the tighter
/// of max(m-j2, -j1) <= m1 <= min(m+j2, j1).
pub(crate) fn m1_range(twoj1: i32, twoj2: i32, twom: i32) -> (i32, i32) {
    let min = (-twoj1).max(twom - twoj2);
    let max = twoj1.min(twom + twoj2);
    (min, max)
}

impl Cell {
    pub(crate) fn new(min_twom1: i32, max_twom1: i32, coeffs: Vec<SignedSquare>) -> Self {
        debug_assert_eq!(coeffs.len(), ((max_twom1 - min_twom1) / 2 + 1) as usize);
        Self {
            min_twom1,
            max_twom1,
            coeffs: coeffs.into_boxed_slice(),
        }
    }

    /// Range plus parity check for a doubled m1 value.
    pub(crate) fn is_valid_twom1(&self, twom1: i32) -> bool {
        twom1 >= self.min_twom1 && twom1 <= self.max_twom1 && (self.max_twom1 - twom1) % 2 == 0
    }

    /// Coefficient for a doubled m1 value; callers must check
    /// [`Cell::is_valid_twom1`] first.
    pub(crate) fn get(&self, twom1: i32) -> &SignedSquare {
        debug_assert!(self.is_valid_twom1(twom1));
        &self.coeffs[((self.max_twom1 - twom1) / 2) as usize]
    }

    /// Coefficient by index, index 0 holding the maximal m1.
    pub(crate) fn coeff(&self, idx: usize) -> &SignedSquare {
        &self.coeffs[idx]
    }
}
