//! The coefficient table and its concurrent construction.

use std::sync::{Mutex, PoisonError};

use cg_core::{CgError, ErrorInfo, SignedSquare};

use crate::cell::Cell;
use crate::column::{self, Column, ABORTED};

/// An exact Clebsch-Gordan coefficient table for one (j1, j2) pair.
///
/// The table is immutable once [`Table::build`] returns; queries only copy
/// values out. Internally j1 >= j2 always holds, and an `exchanged` flag
/// records whether the caller supplied the pair in the opposite order so
/// queries can transparently swap the operand roles back.
#[derive(Debug)]
pub struct Table {
    exchanged: bool,
    pub(crate) twoj1: i32,
    pub(crate) twoj2: i32,
    pub(crate) columns: Vec<Column>,
}

impl Table {
    /// Computes the full table for the given doubled j1 and j2.
    ///
    /// Both arguments must be positive; non-positive values are rejected as
    /// [`CgError::Input`]. The call blocks until every coefficient is
    /// computed, running one task per column on a dedicated pool: column dj
    /// waits for dj diagonal dependencies on smaller columns, seeds its top
    /// cell, then fills downward while releasing later columns.
    pub fn build(twoj1: i32, twoj2: i32) -> Result<Self, CgError> {
        if twoj1 <= 0 || twoj2 <= 0 {
            return Err(CgError::Input(
                ErrorInfo::new("non-positive-j", "j1 and j2 must be positive half integers")
                    .with_context("twoj1", twoj1.to_string())
                    .with_context("twoj2", twoj2.to_string()),
            ));
        }
        let exchanged = twoj1 < twoj2;
        let (twoj1, twoj2) = if exchanged {
            (twoj2, twoj1)
        } else {
            (twoj1, twoj2)
        };
        let columns = (0..=twoj2)
            .map(|dj| Column::new(twoj1, twoj2, dj))
            .collect::<Vec<_>>();
        let table = Table {
            exchanged,
            twoj1,
            twoj2,
            columns,
        };

        // Column tasks block on their latches, so the pool must be able to
        // run every column at once.
        let ncols = table.columns.len();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(ncols)
            .build()
            .map_err(|err| {
                CgError::Invariant(ErrorInfo::new("thread-pool", err.to_string()))
            })?;
        let failures: Mutex<Vec<Option<CgError>>> = Mutex::new(vec![None; ncols]);
        pool.scope(|scope| {
            let table = &table;
            let failures = &failures;
            for dj in 0..ncols {
                scope.spawn(move |_| {
                    if let Err(err) = column::compute(table, dj) {
                        table.poison_all();
                        let mut slots =
                            failures.lock().unwrap_or_else(PoisonError::into_inner);
                        slots[dj] = Some(err);
                    }
                });
            }
        });

        let failures = failures.into_inner().unwrap_or_else(PoisonError::into_inner);
        let mut aborted = None;
        for err in failures.into_iter().flatten() {
            if err.info().code == ABORTED {
                aborted = Some(err);
            } else {
                return Err(err);
            }
        }
        if let Some(err) = aborted {
            return Err(err);
        }
        Ok(table)
    }

    /// Doubled j1 in the order the caller supplied it.
    pub fn twoj1(&self) -> i32 {
        if self.exchanged {
            self.twoj2
        } else {
            self.twoj1
        }
    }

    /// Doubled j2 in the order the caller supplied it.
    pub fn twoj2(&self) -> i32 {
        if self.exchanged {
            self.twoj1
        } else {
            self.twoj2
        }
    }

    /// Finished cell of a smaller column at diagonal position dm, i.e. the
    /// cell of state |j1+j2-dj, j1+j2-dm>.
    pub(crate) fn peer(&self, dj: usize, dm: usize) -> Result<&Cell, CgError> {
        self.columns[dj].cells[dm - dj].get().ok_or_else(|| {
            CgError::Invariant(
                ErrorInfo::new("cell-not-ready", "dependency cell read before publication")
                    .with_context("column", dj.to_string())
                    .with_context("dm", dm.to_string()),
            )
        })
    }

    fn poison_all(&self) {
        for col in &self.columns {
            col.latch.poison();
        }
    }

    /// Returns ⟨j1,m1;j2,m2|j,m⟩ in signed-square encoding, where j1 and j2
    /// are the values used to create this table, in that order. All
    /// arguments are doubled. Structurally invalid combinations yield the
    /// exact zero.
    pub fn query(&self, twoj: i32, twom: i32, twom1: i32, twom2: i32) -> SignedSquare {
        self.query_inner(twoj, twom, twom1, twom2, false)
    }

    /// Returns ⟨j2,m2;j1,m1|j,m⟩ over the same storage, i.e. the query with
    /// the two operands' roles swapped.
    pub fn query_exchanged(&self, twoj: i32, twom: i32, twom1: i32, twom2: i32) -> SignedSquare {
        self.query_inner(twoj, twom, twom1, twom2, true)
    }

    fn query_inner(
        &self,
        twoj: i32,
        mut twom: i32,
        mut twom1: i32,
        twom2: i32,
        exchanged_query: bool,
    ) -> SignedSquare {
        let dj = self.twoj1 + self.twoj2 - twoj;
        if dj % 2 != 0 || twom != twom1 + twom2 {
            return SignedSquare::zero();
        }
        let dj = dj / 2;
        if dj < 0 || dj > self.twoj2 {
            return SignedSquare::zero();
        }
        let col = &self.columns[dj as usize];
        let mut m_negated = false;
        if twom < 0 {
            m_negated = true;
            twom = -twom;
            twom1 = -twom1;
        }
        // Storage is indexed in canonical (j1 >= j2) operand order.
        if self.exchanged {
            twom1 = twom - twom1;
        }
        let dm = self.twoj1 + self.twoj2 - twom;
        if dm % 2 != 0 {
            return SignedSquare::zero();
        }
        let row = dm / 2 - dj;
        if row < 0 || row as usize >= col.cells.len() {
            return SignedSquare::zero();
        }
        let cell = match col.cells[row as usize].get() {
            Some(cell) => cell,
            None => return SignedSquare::zero(),
        };
        if !cell.is_valid_twom1(twom1) {
            return SignedSquare::zero();
        }
        let value = cell.get(twom1).clone();
        // Symmetry phases:
        // 1. ⟨j1,m1;j2,m2|j,m⟩ = (-1)^{j1+j2-j} ⟨j2,m2;j1,m1|j,m⟩
        // 2. ⟨j1,-m1;j2,-m2|j,-m⟩ = (-1)^{j1+j2-j} ⟨j1,m1;j2,m2|j,m⟩
        // Each actual operand swap or m negation toggles one application;
        // the net phase lands once when the XOR is odd.
        if (m_negated != (self.exchanged != exchanged_query)) && dj % 2 != 0 {
            value.negated()
        } else {
            value
        }
    }
}
