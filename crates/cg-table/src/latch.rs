//! Countdown latch for cross-column dependency wiring.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct LatchState {
    remaining: usize,
    poisoned: bool,
}

/// A countdown latch initialized to the number of dependencies a column has
/// on smaller columns. Each dependency completion counts it down once;
/// waiters block until the count reaches zero.
///
/// A latch can also be poisoned when construction aborts, which wakes every
/// waiter immediately so no column blocks forever on a producer that will
/// never finish.
#[derive(Debug)]
pub(crate) struct Latch {
    state: Mutex<LatchState>,
    cond: Condvar,
}

impl Latch {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            state: Mutex::new(LatchState {
                remaining: count,
                poisoned: false,
            }),
            cond: Condvar::new(),
        }
    }

    fn locked(&self) -> MutexGuard<'_, LatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks one dependency as satisfied.
    pub(crate) fn count_down(&self) {
        let mut state = self.locked();
        state.remaining = state.remaining.saturating_sub(1);
        if state.remaining == 0 {
            self.cond.notify_all();
        }
    }

    /// Wakes all waiters with a failure indication.
    pub(crate) fn poison(&self) {
        let mut state = self.locked();
        state.poisoned = true;
        self.cond.notify_all();
    }

    /// Blocks until the count reaches zero. Returns `Err` if the latch was
    /// poisoned before all dependencies completed.
    pub(crate) fn wait(&self) -> Result<(), ()> {
        let mut state = self.locked();
        while state.remaining > 0 && !state.poisoned {
            state = self
                .cond
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if state.poisoned {
            Err(())
        } else {
            Ok(())
        }
    }
}
