//! Test fixtures for dynseq development.
//!
//! Provides [`Tracked`], an element type that counts live instances and can
//! be armed to panic partway through a batch of clones. Counters are
//! thread-local, and the default test harness runs each test on its own
//! thread, so tests do not see each other's counts.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
    static CLONES: Cell<usize> = const { Cell::new(0) };
    static CLONE_BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Message carried by the panic raised when the clone budget runs out.
pub const CLONE_PANIC: &str = "Tracked: clone budget exhausted";

/// Integer wrapper whose constructions, clones and drops are counted.
///
/// Every way of producing a `Tracked` increments the live count and every
/// drop decrements it, so a balanced count after a test proves nothing
/// leaked and nothing was dropped twice.
#[derive(Debug, PartialEq, Eq)]
pub struct Tracked {
    pub value: i32,
}

impl Tracked {
    pub fn new(value: i32) -> Self {
        LIVE.with(|live| live.set(live.get() + 1));
        Self { value }
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        CLONE_BUDGET.with(|budget| match budget.get() {
            Some(0) => panic!("{CLONE_PANIC}"),
            Some(n) => budget.set(Some(n - 1)),
            None => {}
        });
        CLONES.with(|clones| clones.set(clones.get() + 1));
        Self::new(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get() - 1));
    }
}

/// Number of `Tracked` values currently alive on this thread.
pub fn live_count() -> isize {
    LIVE.with(Cell::get)
}

/// Number of successful `Tracked` clones on this thread.
pub fn clone_count() -> usize {
    CLONES.with(Cell::get)
}

/// Allow `n` more clones, then panic on the next one.
pub fn arm_clone_budget(n: usize) {
    CLONE_BUDGET.with(|budget| budget.set(Some(n)));
}

/// Remove the clone budget.
pub fn disarm_clone_budget() {
    CLONE_BUDGET.with(|budget| budget.set(None));
}

/// Build `Tracked` values from plain integers.
pub fn tracked(values: &[i32]) -> Vec<Tracked> {
    values.iter().copied().map(Tracked::new).collect()
}

/// Collect the first `len` values of anything indexable by position.
pub fn values_of<F>(len: usize, get: F) -> Vec<i32>
where
    F: Fn(usize) -> i32,
{
    (0..len).map(get).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_count_balances() {
        let base = live_count();
        {
            let a = Tracked::new(1);
            let _b = a.clone();
            assert_eq!(live_count(), base + 2);
        }
        assert_eq!(live_count(), base);
    }

    #[test]
    fn budget_panics_after_n_clones() {
        let a = Tracked::new(1);
        arm_clone_budget(1);
        let _b = a.clone();
        let result = std::panic::catch_unwind(|| a.clone());
        disarm_clone_budget();
        assert!(result.is_err());
    }
}
