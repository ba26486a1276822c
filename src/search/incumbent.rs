//! Best-solution tracker shared by concurrent branches.

use crate::search::state::SearchState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Incumbent solution guarded by a single lock.
///
/// The cost is mirrored in an atomic so that the common, non-improving case
/// can be rejected without taking the lock. Any write happens under the lock
/// after re-checking against the locked value.
#[derive(Debug, Default)]
pub struct Incumbent {
    /// Cost of the current best (0 while none exists)
    best_cost: AtomicU64,
    best: Mutex<Option<SearchState>>,
}

impl Incumbent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a known solution, e.g. one found while building a frontier.
    pub fn seeded(state: Option<SearchState>) -> Self {
        let cost = state.as_ref().map_or(0, |s| s.cost);
        Self {
            best_cost: AtomicU64::new(cost),
            best: Mutex::new(state),
        }
    }

    /// Current best cost, used as the pruning threshold.
    pub fn cost(&self) -> u64 {
        self.best_cost.load(Ordering::SeqCst)
    }

    /// Offer a connected terminal state. Returns true if it became the incumbent.
    pub fn offer(&self, candidate: &SearchState) -> bool {
        // optimistic check, no lock
        if candidate.cost < self.cost() {
            return false;
        }
        let mut best = self.lock();
        if !candidate.improves_on(best.as_ref()) {
            return false;
        }
        *best = Some(candidate.clone());
        self.best_cost.store(candidate.cost, Ordering::SeqCst);
        true
    }

    /// Copy of the current best state.
    pub fn snapshot(&self) -> Option<SearchState> {
        self.lock().clone()
    }

    pub fn into_inner(self) -> Option<SearchState> {
        self.best
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, Option<SearchState>> {
        // the Option is replaced whole, so a poisoned lock still holds a valid value
        self.best
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
