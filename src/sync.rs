//! Cross-thread search control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared flag used to interrupt a running search from another thread.
#[derive(Clone, Debug, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    #[must_use]
    pub fn new() -> Self {
        InterruptFlag(Arc::new(AtomicBool::new(false)))
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cancellation inputs a strategy polls while searching.
///
/// Checking a deadline costs a clock read, so `should_stop` only consults
/// the clock every 1024 nodes; the interrupt flag is checked every call.
#[derive(Clone, Debug, Default)]
pub struct SearchSignals {
    pub interrupt: InterruptFlag,
    pub deadline: Option<Instant>,
}

impl SearchSignals {
    #[must_use]
    pub fn new() -> Self {
        SearchSignals::default()
    }

    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        SearchSignals {
            interrupt: InterruptFlag::new(),
            deadline: Some(deadline),
        }
    }

    /// True once the search should unwind and report its best-so-far move.
    #[must_use]
    pub fn should_stop(&self, nodes: u64) -> bool {
        if self.interrupt.is_raised() {
            return true;
        }
        match self.deadline {
            Some(deadline) => nodes.trailing_zeros() >= 10 && Instant::now() >= deadline,
            None => false,
        }
    }
}
