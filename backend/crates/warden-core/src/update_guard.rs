use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Exclusive "update in progress" flag shared by manual and automatic callers.
///
/// Clones share the same flag. Prefer [`crate::UpdatePermit::acquire`] over
/// calling [`UpdateGuard::try_acquire`] directly so the flag is always
/// cleared on exit.
#[derive(Debug, Clone, Default)]
pub struct UpdateGuard {
    held: Arc<AtomicBool>,
}

impl UpdateGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single compare-and-set; `true` when this caller now holds the guard.
    pub fn try_acquire(&self) -> bool {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Clear the guard unconditionally.
    pub fn release(&self) {
        self.held.store(false, Ordering::Release);
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}
