use crate::UpdateGuard;

/// Proof of holding the [`UpdateGuard`].
///
/// Dropping the permit releases the guard, including on early return,
/// timeout and unwinding.
#[derive(Debug)]
pub struct UpdatePermit {
    guard: UpdateGuard,
}

impl UpdatePermit {
    /// Returns `None` when another update transaction holds the guard.
    pub fn acquire(guard: &UpdateGuard) -> Option<Self> {
        guard.try_acquire().then(|| Self {
            guard: guard.clone(),
        })
    }
}

impl Drop for UpdatePermit {
    fn drop(&mut self) {
        self.guard.release();
        log::debug!("Update guard released");
    }
}
