//! Stale-response detection.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing generation numbers; only the most recent one is
/// current.
#[derive(Debug, Default)]
pub struct GenerationGuard {
    latest: AtomicU64,
}

impl GenerationGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new operation, making every earlier generation stale.
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::Acquire) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_generation_is_current() {
        let guard = GenerationGuard::new();
        let first = guard.begin();
        assert!(guard.is_current(first));

        let second = guard.begin();
        assert!(second > first);
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn nothing_is_current_before_first_begin() {
        let guard = GenerationGuard::new();
        assert!(!guard.is_current(1));
    }
}
