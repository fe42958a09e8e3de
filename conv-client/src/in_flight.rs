//! Single outstanding request flag.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether a submission is currently outstanding.
#[derive(Debug, Default)]
pub struct InFlight(AtomicBool);

impl InFlight {
    /// Claim the flag. Returns `None` if it is already held.
    ///
    /// The flag is released when the returned guard drops, whether the
    /// request finished, failed, panicked or was cancelled.
    pub fn try_acquire(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.0))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Holds the in-flight flag until dropped.
#[derive(Debug)]
#[must_use]
pub struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_until_release() {
        let flag = InFlight::default();
        assert!(!flag.is_active());

        let guard = flag.try_acquire();
        assert!(guard.is_some());
        assert!(flag.is_active());
        assert!(flag.try_acquire().is_none());

        drop(guard);
        assert!(!flag.is_active());
        assert!(flag.try_acquire().is_some());
    }
}
