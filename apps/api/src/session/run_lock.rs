use std::sync::atomic::{AtomicBool, Ordering};

/// At most one analysis per session. Acquired with a compare-and-swap, released
/// when the guard drops (including when the request future is cancelled).
#[derive(Debug, Default)]
pub struct RunLock {
    busy: AtomicBool,
}

impl RunLock {
    /// Returns `None` if a run is already in progress.
    pub fn try_acquire(&self) -> Option<RunGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| RunGuard { lock: self })
    }
}

#[derive(Debug)]
pub struct RunGuard<'a> {
    lock: &'a RunLock,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.lock.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails_while_held() {
        let lock = RunLock::default();
        let guard = lock.try_acquire();
        assert!(guard.is_some());
        assert!(lock.try_acquire().is_none());
    }

    #[test]
    fn test_drop_releases() {
        let lock = RunLock::default();
        drop(lock.try_acquire());
        assert!(lock.try_acquire().is_some());
        assert!(lock.try_acquire().is_some());
    }
}
