// SPDX-License-Identifier: Apache-2.0 OR MIT
// Pluggable mutual exclusion around dispatch and administration

use super::LogError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// User-supplied lock hook
///
/// `lock(true)` acquires, `lock(false)` releases. Returning
/// [`LogError::Busy`] from an acquire makes the logger drop the current
/// event instead of waiting. Release is only called after a successful
/// acquire, exactly once.
///
/// The logger never holds the lock while it runs a sink or the prefix
/// function, so a non-recursive lock is sufficient even when those log.
pub trait LockAdapter: Send + Sync {
    fn lock(&self, acquire: bool) -> Result<(), LogError>;
}

impl<F> LockAdapter for F
where
    F: Fn(bool) -> Result<(), LogError> + Send + Sync,
{
    fn lock(&self, acquire: bool) -> Result<(), LogError> {
        self(acquire)
    }
}

/// Scoped acquisition; releases on drop
pub(crate) struct LockGuard {
    adapter: Arc<dyn LockAdapter>,
}

impl LockGuard {
    pub(crate) fn acquire(adapter: &Arc<dyn LockAdapter>) -> Result<Self, LogError> {
        adapter.lock(true)?;
        Ok(Self {
            adapter: Arc::clone(adapter),
        })
    }

    /// Acquire if an adapter is registered; `Ok(None)` means unsynchronized
    pub(crate) fn acquire_opt(adapter: Option<&Arc<dyn LockAdapter>>) -> Result<Option<Self>, LogError> {
        adapter.map(Self::acquire).transpose()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        // Nothing useful can be done with a failed release here
        let _ = self.adapter.lock(false);
    }
}

/// Blocking, non-recursive lock built on a mutex and condition variable
#[derive(Debug, Default)]
pub struct BlockingLock {
    held: Mutex<bool>,
    released: Condvar,
}

impl BlockingLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockAdapter for BlockingLock {
    fn lock(&self, acquire: bool) -> Result<(), LogError> {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        if acquire {
            while *held {
                held = self
                    .released
                    .wait(held)
                    .unwrap_or_else(PoisonError::into_inner);
            }
            *held = true;
        } else {
            if !*held {
                return Err(LogError::Failed);
            }
            *held = false;
            self.released.notify_one();
        }
        Ok(())
    }
}

/// Non-blocking lock; a contended acquire returns [`LogError::Busy`]
#[derive(Debug, Default)]
pub struct TryLock {
    held: AtomicBool,
}

impl TryLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}

impl LockAdapter for TryLock {
    fn lock(&self, acquire: bool) -> Result<(), LogError> {
        if acquire {
            self.held
                .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
                .map(|_| ())
                .map_err(|_| LogError::Busy)
        } else if self.held.swap(false, Ordering::Release) {
            Ok(())
        } else {
            Err(LogError::Failed)
        }
    }
}
