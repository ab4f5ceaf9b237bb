//! Advisory lock preventing concurrent runs against one project
//!
//! Acquisition never blocks: if another process holds the lock the caller
//! gets `ConcurrentInstallation` immediately and no state is touched.

use std::path::Path;

use fslock::LockFile;

use crate::error::{PlinthError, Result};

/// Lock file name inside the project state directory
pub const LOCK_FILE: &str = ".lock";

/// RAII guard; the lock is released on drop
#[derive(Debug)]
pub struct StateLock {
    lock: LockFile,
}

impl StateLock {
    /// Try to take the lock in `state_dir`
    ///
    /// # Errors
    ///
    /// `ConcurrentInstallation` if held elsewhere, `LockFailed` if the lock
    /// file cannot be opened.
    pub fn acquire(state_dir: &Path) -> Result<Self> {
        let lock_path = state_dir.join(LOCK_FILE);

        let mut lock = LockFile::open(&lock_path).map_err(|e| PlinthError::LockFailed {
            reason: format!("Failed to open lock file {}: {}", lock_path.display(), e),
        })?;

        let acquired = lock.try_lock().map_err(|e| PlinthError::LockFailed {
            reason: format!("Failed to try lock: {e}"),
        })?;

        if !acquired {
            return Err(PlinthError::ConcurrentInstallation {
                path: state_dir
                    .parent()
                    .unwrap_or(state_dir)
                    .display()
                    .to_string(),
            });
        }

        tracing::debug!(path = %lock_path.display(), "project lock acquired");
        Ok(Self { lock })
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        // The lock file itself is left in place
        let _ = self.lock.unlock();
    }
}
