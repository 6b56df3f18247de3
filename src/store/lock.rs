//! store::lock
//!
//! Exclusive lock serializing synchronize across processes.
//!
//! # Architecture
//!
//! Several processes (the initiator daemon, management tools) keep their own
//! copy of the configuration tree. Each synchronize is a read-merge-write of
//! the shared document, and two of those must never interleave. This lock
//! provides that exclusion with an OS-level file lock on a sibling of the
//! document.
//!
//! # Invariants
//!
//! - Held only for the duration of one read-merge-write
//! - Acquisition polls until a deadline, then fails with [`LockError::Timeout`]
//! - Released on drop (RAII)
//! - Readers never take it; atomic rename already protects them
//!
//! # Example
//!
//! ```ignore
//! use iscsi_config::store::lock::SyncLock;
//! use std::time::Duration;
//!
//! let lock = SyncLock::acquire(&paths, Duration::from_secs(10))?;
//! // read, merge, write
//! drop(lock);
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use fs2::FileExt;
use thiserror::Error;

use crate::core::paths::ConfigPaths;

/// Polling interval while waiting for the lock (50ms).
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process kept the lock for the whole wait.
    #[error("configuration lock '{path}' still held after {waited:?}")]
    Timeout { path: PathBuf, waited: Duration },

    /// Failed to create the lock file or its directory.
    #[error("failed to create lock '{path}': {source}")]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The OS refused the lock for a reason other than contention.
    #[error("failed to acquire lock '{path}': {source}")]
    AcquireFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to release the lock.
    #[error("failed to release lock '{path}': {source}")]
    ReleaseFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// An exclusive lock on the configuration document.
#[derive(Debug)]
pub struct SyncLock {
    /// Path to the lock file.
    path: PathBuf,
    /// The open file handle with the lock held.
    file: Option<File>,
}

impl SyncLock {
    /// Acquire the lock, waiting up to `timeout`.
    ///
    /// Creates the document directory if needed. Polls every 50ms while
    /// another holder has the lock. A zero timeout makes a single attempt.
    ///
    /// # Errors
    ///
    /// - [`LockError::Timeout`] if the lock is still held at the deadline
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock call fails
    pub fn acquire(paths: &ConfigPaths, timeout: Duration) -> Result<Self, LockError> {
        let dir = paths.directory();
        fs::create_dir_all(dir).map_err(|source| LockError::CreateFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = paths.lock_path();
        let started = Instant::now();
        let deadline = started + timeout;

        loop {
            if let Some(lock) = Self::try_acquire_at(&path)? {
                return Ok(lock);
            }

            if Instant::now() >= deadline {
                return Err(LockError::Timeout {
                    path,
                    waited: started.elapsed(),
                });
            }
            thread::sleep(LOCK_POLL_INTERVAL);
        }
    }

    /// Try to acquire the lock without waiting.
    ///
    /// Returns `Ok(None)` if another holder has it.
    pub fn try_acquire(paths: &ConfigPaths) -> Result<Option<Self>, LockError> {
        let dir = paths.directory();
        fs::create_dir_all(dir).map_err(|source| LockError::CreateFailed {
            path: dir.to_path_buf(),
            source,
        })?;

        Self::try_acquire_at(&paths.lock_path())
    }

    fn try_acquire_at(path: &Path) -> Result<Option<Self>, LockError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|source| LockError::CreateFailed {
                path: path.to_path_buf(),
                source,
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(Self {
                path: path.to_path_buf(),
                file: Some(file),
            })),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Ok(None),
            Err(source) => Err(LockError::AcquireFailed {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Whether this guard still holds the lock.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock before the guard is dropped.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            file.unlock().map_err(|source| LockError::ReleaseFailed {
                path: self.path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl Drop for SyncLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}
