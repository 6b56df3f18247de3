//! store::errors
//!
//! Error types for the configuration store.
//!
//! # Categories
//!
//! - **Validation**: a setter was given a malformed value; nothing changed
//! - **Persistence**: the document could not be read, parsed or written
//! - **Concurrency conflict**: the synchronize lock stayed busy
//!
//! Missing targets, portals and records are not errors. Getters report them
//! as `None`.
//!
//! Errors never contain record contents, so CHAP secrets cannot leak
//! through them.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::lock::LockError;
use crate::core::types::ValidationError;

/// Errors from configuration store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A setter was given a malformed value.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The document exists but could not be read.
    #[error("failed to read configuration '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not a valid configuration document.
    #[error("failed to parse configuration '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// The document could not be written.
    #[error("failed to write configuration '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The synchronize lock could not be taken.
    #[error("failed to lock configuration: {0}")]
    Lock(#[source] LockError),

    /// Another process held the synchronize lock for the whole wait.
    #[error("configuration '{path}' is being synchronized by another process (waited {waited:?})")]
    ConcurrencyConflict { path: PathBuf, waited: Duration },
}

impl StoreError {
    /// Whether this is a durable-storage failure.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Parse { .. } | Self::Write { .. } | Self::Lock(_)
        )
    }

    /// Whether the caller may reasonably retry the same call later.
    ///
    /// Validation and parse failures will fail again until something
    /// changes.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::Write { .. } | Self::Lock(_) | Self::ConcurrencyConflict { .. }
        )
    }
}

impl From<LockError> for StoreError {
    fn from(err: LockError) -> Self {
        match err {
            LockError::Timeout { path, waited } => Self::ConcurrencyConflict { path, waited },
            other => Self::Lock(other),
        }
    }
}
