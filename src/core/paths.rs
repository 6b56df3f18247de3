//! core::paths
//!
//! Centralized path routing for the configuration document.
//!
//! # Storage Layout
//!
//! Everything lives next to the document:
//! - `<name>.json` - The configuration document
//! - `<name>.json.lock` - Lock file held while synchronizing
//! - `<name>.json.tmp` - Temporary file renamed over the document
//!
//! **Hard rule:** no other module derives these paths itself. The lock and
//! temporary file must be in the same directory as the document, otherwise
//! the rename is not atomic.
//!
//! # Example
//!
//! ```
//! use iscsi_config::core::paths::ConfigPaths;
//! use std::path::PathBuf;
//!
//! let paths = ConfigPaths::new("/var/lib/iscsi-initiator/config.json");
//!
//! assert_eq!(
//!     paths.lock_path(),
//!     PathBuf::from("/var/lib/iscsi-initiator/config.json.lock")
//! );
//! assert_eq!(
//!     paths.temp_path(),
//!     PathBuf::from("/var/lib/iscsi-initiator/config.json.tmp")
//! );
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Paths derived from the document location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    document: PathBuf,
}

impl ConfigPaths {
    /// Route all storage through the given document path.
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            document: document.into(),
        }
    }

    /// The configuration document.
    pub fn document_path(&self) -> &Path {
        &self.document
    }

    /// Directory holding the document, lock and temporary file.
    ///
    /// A bare file name resolves to the current directory.
    pub fn directory(&self) -> &Path {
        match self.document.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Lock file serializing synchronize across processes.
    pub fn lock_path(&self) -> PathBuf {
        self.sibling("lock")
    }

    /// Temporary file written before the atomic rename.
    pub fn temp_path(&self) -> PathBuf {
        self.sibling("tmp")
    }

    /// Append a suffix to the full file name.
    ///
    /// `with_extension` would replace `.json` instead of extending it.
    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name: OsString = self
            .document
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("config"));
        name.push(".");
        name.push(suffix);
        self.directory().join(name)
    }
}
