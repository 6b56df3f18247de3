//! core::options
//!
//! Store options and where the document lives.
//!
//! # Document Location
//!
//! Resolved in this order:
//! 1. An explicit path passed by the caller
//! 2. `$ISCSI_CONFIG_PATH` if set and non-empty
//! 3. `/var/lib/iscsi-initiator/config.json`
//!
//! # Options File
//!
//! Daemons that want their settings on disk can load them from TOML:
//!
//! ```toml
//! document = "/var/lib/iscsi-initiator/config.json"
//! lock_timeout_ms = 5000
//! ```
//!
//! Every field is optional. Unknown fields are rejected.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::paths::ConfigPaths;

/// Environment variable overriding the document location.
pub const CONFIG_PATH_ENV: &str = "ISCSI_CONFIG_PATH";

/// System-wide document location.
pub const DEFAULT_DOCUMENT_PATH: &str = "/var/lib/iscsi-initiator/config.json";

/// Default bound on waiting for the synchronize lock (10 seconds).
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

/// Mode for the document. It holds CHAP secrets.
pub const DEFAULT_FILE_MODE: u32 = 0o600;

/// Errors from loading an options file.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("failed to read options file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse options file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid option value: {0}")]
    InvalidValue(String),
}

/// On-disk shape of an options file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsFile {
    /// Document path
    pub document: Option<PathBuf>,

    /// Lock wait bound in milliseconds
    pub lock_timeout_ms: Option<u64>,

    /// Unix mode applied to the document
    pub file_mode: Option<u32>,
}

/// Options for a [`ConfigStore`](crate::store::ConfigStore).
///
/// # Example
///
/// ```
/// use iscsi_config::core::options::StoreOptions;
/// use std::time::Duration;
///
/// let options = StoreOptions::at("/tmp/iscsi/config.json")
///     .with_lock_timeout(Duration::from_millis(250));
///
/// assert_eq!(options.lock_timeout(), Duration::from_millis(250));
/// assert!(options.paths().lock_path().ends_with("config.json.lock"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    paths: ConfigPaths,
    lock_timeout: Duration,
    file_mode: u32,
}

impl StoreOptions {
    /// Options for a document at an explicit path.
    pub fn at(document: impl Into<PathBuf>) -> Self {
        Self {
            paths: ConfigPaths::new(document),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            file_mode: DEFAULT_FILE_MODE,
        }
    }

    /// Options for the document at the resolved default location.
    pub fn from_env() -> Self {
        Self::at(Self::default_document_path())
    }

    /// Resolve the document location from the environment.
    pub fn default_document_path() -> PathBuf {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(DEFAULT_DOCUMENT_PATH),
        }
    }

    /// Load options from a TOML file.
    ///
    /// Fields missing from the file fall back to the environment and the
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds
    /// invalid values.
    pub fn load(path: &Path) -> Result<Self, OptionsError> {
        let contents = fs::read_to_string(path).map_err(|e| OptionsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: OptionsFile = toml::from_str(&contents).map_err(|e| OptionsError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_file(file)
    }

    /// Build options from a parsed options file.
    pub fn from_file(file: OptionsFile) -> Result<Self, OptionsError> {
        let mut options = match file.document {
            Some(document) => {
                if document.as_os_str().is_empty() {
                    return Err(OptionsError::InvalidValue(
                        "document path cannot be empty".to_string(),
                    ));
                }
                Self::at(document)
            }
            None => Self::from_env(),
        };

        if let Some(ms) = file.lock_timeout_ms {
            options.lock_timeout = Duration::from_millis(ms);
        }

        if let Some(mode) = file.file_mode {
            if mode > 0o777 {
                return Err(OptionsError::InvalidValue(format!(
                    "file mode {:o} has bits outside 0o777",
                    mode
                )));
            }
            options.file_mode = mode;
        }

        Ok(options)
    }

    /// Replace the lock wait bound.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Replace the document mode.
    pub fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    /// Derived storage paths.
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// Maximum time synchronize waits for the lock.
    pub fn lock_timeout(&self) -> Duration {
        self.lock_timeout
    }

    /// Unix mode applied to the document on write.
    pub fn file_mode(&self) -> u32 {
        self.file_mode
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_path_defaults() {
        let options = StoreOptions::at("/tmp/x/config.json");
        assert_eq!(
            options.paths().document_path(),
            Path::new("/tmp/x/config.json")
        );
        assert_eq!(options.lock_timeout(), DEFAULT_LOCK_TIMEOUT);
        assert_eq!(options.file_mode(), 0o600);
    }

    #[test]
    fn load_from_toml() {
        let temp = TempDir::new().unwrap();
        let options_path = temp.path().join("options.toml");
        let document = temp.path().join("config.json");

        fs::write(
            &options_path,
            format!(
                "document = {:?}\nlock_timeout_ms = 1500\n",
                document.to_str().unwrap()
            ),
        )
        .unwrap();

        let options = StoreOptions::load(&options_path).unwrap();
        assert_eq!(options.paths().document_path(), document.as_path());
        assert_eq!(options.lock_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn unknown_fields_rejected() {
        let temp = TempDir::new().unwrap();
        let options_path = temp.path().join("options.toml");
        fs::write(&options_path, "document = \"/a.json\"\nretries = 3\n").unwrap();

        let result = StoreOptions::load(&options_path);
        assert!(matches!(result, Err(OptionsError::ParseError { .. })));
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let result = StoreOptions::load(&temp.path().join("absent.toml"));
        assert!(matches!(result, Err(OptionsError::ReadError { .. })));
    }

    #[test]
    fn invalid_mode_rejected() {
        let file = OptionsFile {
            document: Some(PathBuf::from("/a.json")),
            file_mode: Some(0o7777),
            ..Default::default()
        };
        assert!(matches!(
            StoreOptions::from_file(file),
            Err(OptionsError::InvalidValue(_))
        ));
    }

    #[test]
    fn empty_document_rejected() {
        let file = OptionsFile {
            document: Some(PathBuf::new()),
            ..Default::default()
        };
        assert!(StoreOptions::from_file(file).is_err());
    }
}
