//! core::types
//!
//! Strong types for configuration keys.
//!
//! # Types
//!
//! - [`TargetName`] - Validated target name (usually an IQN or EUI)
//! - [`PortalName`] - Validated portal key within a target
//! - [`Fingerprint`] - Content hash of a serialized configuration document
//!
//! # Validation
//!
//! Names are validated at construction time. A name that cannot be stored
//! as a document key cannot be represented.
//!
//! # Examples
//!
//! ```
//! use iscsi_config::core::types::{PortalName, TargetName};
//!
//! let target = TargetName::new("iqn.2015-01.com.example:disk0").unwrap();
//! let portal = PortalName::new("10.0.0.5").unwrap();
//! assert_eq!(target.as_str(), "iqn.2015-01.com.example:disk0");
//! assert_eq!(portal.as_str(), "10.0.0.5");
//!
//! assert!(TargetName::new("").is_err());
//! assert!(PortalName::new("  ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from value validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid initiator name: {0}")]
    InvalidInitiatorName(String),

    #[error("invalid target name: {0}")]
    InvalidTargetName(String),

    #[error("invalid portal name: {0}")]
    InvalidPortalName(String),

    #[error("invalid portal: {0}")]
    InvalidPortal(String),

    #[error("invalid session config: {0}")]
    InvalidSessionConfig(String),

    #[error("invalid connection config: {0}")]
    InvalidConnectionConfig(String),

    #[error("invalid authentication: {0}")]
    InvalidAuth(String),
}

/// Checks shared by every key stored in the document.
///
/// Returns a description of the first violation.
fn check_key(kind: &str, name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{kind} cannot be empty"));
    }
    if name.trim().is_empty() {
        return Err(format!("{kind} cannot be only whitespace"));
    }
    if name != name.trim() {
        return Err(format!("{kind} cannot have leading or trailing whitespace"));
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(format!("{kind} cannot contain control characters"));
    }
    Ok(())
}

/// A validated target name.
///
/// Target names are the top-level keys under `Targets`. They are usually
/// IQN (`iqn.2015-01.com.example:disk0`) or EUI (`eui.02004567A425678D`)
/// names, but any non-empty printable string is accepted so that targets
/// discovered with unusual names can still be stored.
///
/// # Example
///
/// ```
/// use iscsi_config::core::types::TargetName;
///
/// let name = TargetName::new("iqn.target.1").unwrap();
/// assert_eq!(name.to_string(), "iqn.target.1");
///
/// assert!(TargetName::new("").is_err());
/// assert!(TargetName::new(" padded ").is_err());
/// assert!(TargetName::new("tab\tname").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetName(String);

impl TargetName {
    /// Create a new validated target name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidTargetName` if the name is empty,
    /// padded with whitespace, or contains control characters.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        check_key("target name", &name).map_err(ValidationError::InvalidTargetName)?;
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this looks like an IQN-format name.
    pub fn is_iqn(&self) -> bool {
        self.0.starts_with("iqn.")
    }
}

impl TryFrom<String> for TargetName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetName> for String {
    fn from(name: TargetName) -> Self {
        name.0
    }
}

impl AsRef<str> for TargetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TargetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated portal name.
///
/// Portal names key a portal entry within one target. By convention the
/// name is the portal's address (IPv4, IPv6 or DNS name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PortalName(String);

impl PortalName {
    /// Create a new validated portal name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPortalName` under the same rules as
    /// [`TargetName::new`].
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        check_key("portal name", &name).map_err(ValidationError::InvalidPortalName)?;
        Ok(Self(name))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PortalName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PortalName> for String {
    fn from(name: PortalName) -> Self {
        name.0
    }
}

impl AsRef<str> for PortalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PortalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate an initiator name.
///
/// The initiator name is not a document key, but it goes on the wire during
/// login, so it follows the same rules as target names.
pub fn validate_initiator_name(name: &str) -> Result<(), ValidationError> {
    check_key("initiator name", name).map_err(ValidationError::InvalidInitiatorName)
}

/// Content hash of a serialized configuration document.
///
/// Two documents with the same fingerprint serialize to the same bytes.
/// The store uses this to report what it wrote and to skip rewriting a
/// document that a merge left unchanged.
///
/// # Example
///
/// ```
/// use iscsi_config::core::types::Fingerprint;
///
/// let a = Fingerprint::compute(b"{}");
/// let b = Fingerprint::compute(b"{}");
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint over raw document bytes.
    pub fn compute(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
