//! core::schema
//!
//! Configuration record types and the persisted document layout.
//!
//! # Records
//!
//! The records handed to callers are plain values. Getters on the store
//! return clones, so mutating a record never affects the store until it is
//! explicitly set back.
//!
//! - [`Portal`] - Network address of a target portal
//! - [`SessionConfig`] - Session-wide negotiable parameters for a target
//! - [`ConnectionConfig`] - Per-portal connection parameters
//! - [`AuthConfig`] - Per-portal authentication method and credentials
//!
//! # Document
//!
//! ```json
//! {
//!   "Initiator": { "Name": "iqn.initiator.test", "Alias": "lab-host" },
//!   "Targets": {
//!     "iqn.target.1": {
//!       "SessionConfig": { "ErrorRecoveryLevel": "Session", "MaxConnections": 1 },
//!       "Portals": {
//!         "portal1": {
//!           "Portal": { "Address": "10.0.0.5", "Port": "3260", "HostInterface": "en0" },
//!           "AuthConfig": { "Method": "CHAP", "User": "alice", "Secret": "" }
//!         }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Optional members are omitted when absent. Unknown document fields are
//! rejected when parsing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::{validate_initiator_name, PortalName, TargetName, ValidationError};

/// Well-known iSCSI port.
pub const DEFAULT_PORT: &str = "3260";

/// Host interface used when a portal does not name one.
pub const DEFAULT_HOST_INTERFACE: &str = "en0";

/// Bounds for MaxRecvDataSegmentLength (RFC 7143 section 13.12).
pub const MIN_RECV_DATA_SEGMENT_LENGTH: u32 = 512;
pub const MAX_RECV_DATA_SEGMENT_LENGTH: u32 = 16_777_215;

fn default_port() -> String {
    DEFAULT_PORT.to_string()
}

fn default_host_interface() -> String {
    DEFAULT_HOST_INTERFACE.to_string()
}

// =============================================================================
// Records
// =============================================================================

/// A network portal through which a target is reachable.
///
/// # Example
///
/// ```
/// use iscsi_config::core::schema::Portal;
///
/// let portal = Portal::new("10.0.0.5");
/// assert_eq!(portal.port, "3260");
/// assert!(portal.validate().is_ok());
///
/// let bad = Portal::new("10.0.0.5").with_port("iscsi");
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Portal {
    /// IPv4 address, IPv6 address or DNS name.
    pub address: String,

    /// TCP port, kept as text the way it is entered by management tools.
    #[serde(default = "default_port")]
    pub port: String,

    /// Local interface used to reach the portal.
    #[serde(default = "default_host_interface")]
    pub host_interface: String,
}

impl Portal {
    /// Create a portal on the default port and host interface.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: default_port(),
            host_interface: default_host_interface(),
        }
    }

    /// Replace the port.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = port.into();
        self
    }

    /// Replace the host interface.
    pub fn with_host_interface(mut self, host_interface: impl Into<String>) -> Self {
        self.host_interface = host_interface.into();
        self
    }

    /// The port as a number.
    ///
    /// Returns `None` if the port is not a valid non-zero TCP port.
    pub fn port_number(&self) -> Option<u16> {
        self.port.parse::<u16>().ok().filter(|p| *p != 0)
    }

    /// Validate the portal.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPortal` if the address is blank or
    /// the port is not in `1..=65535`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.address.trim().is_empty() {
            return Err(ValidationError::InvalidPortal(
                "address cannot be empty".to_string(),
            ));
        }
        if self.port_number().is_none() {
            return Err(ValidationError::InvalidPortal(format!(
                "port '{}' is not a valid TCP port",
                self.port
            )));
        }
        Ok(())
    }
}

/// Error recovery level negotiated for a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorRecoveryLevel {
    /// Level 0: session recovery only.
    #[default]
    Session,
    /// Level 1: digest failure recovery.
    Digest,
    /// Level 2: connection recovery.
    Connection,
}

impl ErrorRecoveryLevel {
    /// Numeric level as used on the wire.
    pub fn level(self) -> u8 {
        match self {
            Self::Session => 0,
            Self::Digest => 1,
            Self::Connection => 2,
        }
    }
}

/// Session-wide negotiable parameters for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Requested error recovery level.
    pub error_recovery_level: ErrorRecoveryLevel,

    /// Maximum number of connections in the session.
    pub max_connections: u32,

    /// Portal group to log in through, if pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_portal_group_tag: Option<u16>,

    /// Target session identifying handle (TSIH) of the last session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_session_id: Option<u16>,

    /// Connection ID (CID) of the leading connection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<u16>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            error_recovery_level: ErrorRecoveryLevel::Session,
            max_connections: 1,
            target_portal_group_tag: None,
            target_session_id: None,
            connection_id: None,
        }
    }
}

impl SessionConfig {
    /// Validate the session parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_connections == 0 || self.max_connections > u32::from(u16::MAX) {
            return Err(ValidationError::InvalidSessionConfig(format!(
                "max connections must be between 1 and {}, got {}",
                u16::MAX,
                self.max_connections
            )));
        }
        Ok(())
    }
}

/// Digest applied to PDU headers or data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Digest {
    #[default]
    None,
    #[serde(rename = "CRC32C")]
    Crc32c,
}

/// Per-portal connection parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct ConnectionConfig {
    pub header_digest: Digest,

    pub data_digest: Digest,

    /// Largest data segment the initiator will accept, in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_recv_data_segment_length: Option<u32>,

    /// Login timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_timeout: Option<u32>,
}

impl ConnectionConfig {
    /// Validate the connection parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(len) = self.max_recv_data_segment_length {
            if !(MIN_RECV_DATA_SEGMENT_LENGTH..=MAX_RECV_DATA_SEGMENT_LENGTH).contains(&len) {
                return Err(ValidationError::InvalidConnectionConfig(format!(
                    "max recv data segment length must be between {} and {}, got {}",
                    MIN_RECV_DATA_SEGMENT_LENGTH, MAX_RECV_DATA_SEGMENT_LENGTH, len
                )));
            }
        }
        if self.login_timeout == Some(0) {
            return Err(ValidationError::InvalidConnectionConfig(
                "login timeout cannot be zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Credentials the target presents back for mutual CHAP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct MutualChap {
    pub user: String,
    #[serde(default)]
    pub secret: String,
}

/// CHAP credentials for one portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Chap {
    pub user: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutual: Option<MutualChap>,
}

impl Chap {
    /// One-way CHAP credentials.
    pub fn new(user: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            secret: secret.into(),
            mutual: None,
        }
    }
}

/// Authentication method and credentials for one portal.
///
/// Secrets are stored as given. The store never logs them and never
/// includes them in error messages.
///
/// # Example
///
/// ```
/// use iscsi_config::core::schema::{AuthConfig, Chap};
///
/// let auth = AuthConfig::Chap(Chap::new("alice", "twelve-bytes"));
/// assert_eq!(auth.user(), Some("alice"));
/// assert_eq!(auth.method(), "CHAP");
/// assert_eq!(AuthConfig::None.user(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AuthRecord", into = "AuthRecord")]
pub enum AuthConfig {
    #[default]
    None,
    Chap(Chap),
}

/// Stored form of [`AuthConfig`], tagged by `Method`.
///
/// `None` is an empty struct variant so that stray members next to
/// `"Method": "None"` are rejected instead of ignored.
#[derive(Serialize, Deserialize)]
#[serde(tag = "Method", deny_unknown_fields)]
enum AuthRecord {
    None {},
    #[serde(rename = "CHAP")]
    Chap(Chap),
}

impl From<AuthRecord> for AuthConfig {
    fn from(record: AuthRecord) -> Self {
        match record {
            AuthRecord::None {} => Self::None,
            AuthRecord::Chap(chap) => Self::Chap(chap),
        }
    }
}

impl From<AuthConfig> for AuthRecord {
    fn from(auth: AuthConfig) -> Self {
        match auth {
            AuthConfig::None => Self::None {},
            AuthConfig::Chap(chap) => Self::Chap(chap),
        }
    }
}

impl AuthConfig {
    /// Method name as stored in the document.
    pub fn method(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Chap(_) => "CHAP",
        }
    }

    /// User name the initiator authenticates with, if any.
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Chap(chap) => Some(&chap.user),
        }
    }

    /// Validate the authentication settings.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Self::Chap(chap) = self {
            if chap.user.trim().is_empty() {
                return Err(ValidationError::InvalidAuth(
                    "CHAP user cannot be empty".to_string(),
                ));
            }
            if let Some(mutual) = &chap.mutual {
                if mutual.user.trim().is_empty() {
                    return Err(ValidationError::InvalidAuth(
                        "mutual CHAP user cannot be empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Document
// =============================================================================

/// The `Initiator` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct InitiatorRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// Everything stored for one portal of one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct PortalEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal: Option<Portal>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_config: Option<ConnectionConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_config: Option<AuthConfig>,
}

/// Everything stored for one target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct TargetRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_config: Option<SessionConfig>,

    pub portals: BTreeMap<PortalName, PortalEntry>,
}

/// The whole persisted configuration tree.
///
/// Maps are ordered so that serialization is deterministic: the same tree
/// always produces the same bytes, and therefore the same fingerprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default, deny_unknown_fields)]
pub struct ConfigDocument {
    pub initiator: InitiatorRecord,

    pub targets: BTreeMap<TargetName, TargetRecord>,
}

impl ConfigDocument {
    /// Validate every record in the document.
    ///
    /// Keys are already validated by their types during parsing.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.initiator.name {
            validate_initiator_name(name)?;
        }

        for target in self.targets.values() {
            if let Some(session) = &target.session_config {
                session.validate()?;
            }
            for entry in target.portals.values() {
                if let Some(portal) = &entry.portal {
                    portal.validate()?;
                }
                if let Some(conn) = &entry.connection_config {
                    conn.validate()?;
                }
                if let Some(auth) = &entry.auth_config {
                    auth.validate()?;
                }
            }
        }

        Ok(())
    }

    /// Look up a portal entry.
    pub fn portal_entry(&self, target: &TargetName, portal: &PortalName) -> Option<&PortalEntry> {
        self.targets.get(target)?.portals.get(portal)
    }

    /// Get or create the record for a target.
    pub fn target_mut(&mut self, target: &TargetName) -> &mut TargetRecord {
        self.targets.entry(target.clone()).or_default()
    }

    /// Get or create the entry for a portal, creating the target too.
    pub fn portal_entry_mut(&mut self, target: &TargetName, portal: &PortalName) -> &mut PortalEntry {
        self.target_mut(target)
            .portals
            .entry(portal.clone())
            .or_default()
    }
}
