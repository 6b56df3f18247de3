//! store
//!
//! The hierarchical configuration store.
//!
//! # Architecture
//!
//! [`ConfigStore`] owns a private in-memory copy of the configuration
//! document and a set of the addresses it has modified. Getters and setters
//! work on the in-memory copy only. [`ConfigStore::synchronize`] commits the
//! modified addresses to the shared document:
//!
//! 1. Acquire the synchronize lock (bounded wait)
//! 2. Re-read the document from disk
//! 3. Copy the local value of every modified address into it
//! 4. Write the result to a temporary file and rename it over the document
//! 5. Adopt the merged document as the in-memory copy
//!
//! Addresses this store never touched keep whatever other processes wrote.
//! For addresses touched by several processes, the last to synchronize wins.
//!
//! # Lifecycle
//!
//! A store starts [`StoreState::Unloaded`]. The first accessor call reads the
//! document (or starts empty if there is none) and moves it to
//! [`StoreState::Loaded`], where it stays. Dropping a store discards
//! unsynchronized changes.
//!
//! # Example
//!
//! ```no_run
//! use iscsi_config::core::options::StoreOptions;
//! use iscsi_config::core::schema::{AuthConfig, Chap, Portal};
//! use iscsi_config::store::ConfigStore;
//!
//! let mut store = ConfigStore::new(StoreOptions::from_env());
//!
//! store.set_initiator_name("iqn.2015-01.com.example:host")?;
//! store.set_portal("iqn.target.1", "10.0.0.5", Portal::new("10.0.0.5"))?;
//! store.set_authentication(
//!     "iqn.target.1",
//!     "10.0.0.5",
//!     AuthConfig::Chap(Chap::new("alice", "a-long-secret")),
//! )?;
//! store.synchronize()?;
//!
//! assert!(store.session_config("iqn.target.1")?.is_none());
//! # Ok::<(), iscsi_config::store::StoreError>(())
//! ```

pub mod address;
pub mod document;
pub mod errors;
pub mod lock;

pub use address::Address;
pub use errors::StoreError;
pub use lock::{LockError, SyncLock};

use std::collections::BTreeSet;

use crate::core::options::StoreOptions;
use crate::core::schema::{
    AuthConfig, ConfigDocument, ConnectionConfig, Portal, PortalEntry, SessionConfig,
};
use crate::core::types::{validate_initiator_name, Fingerprint, PortalName, TargetName};

/// Whether the document has been read yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Unloaded,
    Loaded,
}

/// Outcome of a successful synchronize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Fingerprint of the merged document.
    pub fingerprint: Fingerprint,
    /// Whether the document was rewritten. `false` when the merge produced
    /// exactly the bytes already on disk, or when there was no document and
    /// nothing to commit.
    pub written: bool,
    /// Number of modified addresses committed.
    pub applied: usize,
}

/// Parse lookup keys, treating invalid names as unknown.
fn lookup_target(target: &str) -> Option<TargetName> {
    TargetName::new(target).ok()
}

fn lookup_portal(target: &str, portal: &str) -> Option<(TargetName, PortalName)> {
    Some((TargetName::new(target).ok()?, PortalName::new(portal).ok()?))
}

/// Addressed, copy-out access to the initiator configuration.
#[derive(Debug)]
pub struct ConfigStore {
    options: StoreOptions,
    /// `None` until first access.
    tree: Option<ConfigDocument>,
    /// Addresses modified since the last successful synchronize.
    touched: BTreeSet<Address>,
}

impl ConfigStore {
    /// Create an unloaded store. No I/O happens until first access.
    pub fn new(options: StoreOptions) -> Self {
        Self {
            options,
            tree: None,
            touched: BTreeSet::new(),
        }
    }

    /// The options this store was created with.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Current lifecycle state.
    pub fn state(&self) -> StoreState {
        if self.tree.is_some() {
            StoreState::Loaded
        } else {
            StoreState::Unloaded
        }
    }

    /// Whether there are modifications not yet synchronized.
    pub fn has_pending_changes(&self) -> bool {
        !self.touched.is_empty()
    }

    /// Addresses modified since the last successful synchronize.
    pub fn pending_changes(&self) -> impl Iterator<Item = &Address> {
        self.touched.iter()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Take the in-memory tree out, reading it from disk on first use.
    fn take_tree(&mut self) -> Result<ConfigDocument, StoreError> {
        match self.tree.take() {
            Some(tree) => Ok(tree),
            None => {
                let stored = document::read(self.options.paths())?;
                log::debug!(
                    "loaded configuration from {}",
                    self.options.paths().document_path().display()
                );
                Ok(stored.document)
            }
        }
    }

    fn tree_mut(&mut self) -> Result<&mut ConfigDocument, StoreError> {
        let tree = self.take_tree()?;
        Ok(self.tree.insert(tree))
    }

    fn tree(&mut self) -> Result<&ConfigDocument, StoreError> {
        self.tree_mut().map(|t| &*t)
    }

    fn entry(
        &mut self,
        target: &str,
        portal: &str,
    ) -> Result<Option<&PortalEntry>, StoreError> {
        let Some((target, portal)) = lookup_portal(target, portal) else {
            return Ok(None);
        };
        Ok(self.tree()?.portal_entry(&target, &portal))
    }

    fn touch(&mut self, address: Address) {
        self.touched.insert(address);
    }

    // =========================================================================
    // Initiator
    // =========================================================================

    /// The initiator name, if one has been set.
    pub fn initiator_name(&mut self) -> Result<Option<String>, StoreError> {
        Ok(self.tree()?.initiator.name.clone())
    }

    /// Replace the initiator name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for an empty or malformed name.
    pub fn set_initiator_name(&mut self, name: &str) -> Result<(), StoreError> {
        validate_initiator_name(name)?;
        self.tree_mut()?.initiator.name = Some(name.to_string());
        self.touch(Address::InitiatorName);
        log::debug!("set initiator name to {}", name);
        Ok(())
    }

    /// The initiator alias, if one has been set.
    pub fn initiator_alias(&mut self) -> Result<Option<String>, StoreError> {
        Ok(self.tree()?.initiator.alias.clone())
    }

    /// Replace the initiator alias. An empty alias clears it.
    pub fn set_initiator_alias(&mut self, alias: &str) -> Result<(), StoreError> {
        let value = (!alias.is_empty()).then(|| alias.to_string());
        self.tree_mut()?.initiator.alias = value;
        self.touch(Address::InitiatorAlias);
        Ok(())
    }

    // =========================================================================
    // Targets
    // =========================================================================

    /// Whether a target is known.
    pub fn contains_target(&mut self, target: &str) -> Result<bool, StoreError> {
        let Some(target) = lookup_target(target) else {
            return Ok(false);
        };
        Ok(self.tree()?.targets.contains_key(&target))
    }

    /// Names of all known targets, sorted.
    pub fn target_names(&mut self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .tree()?
            .targets
            .keys()
            .map(|t| t.as_str().to_string())
            .collect())
    }

    /// Remove a target with everything under it.
    ///
    /// Returns whether the target existed locally. The removal is still
    /// recorded when it did not, so synchronize removes it from the document
    /// if another process added it.
    pub fn remove_target(&mut self, target: &str) -> Result<bool, StoreError> {
        let target = TargetName::new(target)?;
        let existed = self.tree_mut()?.targets.remove(&target).is_some();

        self.touched.retain(|a| a.target() != Some(&target));
        self.touch(Address::Target(target));
        Ok(existed)
    }

    /// Session parameters for a target, if set.
    pub fn session_config(&mut self, target: &str) -> Result<Option<SessionConfig>, StoreError> {
        let Some(target) = lookup_target(target) else {
            return Ok(None);
        };
        Ok(self
            .tree()?
            .targets
            .get(&target)
            .and_then(|t| t.session_config.clone()))
    }

    /// Session parameters for a target, or the defaults.
    pub fn session_config_or_default(&mut self, target: &str) -> Result<SessionConfig, StoreError> {
        Ok(self.session_config(target)?.unwrap_or_default())
    }

    /// Replace the session parameters of a target, creating the target.
    pub fn set_session_config(
        &mut self,
        target: &str,
        config: SessionConfig,
    ) -> Result<(), StoreError> {
        let target = TargetName::new(target)?;
        config.validate()?;

        self.tree_mut()?.target_mut(&target).session_config = Some(config);
        log::debug!("set session config for {}", target);
        self.touch(Address::SessionConfig(target));
        Ok(())
    }

    // =========================================================================
    // Portals
    // =========================================================================

    /// Whether a target has an entry for a portal.
    pub fn contains_portal(&mut self, target: &str, portal: &str) -> Result<bool, StoreError> {
        Ok(self.entry(target, portal)?.is_some())
    }

    /// Names of a target's portals, sorted. Empty for an unknown target.
    pub fn portal_names(&mut self, target: &str) -> Result<Vec<String>, StoreError> {
        let Some(target) = lookup_target(target) else {
            return Ok(Vec::new());
        };
        Ok(self
            .tree()?
            .targets
            .get(&target)
            .map(|t| t.portals.keys().map(|p| p.as_str().to_string()).collect())
            .unwrap_or_default())
    }

    /// Remove a portal entry with its connection and auth settings.
    ///
    /// The target itself stays, possibly with no portals.
    pub fn remove_portal(&mut self, target: &str, portal: &str) -> Result<bool, StoreError> {
        let target = TargetName::new(target)?;
        let portal = PortalName::new(portal)?;

        let existed = self
            .tree_mut()?
            .targets
            .get_mut(&target)
            .and_then(|t| t.portals.remove(&portal))
            .is_some();

        self.touched.retain(|a| match a {
            Address::Portal(t, p) | Address::ConnectionConfig(t, p) | Address::AuthConfig(t, p) => {
                !(t == &target && p == &portal)
            }
            _ => true,
        });
        self.touch(Address::PortalEntry(target, portal));
        Ok(existed)
    }

    /// The portal descriptor, if set.
    pub fn portal(&mut self, target: &str, portal: &str) -> Result<Option<Portal>, StoreError> {
        Ok(self.entry(target, portal)?.and_then(|e| e.portal.clone()))
    }

    /// Replace the portal descriptor stored under `portal_name`, creating
    /// the target and portal entry as needed.
    pub fn set_portal(
        &mut self,
        target: &str,
        portal_name: &str,
        portal: Portal,
    ) -> Result<(), StoreError> {
        let target = TargetName::new(target)?;
        let name = PortalName::new(portal_name)?;
        portal.validate()?;

        log::debug!(
            "set portal {} ({}:{}) for {}",
            name,
            portal.address,
            portal.port,
            target
        );
        self.tree_mut()?.portal_entry_mut(&target, &name).portal = Some(portal);
        self.touch(Address::Portal(target, name));
        Ok(())
    }

    /// Connection parameters for a portal, if set.
    pub fn connection_config(
        &mut self,
        target: &str,
        portal: &str,
    ) -> Result<Option<ConnectionConfig>, StoreError> {
        Ok(self
            .entry(target, portal)?
            .and_then(|e| e.connection_config.clone()))
    }

    /// Connection parameters for a portal, or the defaults.
    pub fn connection_config_or_default(
        &mut self,
        target: &str,
        portal: &str,
    ) -> Result<ConnectionConfig, StoreError> {
        Ok(self.connection_config(target, portal)?.unwrap_or_default())
    }

    /// Replace the connection parameters of a portal, creating the path.
    pub fn set_connection_config(
        &mut self,
        target: &str,
        portal: &str,
        config: ConnectionConfig,
    ) -> Result<(), StoreError> {
        let target = TargetName::new(target)?;
        let portal = PortalName::new(portal)?;
        config.validate()?;

        self.tree_mut()?
            .portal_entry_mut(&target, &portal)
            .connection_config = Some(config);
        log::debug!("set connection config for {} via {}", target, portal);
        self.touch(Address::ConnectionConfig(target, portal));
        Ok(())
    }

    /// Authentication settings for a portal, if set.
    pub fn authentication(
        &mut self,
        target: &str,
        portal: &str,
    ) -> Result<Option<AuthConfig>, StoreError> {
        Ok(self.entry(target, portal)?.and_then(|e| e.auth_config.clone()))
    }

    /// Authentication settings for a portal, or no authentication.
    pub fn authentication_or_default(
        &mut self,
        target: &str,
        portal: &str,
    ) -> Result<AuthConfig, StoreError> {
        Ok(self.authentication(target, portal)?.unwrap_or_default())
    }

    /// Replace the authentication settings of a portal, creating the path.
    pub fn set_authentication(
        &mut self,
        target: &str,
        portal: &str,
        auth: AuthConfig,
    ) -> Result<(), StoreError> {
        let target = TargetName::new(target)?;
        let portal = PortalName::new(portal)?;
        auth.validate()?;

        // Method only; credentials are never logged.
        log::debug!(
            "set {} authentication for {} via {}",
            auth.method(),
            target,
            portal
        );
        self.tree_mut()?.portal_entry_mut(&target, &portal).auth_config = Some(auth);
        self.touch(Address::AuthConfig(target, portal));
        Ok(())
    }

    // =========================================================================
    // Synchronize
    // =========================================================================

    /// Commit local modifications to the shared document.
    ///
    /// Performs a locked read-merge-write (see the module docs) and returns
    /// once the document is durably replaced. On success the in-memory tree
    /// becomes the merged document, so changes other processes committed are
    /// visible afterwards.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ConcurrencyConflict`] if the lock stays busy past the
    ///   configured timeout
    /// - A persistence error if the document cannot be read or written
    ///
    /// On error the in-memory tree and pending modifications are kept, so the
    /// call can be retried.
    pub fn synchronize(&mut self) -> Result<SyncReport, StoreError> {
        let local = self.take_tree()?;

        match self.merge_and_write(&local) {
            Ok((merged, report)) => {
                self.tree = Some(merged);
                self.touched.clear();
                Ok(report)
            }
            Err(e) => {
                self.tree = Some(local);
                Err(e)
            }
        }
    }

    fn merge_and_write(
        &self,
        local: &ConfigDocument,
    ) -> Result<(ConfigDocument, SyncReport), StoreError> {
        let paths = self.options.paths();
        let timeout = self.options.lock_timeout();

        let lock = SyncLock::acquire(paths, timeout).map_err(|e| {
            if let LockError::Timeout { .. } = e {
                log::warn!(
                    "gave up waiting {:?} for configuration lock {}",
                    timeout,
                    paths.lock_path().display()
                );
            }
            StoreError::from(e)
        })?;

        let stored = document::read(paths)?;
        let mut merged = stored.document;
        address::merge(local, &mut merged, &self.touched);

        let bytes = document::serialize(&merged).map_err(|e| StoreError::Write {
            path: paths.document_path().to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        let fingerprint = Fingerprint::compute(&bytes);

        let unchanged = stored.fingerprint.as_ref() == Some(&fingerprint);
        let nothing_to_create = stored.fingerprint.is_none() && self.touched.is_empty();
        let written = !(unchanged || nothing_to_create);
        if written {
            document::write_atomic(paths, &bytes, self.options.file_mode())?;
            log::info!(
                "synchronized {} change(s) to {} ({})",
                self.touched.len(),
                paths.document_path().display(),
                fingerprint.short()
            );
        } else {
            log::debug!(
                "configuration {} already up to date",
                paths.document_path().display()
            );
        }
        drop(lock);

        Ok((
            merged,
            SyncReport {
                fingerprint,
                written,
                applied: self.touched.len(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::{Chap, Digest, ErrorRecoveryLevel};
    use crate::core::types::ValidationError;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, ConfigStore) {
        let temp = TempDir::new().expect("create temp dir");
        let store = ConfigStore::new(StoreOptions::at(temp.path().join("config.json")));
        (temp, store)
    }

    #[test]
    fn starts_unloaded_and_loads_on_first_access() {
        let (_temp, mut store) = create_test_store();
        assert_eq!(store.state(), StoreState::Unloaded);

        assert_eq!(store.initiator_name().expect("get"), None);
        assert_eq!(store.state(), StoreState::Loaded);
    }

    #[test]
    fn initiator_name_round_trip() {
        let (_temp, mut store) = create_test_store();

        store.set_initiator_name("iqn.initiator.test").expect("set");
        assert_eq!(
            store.initiator_name().expect("get").as_deref(),
            Some("iqn.initiator.test")
        );
    }

    #[test]
    fn empty_initiator_name_rejected_without_mutation() {
        let (_temp, mut store) = create_test_store();
        store.set_initiator_name("iqn.first").expect("set");

        let err = store.set_initiator_name("").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::InvalidInitiatorName(_))
        ));
        assert_eq!(
            store.initiator_name().expect("get").as_deref(),
            Some("iqn.first")
        );
    }

    #[test]
    fn empty_alias_clears() {
        let (_temp, mut store) = create_test_store();

        store.set_initiator_alias("lab-host").expect("set");
        assert_eq!(
            store.initiator_alias().expect("get").as_deref(),
            Some("lab-host")
        );

        store.set_initiator_alias("").expect("clear");
        assert_eq!(store.initiator_alias().expect("get"), None);
    }

    #[test]
    fn unknown_paths_are_absent() {
        let (_temp, mut store) = create_test_store();

        assert!(store.session_config("iqn.nope").expect("get").is_none());
        assert!(store.portal("iqn.nope", "p").expect("get").is_none());
        assert!(store.connection_config("iqn.nope", "p").expect("get").is_none());
        assert!(store.authentication("iqn.nope", "p").expect("get").is_none());
        assert!(store.portal("", "").expect("invalid names").is_none());
        assert!(!store.contains_target("").expect("contains"));
    }

    #[test]
    fn set_session_config_creates_target() {
        let (_temp, mut store) = create_test_store();
        let cfg = SessionConfig {
            error_recovery_level: ErrorRecoveryLevel::Digest,
            max_connections: 4,
            target_portal_group_tag: Some(1),
            target_session_id: Some(0x20),
            connection_id: Some(0),
        };

        store.set_session_config("iqn.t", cfg.clone()).expect("set");

        assert!(store.contains_target("iqn.t").expect("contains"));
        assert!(store.portal_names("iqn.t").expect("portals").is_empty());
        assert_eq!(store.session_config("iqn.t").expect("get"), Some(cfg));
    }

    #[test]
    fn set_overwrites_not_merges() {
        let (_temp, mut store) = create_test_store();

        store
            .set_connection_config(
                "iqn.t",
                "p",
                ConnectionConfig {
                    header_digest: Digest::Crc32c,
                    login_timeout: Some(15),
                    ..Default::default()
                },
            )
            .expect("first set");
        store
            .set_connection_config(
                "iqn.t",
                "p",
                ConnectionConfig {
                    data_digest: Digest::Crc32c,
                    ..Default::default()
                },
            )
            .expect("second set");

        let cfg = store.connection_config("iqn.t", "p").expect("get").expect("present");
        assert_eq!(cfg.header_digest, Digest::None);
        assert_eq!(cfg.data_digest, Digest::Crc32c);
        assert_eq!(cfg.login_timeout, None);
    }

    #[test]
    fn returned_values_are_copies() {
        let (_temp, mut store) = create_test_store();
        store
            .set_portal("iqn.t", "p", Portal::new("10.0.0.5"))
            .expect("set");

        let mut copy = store.portal("iqn.t", "p").expect("get").expect("present");
        copy.address = "192.168.0.1".to_string();

        let stored = store.portal("iqn.t", "p").expect("get").expect("present");
        assert_eq!(stored.address, "10.0.0.5");
    }

    #[test]
    fn invalid_values_rejected_before_mutation() {
        let (_temp, mut store) = create_test_store();

        let err = store
            .set_portal("iqn.t", "p", Portal::new("10.0.0.5").with_port("x"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let err = store
            .set_authentication("iqn.t", "p", AuthConfig::Chap(Chap::new(" ", "s")))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        assert!(store.set_session_config("", SessionConfig::default()).is_err());

        assert!(!store.contains_target("iqn.t").expect("contains"));
        assert!(!store.has_pending_changes());
    }

    #[test]
    fn defaults_for_absent_records() {
        let (_temp, mut store) = create_test_store();

        assert_eq!(
            store.session_config_or_default("iqn.t").expect("get"),
            SessionConfig::default()
        );
        assert_eq!(
            store.connection_config_or_default("iqn.t", "p").expect("get"),
            ConnectionConfig::default()
        );
        assert_eq!(
            store.authentication_or_default("iqn.t", "p").expect("get"),
            AuthConfig::None
        );
    }

    #[test]
    fn remove_portal_keeps_target() {
        let (_temp, mut store) = create_test_store();
        store.set_portal("iqn.t", "a", Portal::new("10.0.0.1")).expect("set");
        store.set_portal("iqn.t", "b", Portal::new("10.0.0.2")).expect("set");

        assert!(store.remove_portal("iqn.t", "a").expect("remove"));
        assert!(!store.remove_portal("iqn.t", "a").expect("remove again"));

        assert_eq!(store.portal_names("iqn.t").expect("names"), vec!["b"]);
        assert!(store.contains_target("iqn.t").expect("contains"));

        let pending: Vec<_> = store.pending_changes().cloned().collect();
        assert!(!pending.iter().any(|a| matches!(a, Address::Portal(_, p) if p.as_str() == "a")));
    }

    #[test]
    fn remove_target_collapses_pending_changes() {
        let (_temp, mut store) = create_test_store();
        store.set_portal("iqn.t", "a", Portal::new("10.0.0.1")).expect("set");
        store
            .set_session_config("iqn.t", SessionConfig::default())
            .expect("set");
        store.set_initiator_name("iqn.me").expect("set");

        assert!(store.remove_target("iqn.t").expect("remove"));

        let pending: Vec<_> = store.pending_changes().cloned().collect();
        assert_eq!(pending.len(), 2);
        assert!(pending.contains(&Address::InitiatorName));
        assert!(pending.contains(&Address::Target(TargetName::new("iqn.t").unwrap())));
        assert!(store.target_names().expect("names").is_empty());
    }

    #[test]
    fn synchronize_writes_document_and_clears_pending() {
        let (temp, mut store) = create_test_store();
        store.set_initiator_name("iqn.me").expect("set");

        let report = store.synchronize().expect("sync");
        assert!(report.written);
        assert_eq!(report.applied, 1);
        assert!(!store.has_pending_changes());

        let contents = fs::read_to_string(temp.path().join("config.json")).expect("read");
        assert!(contents.contains("\"Name\": \"iqn.me\""));
    }

    #[test]
    fn synchronize_twice_is_idempotent() {
        let (temp, mut store) = create_test_store();
        store.set_portal("iqn.t", "p", Portal::new("10.0.0.5")).expect("set");

        let first = store.synchronize().expect("first sync");
        let bytes = fs::read(temp.path().join("config.json")).expect("read");

        let second = store.synchronize().expect("second sync");
        assert!(!second.written);
        assert_eq!(first.fingerprint, second.fingerprint);
        assert_eq!(fs::read(temp.path().join("config.json")).expect("read"), bytes);
    }

    #[test]
    fn failed_synchronize_keeps_changes() {
        let temp = TempDir::new().expect("create temp dir");
        let dir = temp.path().join("sub");
        let mut store = ConfigStore::new(StoreOptions::at(dir.join("config.json")));
        store.set_initiator_name("iqn.me").expect("set");

        // A file where the document directory should be.
        fs::write(&dir, "not a directory").expect("write");

        let err = store.synchronize().unwrap_err();
        assert!(err.is_persistence());
        assert!(store.has_pending_changes());
        assert_eq!(
            store.initiator_name().expect("get").as_deref(),
            Some("iqn.me")
        );
    }

    #[test]
    fn corrupt_document_fails_load() {
        let (temp, mut store) = create_test_store();
        fs::write(temp.path().join("config.json"), "[1, 2").expect("write");

        let err = store.initiator_name().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert_eq!(store.state(), StoreState::Unloaded);
    }
}
