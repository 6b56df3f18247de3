//! store::address
//!
//! Addresses of the nodes in the configuration tree, and merging by address.
//!
//! # Addressing
//!
//! ```text
//! Initiator ─┬─ Name
//!            └─ Alias
//! Target ────┬─ SessionConfig
//!            └─ Portal entry ─┬─ Portal
//!                             ├─ ConnectionConfig
//!                             └─ AuthConfig
//! ```
//!
//! Every setter touches exactly one leaf address. Removals touch a whole
//! target or portal entry.
//!
//! # Merging
//!
//! Synchronize re-reads the document and copies the local value of every
//! touched address into it. Copying a leaf creates the path on the way down
//! when the local value is present, and removes only that leaf when it is
//! absent. Copying a subtree replaces or removes it wholesale. Since each
//! copy writes the local state at its address, the result does not depend
//! on the order the addresses are applied in.

use crate::core::schema::ConfigDocument;
use crate::core::types::{PortalName, TargetName};

/// One addressable node of the configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Address {
    InitiatorName,
    InitiatorAlias,
    /// A whole target subtree.
    Target(TargetName),
    SessionConfig(TargetName),
    /// A whole portal entry.
    PortalEntry(TargetName, PortalName),
    Portal(TargetName, PortalName),
    ConnectionConfig(TargetName, PortalName),
    AuthConfig(TargetName, PortalName),
}

impl Address {
    /// The target this address lives under, if any.
    pub fn target(&self) -> Option<&TargetName> {
        match self {
            Self::InitiatorName | Self::InitiatorAlias => None,
            Self::Target(t) | Self::SessionConfig(t) => Some(t),
            Self::PortalEntry(t, _)
            | Self::Portal(t, _)
            | Self::ConnectionConfig(t, _)
            | Self::AuthConfig(t, _) => Some(t),
        }
    }

    /// Copy the value at this address from `local` into `base`.
    pub fn apply(&self, local: &ConfigDocument, base: &mut ConfigDocument) {
        match self {
            Self::InitiatorName => base.initiator.name = local.initiator.name.clone(),
            Self::InitiatorAlias => base.initiator.alias = local.initiator.alias.clone(),

            Self::Target(target) => match local.targets.get(target) {
                Some(record) => {
                    base.targets.insert(target.clone(), record.clone());
                }
                None => {
                    base.targets.remove(target);
                }
            },

            Self::SessionConfig(target) => {
                let value = local
                    .targets
                    .get(target)
                    .and_then(|t| t.session_config.clone());
                match value {
                    Some(cfg) => base.target_mut(target).session_config = Some(cfg),
                    None => {
                        if let Some(record) = base.targets.get_mut(target) {
                            record.session_config = None;
                        }
                    }
                }
            }

            Self::PortalEntry(target, portal) => match local.portal_entry(target, portal) {
                Some(entry) => {
                    base.target_mut(target)
                        .portals
                        .insert(portal.clone(), entry.clone());
                }
                None => {
                    if let Some(record) = base.targets.get_mut(target) {
                        record.portals.remove(portal);
                    }
                }
            },

            Self::Portal(target, portal) => {
                let value = local
                    .portal_entry(target, portal)
                    .and_then(|e| e.portal.clone());
                match value {
                    Some(v) => base.portal_entry_mut(target, portal).portal = Some(v),
                    None => {
                        if let Some(entry) = existing_entry(base, target, portal) {
                            entry.portal = None;
                        }
                    }
                }
            }

            Self::ConnectionConfig(target, portal) => {
                let value = local
                    .portal_entry(target, portal)
                    .and_then(|e| e.connection_config.clone());
                match value {
                    Some(v) => base.portal_entry_mut(target, portal).connection_config = Some(v),
                    None => {
                        if let Some(entry) = existing_entry(base, target, portal) {
                            entry.connection_config = None;
                        }
                    }
                }
            }

            Self::AuthConfig(target, portal) => {
                let value = local
                    .portal_entry(target, portal)
                    .and_then(|e| e.auth_config.clone());
                match value {
                    Some(v) => base.portal_entry_mut(target, portal).auth_config = Some(v),
                    None => {
                        if let Some(entry) = existing_entry(base, target, portal) {
                            entry.auth_config = None;
                        }
                    }
                }
            }
        }
    }
}

fn existing_entry<'a>(
    doc: &'a mut ConfigDocument,
    target: &TargetName,
    portal: &PortalName,
) -> Option<&'a mut crate::core::schema::PortalEntry> {
    doc.targets.get_mut(target)?.portals.get_mut(portal)
}

/// Merge the touched addresses of `local` into `base`.
pub fn merge<'a, I>(local: &ConfigDocument, base: &mut ConfigDocument, touched: I)
where
    I: IntoIterator<Item = &'a Address>,
{
    for address in touched {
        address.apply(local, base);
    }
}
