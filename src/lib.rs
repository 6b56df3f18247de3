//! iscsi-config - Persistent configuration store for an iSCSI initiator
//!
//! Holds the initiator's identity (name, alias) and, for every known target,
//! its session parameters, the portals it is reachable through, and the
//! connection and authentication settings of each portal. The initiator
//! daemon reads it before logging in; management tools write it.
//!
//! # Architecture
//!
//! - [`core`] - Key types, record types, document layout, paths and options
//! - [`store`] - The addressed store, its document I/O, locking and merging
//!
//! # Invariants
//!
//! 1. Records cross the store boundary by value
//! 2. Every setter replaces the value at exactly one address
//! 3. Missing records are reported as absent, never as errors
//! 4. The shared document is only ever replaced atomically, under lock
//! 5. Synchronize never overwrites addresses this process did not modify

pub mod core;
pub mod store;

pub use crate::core::options::StoreOptions;
pub use crate::core::schema::{
    AuthConfig, Chap, ConnectionConfig, Digest, ErrorRecoveryLevel, MutualChap, Portal,
    SessionConfig,
};
pub use crate::store::{ConfigStore, StoreError, StoreState, SyncReport};
