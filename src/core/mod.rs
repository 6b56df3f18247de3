//! core
//!
//! Configuration records, key types and storage settings.
//!
//! # Modules
//!
//! - [`types`] - Strong types: TargetName, PortalName, Fingerprint
//! - [`schema`] - Record types and the persisted document layout
//! - [`paths`] - Centralized path routing for the document and its lock
//! - [`options`] - Store options and document location resolution
//!
//! # Design Principles
//!
//! - Records are plain values, copied in and out of the store
//! - Keys are validated at construction
//! - Document serialization is deterministic

pub mod options;
pub mod paths;
pub mod schema;
pub mod types;
