//! store::document
//!
//! Reading and atomically replacing the configuration document.
//!
//! # Durability
//!
//! Writes go to a temporary file in the document's directory, which is
//! synced and then renamed over the document. A reader sees either the old
//! document or the new one, never a prefix. On Unix the directory is synced
//! after the rename so the new entry itself survives a crash.
//!
//! The temporary file gets its restrictive mode before any content is
//! written, because the document holds CHAP secrets.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::errors::StoreError;
use crate::core::paths::ConfigPaths;
use crate::core::schema::ConfigDocument;
use crate::core::types::Fingerprint;

/// A document as found on disk.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub document: ConfigDocument,
    /// Fingerprint of the bytes read, `None` if the file did not exist.
    pub fingerprint: Option<Fingerprint>,
}

/// Serialize a document to its canonical on-disk bytes.
pub fn serialize(document: &ConfigDocument) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec_pretty(document)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse and validate document text.
pub fn parse(paths: &ConfigPaths, contents: &str) -> Result<ConfigDocument, StoreError> {
    let path = paths.document_path();
    let document: ConfigDocument =
        serde_json::from_str(contents).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    document.validate().map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(document)
}

/// Read the document, or an empty one if it does not exist yet.
///
/// An empty file is treated like a missing one.
pub fn read(paths: &ConfigPaths) -> Result<StoredDocument, StoreError> {
    let path = paths.document_path();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("no configuration at {}, starting empty", path.display());
            return Ok(StoredDocument {
                document: ConfigDocument::default(),
                fingerprint: None,
            });
        }
        Err(e) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let fingerprint = Fingerprint::compute(contents.as_bytes());
    let document = if contents.trim().is_empty() {
        ConfigDocument::default()
    } else {
        parse(paths, &contents)?
    };

    log::debug!(
        "read configuration {} ({} target(s), {})",
        path.display(),
        document.targets.len(),
        fingerprint.short()
    );

    Ok(StoredDocument {
        document,
        fingerprint: Some(fingerprint),
    })
}

/// Atomically replace the document with already-serialized bytes.
///
/// `mode` is only applied on Unix.
pub fn write_atomic(paths: &ConfigPaths, bytes: &[u8], mode: u32) -> Result<(), StoreError> {
    let dir = paths.directory();
    fs::create_dir_all(dir).map_err(|e| write_error(dir, e))?;

    let temp_path = paths.temp_path();
    if let Err(e) = write_and_rename(paths, &temp_path, bytes, mode) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    #[cfg(unix)]
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(|e| write_error(dir, e))?;

    Ok(())
}

fn write_and_rename(
    paths: &ConfigPaths,
    temp_path: &Path,
    bytes: &[u8],
    mode: u32,
) -> Result<(), StoreError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| write_error(temp_path, e))?;

    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(mode))
        .map_err(|e| write_error(temp_path, e))?;
    #[cfg(not(unix))]
    let _ = mode;

    file.write_all(bytes)
        .map_err(|e| write_error(temp_path, e))?;
    file.sync_all().map_err(|e| write_error(temp_path, e))?;

    let path = paths.document_path();
    fs::rename(temp_path, path).map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Write {
        path: path.to_path_buf(),
        source,
    }
}
