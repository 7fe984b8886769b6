//! Whole-catalog snapshot persistence. Dump archives every entry to a
//! time-stamped file and empties the store; restore replaces the store with
//! the most recent snapshot and deletes it. Both hold the write lock for the
//! full swap; a concurrent writer never observes a half-replaced catalog.
//!
//! The on-disk format is opaque binary; compatibility is only promised
//! within one build.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Entry};
use crate::error::CatalogError;

#[derive(Serialize, Deserialize)]
struct SnapshotRecord {
    entries: Vec<Entry>,
}

impl Catalog {
    /// Archive the entire catalog to a fresh snapshot file, then clear the
    /// in-memory store. Any failure is logged and leaves the store
    /// untouched.
    pub fn dump(&self) {
        if let Err(err) = self.try_dump() {
            error!("catalog not dumped: {}", err);
        }
    }

    fn try_dump(&self) -> Result<(), CatalogError> {
        fs::create_dir_all(&self.config.temp_folder)?;
        let mut entries = self.write_entries("dump")?;
        let record = SnapshotRecord {
            entries: entries.values().cloned().collect(),
        };
        let bytes = bitcode::serialize(&record)
            .map_err(|err| CatalogError::Parse(format!("snapshot encode: {}", err)))?;
        let path = self.config.snapshot_path(&stamp());
        fs::write(&path, bytes)?;
        entries.clear();
        info!("catalog dumped to {}", path.display());
        Ok(())
    }

    /// Replace the entire catalog with the most recent snapshot in the temp
    /// folder, deleting the file on success. No snapshot or corrupt content:
    /// logged, existing store kept as-is.
    pub fn restore(&self) {
        if let Err(err) = self.try_restore() {
            error!("catalog not restored: {}", err);
        }
    }

    fn try_restore(&self) -> Result<(), CatalogError> {
        let mut entries = self.write_entries("restore")?;
        let path = self.latest_snapshot()?;
        let bytes = fs::read(&path)?;
        let record: SnapshotRecord = bitcode::deserialize(&bytes)
            .map_err(|err| CatalogError::Parse(format!("snapshot decode: {}", err)))?;
        *entries = record
            .entries
            .into_iter()
            .map(|entry| (entry.product.id(), entry))
            .collect();
        info!("catalog restored from {}", path.display());
        if let Err(err) = fs::remove_file(&path) {
            warn!("snapshot {} not removed: {}", path.display(), err);
        }
        Ok(())
    }

    /// The snapshot file with the lexically greatest name matching the
    /// configured pattern. Stamps are zero-padded, so lexical order is
    /// creation order.
    fn latest_snapshot(&self) -> Result<PathBuf, CatalogError> {
        let (prefix, suffix) = self.config.snapshot_pattern().ok_or_else(|| {
            CatalogError::Parse(format!(
                "snapshot template '{}' has no {{stamp}} placeholder",
                self.config.snapshot_file
            ))
        })?;
        let mut newest: Option<(String, PathBuf)> = None;
        for dir_entry in fs::read_dir(&self.config.temp_folder)? {
            let path = dir_entry?.path();
            let name = match path.file_name().and_then(|name| name.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if !(name.starts_with(prefix) && name.ends_with(suffix)) {
                continue;
            }
            if newest.as_ref().map_or(true, |(best, _)| name > *best) {
                newest = Some((name, path));
            }
        }
        newest.map(|(_, path)| path).ok_or_else(|| {
            CatalogError::Io(format!(
                "no snapshot in {}",
                self.config.temp_folder.display()
            ))
        })
    }
}

/// Nanosecond-derived discriminator, zero-padded for lexical ordering.
fn stamp() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    format!("{:020}", nanos)
}
