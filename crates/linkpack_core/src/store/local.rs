//! File-backed key-value store (earlier persistence variant).
//!
//! # Responsibility
//! - Read the whole record set for a fixed key at startup.
//! - Rewrite the whole record set on every change.
//!
//! # Invariants
//! - One JSON file per key under the base directory.
//! - A missing file reads as an empty record set, never as an error.

use crate::store::StoreResult;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// JSON-file store keyed by a fixed name.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Creates a store rooted at the given directory.
    ///
    /// The directory is created lazily on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Reads all records stored under `key`.
    ///
    /// Returns an empty vector when the file does not exist yet.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
        let path = self.file_path(key);
        if !path.exists() {
            info!("event=local_load module=store status=ok key={key} count=0 missing=true");
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&path)?;
        let records: Vec<T> = serde_json::from_str(&text)?;
        info!(
            "event=local_load module=store status=ok key={key} count={}",
            records.len()
        );
        Ok(records)
    }

    /// Rewrites the full record set stored under `key`.
    pub fn save<T: Serialize>(&self, key: &str, records: &[T]) -> StoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.file_path(key);
        let text = serde_json::to_string(records)?;
        if let Err(err) = fs::write(&path, text) {
            warn!(
                "event=local_save module=store status=error key={key} path={} error={err}",
                path.display()
            );
            return Err(err.into());
        }

        info!(
            "event=local_save module=store status=ok key={key} count={}",
            records.len()
        );
        Ok(())
    }

    /// Returns the base directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}
