//! JSON snapshot persistence
//!
//! The whole owner graph is persisted as a single flat JSON snapshot. A
//! missing or corrupt snapshot is never an error: loading recovers to an
//! empty default owner so the application keeps working. Writes go through
//! a locked temp file and an atomic rename.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::Owner;

/// Store for the owner snapshot file
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Creates a store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the owner from the snapshot
    ///
    /// A missing file or any parse failure yields a fresh default owner
    /// ("Pet Owner", no pets) rather than propagating an error.
    pub fn load(&self) -> Owner {
        let Ok(file) = File::open(&self.path) else {
            return Owner::default();
        };
        serde_json::from_reader(BufReader::new(file)).unwrap_or_default()
    }

    /// Saves the owner snapshot (locked temp file, atomic rename)
    pub fn save(&self, owner: &Owner) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on snapshot")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, owner)
                .context("Failed to serialize owner snapshot")?;
            writer.flush().context("Failed to flush snapshot")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}
