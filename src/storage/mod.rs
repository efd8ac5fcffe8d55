//! Persistence layer
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Owner snapshot | JSON | platform data dir (`owner.json`) or `--data-file` |
//! | Config | TOML | platform config dir (`config.toml`) |
//!
//! Snapshot writes are atomic (locked temp file + rename). Loading never
//! fails: missing or corrupt state recovers to an empty default owner.

mod config;
mod snapshot;

pub use config::Config;
pub use snapshot::SnapshotStore;
