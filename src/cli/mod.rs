//! Command-line interface
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Pet | Pet registry | `pet add`, `pet list` |
//! | Task | Care tasks | `task add`, `task list`, `task done` |
//! | Schedule | Daily planning | `schedule --minutes 90` |
//! | Conflicts | Overlap detection | `conflicts` |
//! | Recurring | Bulk pre-generation | `recurring --until 2025-07-01` |
//!
//! All commands support `--format text|json` and `--data-file` (also via
//! `PAWPAL_DATA_FILE`). Call [`run()`] to parse arguments and execute.

mod app;
mod output;
mod pet;
mod schedule;
mod task;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
