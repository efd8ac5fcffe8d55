//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{pet, schedule, task};
use crate::domain::DEFAULT_OWNER_NAME;
use crate::schedule::Scheduler;
use crate::storage::{Config, SnapshotStore};

#[derive(Parser)]
#[command(name = "pawpal")]
#[command(author, version, about = "Pet care task tracking and scheduling")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Owner snapshot file (defaults to the platform data directory)
    #[arg(long, global = true, env = "PAWPAL_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage pets
    #[command(subcommand)]
    Pet(pet::PetCommands),

    /// Manage care tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Plan a day by packing tasks into an available-time budget
    Schedule {
        /// Minutes available
        #[arg(long, short, default_value = "120")]
        minutes: u32,

        /// Target date (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Detect overlapping task pairs
    Conflicts,

    /// Pre-generate recurring task instances up to a date
    Recurring {
        /// End of the generation window (inclusive)
        #[arg(long)]
        until: NaiveDate,

        /// Start of the generation window (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,
    },
}

/// Parses arguments and executes the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format);

    let config = Config::load();
    let store = SnapshotStore::new(
        cli.data_file
            .unwrap_or_else(|| config.data_file()),
    );

    match cli.command {
        Commands::Pet(cmd) => pet::run(cmd, &store, &config, &output),
        Commands::Task(cmd) => task::run(cmd, &store, &config, &output),
        Commands::Schedule { minutes, date } => {
            schedule::run_schedule(&store, &config, &output, minutes, date)
        }
        Commands::Conflicts => schedule::run_conflicts(&store, &config, &output),
        Commands::Recurring { until, from } => {
            schedule::run_recurring(&store, &config, &output, until, from)
        }
    }
}

/// Loads the persisted owner and binds it to a fresh scheduler
///
/// A missing or corrupt snapshot yields the default owner; the configured
/// owner name, if any, replaces the placeholder on that first load.
pub(super) fn load_scheduler(store: &SnapshotStore, config: &Config) -> Scheduler {
    let mut owner = store.load();
    if owner.name == DEFAULT_OWNER_NAME && owner.pets.is_empty() {
        if let Some(name) = &config.owner_name {
            owner.name = name.clone();
        }
    }
    Scheduler::with_owner(owner)
}
