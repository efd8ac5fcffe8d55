//! Task CLI commands
//!
//! The CLI maps raw argument strings to domain enums before any task is
//! constructed; the core never parses free-form input itself.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDateTime;
use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use super::app::load_scheduler;
use super::output::Output;
use crate::domain::{Frequency, Priority, Task, TaskId};
use crate::schedule::{Scheduler, TaskFilter};
use crate::storage::{Config, SnapshotStore};

/// Priority as a CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

/// Frequency as a CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FrequencyArg {
    OneTime,
    Daily,
    Weekly,
    Monthly,
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::OneTime => Frequency::OneTime,
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Weekly => Frequency::Weekly,
            FrequencyArg::Monthly => Frequency::Monthly,
        }
    }
}

/// Sort order for task listings
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum SortBy {
    /// Chronological, unscheduled last
    #[default]
    Time,
    /// High priority first, then chronological
    Priority,
}

/// Parses "2025-06-01 09:00" or ISO-8601 forms
fn parse_due(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| format!("invalid due time '{}', expected YYYY-MM-DD HH:MM", s))
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a care task for a pet
    Add {
        /// Pet the task is for
        pet: String,

        /// What needs doing
        description: String,

        /// Duration in minutes
        #[arg(long, short, default_value = "20")]
        duration: u32,

        /// Priority tier
        #[arg(long, short, value_enum, default_value = "high")]
        priority: PriorityArg,

        /// Recurrence frequency
        #[arg(long, value_enum, default_value = "one-time")]
        frequency: FrequencyArg,

        /// Due time, e.g. "2025-06-01 09:00" (omit for unscheduled)
        #[arg(long, value_parser = parse_due)]
        due: Option<NaiveDateTime>,
    },

    /// List tasks, filtered and sorted
    List {
        /// Only this pet's tasks
        #[arg(long)]
        pet: Option<String>,

        /// Only incomplete tasks
        #[arg(long, conflicts_with = "completed")]
        pending: bool,

        /// Only completed tasks
        #[arg(long)]
        completed: bool,

        /// Sort order
        #[arg(long, value_enum, default_value = "time")]
        by: SortBy,
    },

    /// Mark a task done (recurring tasks regenerate their next instance)
    Done {
        /// Task ID
        id: TaskId,
    },
}

#[derive(Serialize)]
struct TaskRow<'a> {
    pet: &'a str,
    #[serde(flatten)]
    task: &'a Task,
}

pub fn run(
    cmd: TaskCommands,
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match cmd {
        TaskCommands::Add {
            pet,
            description,
            duration,
            priority,
            frequency,
            due,
        } => add_task(
            store,
            config,
            output,
            &pet,
            &description,
            duration,
            priority.into(),
            frequency.into(),
            due,
        ),
        TaskCommands::List {
            pet,
            pending,
            completed,
            by,
        } => list_tasks(store, config, output, pet, pending, completed, by),
        TaskCommands::Done { id } => complete_task(store, config, output, id),
    }
}

#[allow(clippy::too_many_arguments)]
fn add_task(
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
    pet_name: &str,
    description: &str,
    duration: u32,
    priority: Priority,
    frequency: Frequency,
    due: Option<NaiveDateTime>,
) -> Result<()> {
    let mut scheduler = load_scheduler(store, config);
    if scheduler.pet_by_name(pet_name).is_none() {
        bail!("No pet named '{}'. Add it first with 'pawpal pet add'.", pet_name);
    }

    let id = scheduler.generate_task_id();
    let task = Task::new(id, description, duration, priority, due, frequency)?;

    if scheduler.check_conflicts(&task) {
        output.warn(&format!(
            "'{}' overlaps an existing task's time window",
            task.description
        ));
    }

    let pet = scheduler
        .pet_by_name_mut(pet_name)
        .ok_or_else(|| anyhow!("No pet named '{}'", pet_name))?;
    pet.add_task(task);

    if let Some(owner) = scheduler.take_owner() {
        store.save(&owner)?;
    }

    output.success(&format!("Added task #{} for {}", id, pet_name));
    Ok(())
}

fn list_tasks(
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
    pet: Option<String>,
    pending: bool,
    completed: bool,
    by: SortBy,
) -> Result<()> {
    let scheduler = load_scheduler(store, config);

    let mut filter = TaskFilter::new();
    if let Some(name) = pet {
        filter = filter.pet(name);
    }
    if pending {
        filter = filter.completed(false);
    } else if completed {
        filter = filter.completed(true);
    }

    let mut tasks = scheduler.filter_tasks(&filter);
    match by {
        SortBy::Time => Scheduler::sort_by_time(&mut tasks),
        SortBy::Priority => Scheduler::sort_by_priority_and_time(&mut tasks),
    }

    if output.is_json() {
        let rows: Vec<TaskRow> = tasks
            .iter()
            .map(|&(pet, task)| TaskRow { pet, task })
            .collect();
        output.data(&rows);
        return Ok(());
    }

    if tasks.is_empty() {
        output.text("No tasks found.");
        return Ok(());
    }

    for &(pet, task) in &tasks {
        output.text(&format_task_line(pet, task));
    }
    Ok(())
}

fn complete_task(
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
    id: TaskId,
) -> Result<()> {
    let mut scheduler = load_scheduler(store, config);

    // Resolve the owning pet from the flat view before mutating
    let pet_name = scheduler
        .all_tasks()
        .iter()
        .find(|(_, task)| task.id == id)
        .map(|(pet, _)| (*pet).to_string())
        .ok_or_else(|| anyhow!("No task with ID {}", id))?;

    let regenerated = scheduler.complete_task(id, &pet_name);

    if let Some(owner) = scheduler.take_owner() {
        store.save(&owner)?;
    }

    if regenerated {
        output.success(&format!(
            "Completed task #{}; next recurring instance created",
            id
        ));
    } else {
        output.success(&format!("Completed task #{}", id));
    }
    Ok(())
}

/// One task as a text listing line
pub(super) fn format_task_line(pet: &str, task: &Task) -> String {
    let status = if task.is_completed { "[x]" } else { "[ ]" };
    let due = task
        .due_time
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unscheduled".to_string());
    format!(
        "{} #{:<4} {:16}  {:10}  {} ({} min, {}, {})",
        status, task.id, due, pet, task.description, task.duration_minutes, task.priority,
        task.frequency
    )
}
