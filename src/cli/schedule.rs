//! Schedule, conflict, and recurrence CLI commands

use anyhow::Result;
use chrono::{Local, NaiveDate};

use super::app::load_scheduler;
use super::output::Output;
use super::task::format_task_line;
use crate::storage::{Config, SnapshotStore};

/// Generates today's greedy schedule within a time budget
pub fn run_schedule(
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
    minutes: u32,
    date: Option<NaiveDate>,
) -> Result<()> {
    let scheduler = load_scheduler(store, config);
    let target = date.unwrap_or_else(|| Local::now().date_naive());
    let schedule = scheduler.generate_daily_schedule(minutes, target);

    if output.is_json() {
        let rows: Vec<serde_json::Value> = schedule
            .iter()
            .map(|(pet, task)| {
                serde_json::json!({
                    "pet": pet,
                    "id": task.id,
                    "description": task.description,
                    "duration_minutes": task.duration_minutes,
                    "priority": task.priority,
                    "due_time": task.due_time,
                })
            })
            .collect();
        output.data(&rows);
        return Ok(());
    }

    if schedule.is_empty() {
        output.text(&format!("Nothing scheduled for {}.", target));
        return Ok(());
    }

    let total: u32 = schedule.iter().map(|(_, task)| task.duration_minutes).sum();
    output.text(&format!(
        "Schedule for {} ({} / {} minutes):",
        target, total, minutes
    ));
    for (i, &(pet, task)) in schedule.iter().enumerate() {
        output.text(&format!("{}. {}", i + 1, format_task_line(pet, task)));
    }
    Ok(())
}

/// Lists every pair of incomplete tasks whose time windows overlap
pub fn run_conflicts(store: &SnapshotStore, config: &Config, output: &Output) -> Result<()> {
    let scheduler = load_scheduler(store, config);
    let conflicts = scheduler.detect_all_conflicts();

    if output.is_json() {
        output.data(&conflicts);
        return Ok(());
    }

    if conflicts.is_empty() {
        output.text("No conflicts detected.");
        return Ok(());
    }

    output.text(&format!("Found {} conflict(s):", conflicts.len()));
    for conflict in &conflicts {
        output.text(&format!("  {}", conflict));
    }
    Ok(())
}

/// Bulk-generates recurring task instances inside a date window
pub fn run_recurring(
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
    until: NaiveDate,
    from: Option<NaiveDate>,
) -> Result<()> {
    let start = from
        .unwrap_or_else(|| Local::now().date_naive())
        .and_hms_opt(0, 0, 0)
        .unwrap_or(chrono::NaiveDateTime::MIN);
    let end = until
        .and_hms_opt(23, 59, 59)
        .unwrap_or(chrono::NaiveDateTime::MAX);

    let mut scheduler = load_scheduler(store, config);
    let created = scheduler.generate_recurring_tasks(start, end);

    if let Some(owner) = scheduler.take_owner() {
        store.save(&owner)?;
    }

    output.success(&format!("Created {} recurring task instance(s)", created));
    Ok(())
}
