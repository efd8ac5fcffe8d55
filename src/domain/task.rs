//! Task domain model
//!
//! Tasks are the schedulable units of pet care: feeding, walks, vet visits.
//! A task validates its own invariants at construction and knows how to
//! compute its end time and whether it overlaps another task in time.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when constructing domain entities from invalid input
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Task description cannot be empty")]
    EmptyDescription,

    #[error("Task duration must be greater than zero minutes")]
    ZeroDuration,

    #[error("Pet name cannot be empty")]
    EmptyPetName,

    #[error("Pet species cannot be empty")]
    EmptySpecies,

    #[error("Invalid age: {0}")]
    InvalidAge(String),
}

/// Unique task identifier
///
/// IDs are positive integers assigned monotonically by the scheduler and
/// never reused within an owner's lifetime, even across save/load cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Creates a task ID from a raw integer
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw integer value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Task priority tier
///
/// Variant order doubles as the sort rank: High sorts before Medium sorts
/// before Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Must happen (medication, vet appointments)
    #[serde(alias = "high")]
    High,
    /// Should happen (walks, grooming)
    #[serde(alias = "medium")]
    Medium,
    /// Nice to have (play sessions, treats)
    #[serde(alias = "low")]
    Low,
}

impl Priority {
    /// Returns a display label for the priority
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How often a task recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Happens once, no regeneration
    #[default]
    OneTime,
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Returns the recurrence period, or `None` for one-time tasks
    ///
    /// Monthly is a flat 30-day offset, not calendar-month arithmetic.
    pub fn period(&self) -> Option<Duration> {
        match self {
            Frequency::OneTime => None,
            Frequency::Daily => Some(Duration::days(1)),
            Frequency::Weekly => Some(Duration::weeks(1)),
            Frequency::Monthly => Some(Duration::days(30)),
        }
    }

    /// Returns true if this frequency regenerates after completion
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::OneTime)
    }

    /// Returns a display label for the frequency
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one-time",
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single unit of pet-care work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned by the scheduler
    pub id: TaskId,

    /// What needs doing (non-empty)
    pub description: String,

    /// How long the task takes, in minutes (always > 0)
    pub duration_minutes: u32,

    /// Priority tier
    pub priority: Priority,

    /// When the task is due; `None` means unscheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<NaiveDateTime>,

    /// Recurrence frequency
    #[serde(default)]
    pub frequency: Frequency,

    /// Whether the task has been completed
    #[serde(default)]
    pub is_completed: bool,

    /// Back-reference to the owning pet, stamped by `Pet::add_task`
    ///
    /// Tasks are owned structurally by their pet's list; this field only
    /// lets flat task views be traced back without a parent pointer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_name: Option<String>,
}

impl Task {
    /// Creates a new incomplete task, validating its invariants
    ///
    /// Fails if the description is empty (or whitespace-only) or the
    /// duration is zero. Invalid input is rejected, never clamped.
    pub fn new(
        id: TaskId,
        description: impl Into<String>,
        duration_minutes: u32,
        priority: Priority,
        due_time: Option<NaiveDateTime>,
        frequency: Frequency,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if duration_minutes == 0 {
            return Err(ValidationError::ZeroDuration);
        }

        Ok(Self {
            id,
            description,
            duration_minutes,
            priority,
            due_time,
            frequency,
            is_completed: false,
            pet_name: None,
        })
    }

    /// Marks the task as completed (idempotent)
    pub fn mark_complete(&mut self) {
        self.is_completed = true;
    }

    /// Returns when the task ends, or `None` if it has no due time
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.due_time
            .map(|due| due + Duration::minutes(i64::from(self.duration_minutes)))
    }

    /// Returns true if this task's time window strictly overlaps another's
    ///
    /// Unscheduled tasks never overlap anything. Tasks that merely touch at
    /// a boundary (one starts exactly when the other ends) do not overlap.
    /// Symmetric: `a.overlaps_with(b) == b.overlaps_with(a)`.
    pub fn overlaps_with(&self, other: &Task) -> bool {
        match (self.due_time, self.end_time(), other.due_time, other.end_time()) {
            (Some(self_start), Some(self_end), Some(other_start), Some(other_end)) => {
                self_start < other_end && other_start < self_end
            }
            _ => false,
        }
    }
}
