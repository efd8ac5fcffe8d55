//! PawPal - pet care task tracking and scheduling
//!
//! Owners register pets, attach care tasks (duration, priority, due time,
//! recurrence), and the scheduler sorts, filters, packs a daily time
//! budget, regenerates recurring tasks, and flags time conflicts.

pub mod cli;
pub mod domain;
pub mod schedule;
pub mod storage;

pub use domain::{Frequency, Owner, Pet, Priority, Task, TaskId, ValidationError};
pub use schedule::{Conflict, ConflictScope, Scheduler, TaskFilter};
