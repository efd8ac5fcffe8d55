//! The algorithmic core
//!
//! Sorting, filtering, recurrence, conflict detection, and greedy daily
//! planning over an owner's task graph. Pure in-memory computation: no I/O,
//! no suspension points, exclusive single-session access assumed.

mod conflict;
mod scheduler;

pub use conflict::{Conflict, ConflictScope, ConflictSide};
pub use scheduler::{Scheduler, TaskFilter};
