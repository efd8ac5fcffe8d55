//! Domain models for PawPal
//!
//! Contains the core entities without any I/O concerns.

mod owner;
mod pet;
mod task;

pub use owner::{Owner, DEFAULT_OWNER_NAME};
pub use pet::Pet;
pub use task::{Frequency, Priority, Task, TaskId, ValidationError};
