//! Pet domain model
//!
//! A pet exclusively owns its ordered list of care tasks. Insertion order is
//! display order; the list is append-only (no removal or reassignment).

use serde::{Deserialize, Serialize};

use super::task::{Task, ValidationError};

/// A named animal with an ordered list of care tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Pet name (non-empty; unique by convention, not enforced)
    pub name: String,

    /// Species label, e.g. "Dog" or "Cat" (non-empty)
    pub species: String,

    /// Age in years
    pub age: u32,

    /// Care tasks in insertion order
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Pet {
    /// Creates a new pet with no tasks, validating name and species
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        age: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyPetName);
        }
        let species = species.into();
        if species.trim().is_empty() {
            return Err(ValidationError::EmptySpecies);
        }

        Ok(Self {
            name,
            species,
            age,
            tasks: Vec::new(),
        })
    }

    /// Appends a task, stamping it with this pet's name
    ///
    /// Always succeeds; duplicates are not detected.
    pub fn add_task(&mut self, mut task: Task) {
        task.pet_name = Some(self.name.clone());
        self.tasks.push(task);
    }

    /// Returns all tasks in insertion order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the incomplete tasks, preserving insertion order
    pub fn pending_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| !t.is_completed).collect()
    }
}
