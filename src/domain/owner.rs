//! Owner domain model
//!
//! The owner is the top-level aggregate: an ordered, append-only list of
//! pets. It derives a flat `(pet_name, task)` view on demand; the view is
//! recomputed per call so it always reflects current contents.

use serde::{Deserialize, Serialize};

use super::pet::Pet;
use super::task::Task;

/// Display name used when no persisted owner exists
pub const DEFAULT_OWNER_NAME: &str = "Pet Owner";

/// The pet owner: top-level aggregate of all pets and their tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Display name (no uniqueness constraint)
    pub name: String,

    /// Pets in insertion order
    #[serde(default)]
    pub pets: Vec<Pet>,
}

impl Owner {
    /// Creates an owner with no pets
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pets: Vec::new(),
        }
    }

    /// Appends a pet to the ordered list
    pub fn add_pet(&mut self, pet: Pet) {
        self.pets.push(pet);
    }

    /// Returns every task as `(pet_name, task)` pairs
    ///
    /// Pets iterate in insertion order, and tasks within each pet in
    /// insertion order. This is the baseline ordering every scheduler
    /// query starts from.
    pub fn all_tasks(&self) -> Vec<(&str, &Task)> {
        self.pets
            .iter()
            .flat_map(|pet| pet.tasks().iter().map(move |task| (pet.name.as_str(), task)))
            .collect()
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER_NAME)
    }
}
