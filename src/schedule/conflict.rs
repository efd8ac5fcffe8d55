//! Conflict records
//!
//! A conflict is a pair of incomplete tasks whose time windows strictly
//! overlap. Records are plain data so the CLI can render them as warnings
//! or serialize them as JSON.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Whether a conflict involves one pet or two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictScope {
    SamePet,
    DifferentPets,
}

impl ConflictScope {
    /// Returns the warning label for this scope
    pub fn label(&self) -> &'static str {
        match self {
            ConflictScope::SamePet => "SAME PET",
            ConflictScope::DifferentPets => "DIFFERENT PETS",
        }
    }
}

/// One side of a detected conflict
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictSide {
    /// Task description
    pub description: String,

    /// Name of the pet the task belongs to
    pub pet_name: String,

    /// When the task starts
    pub due_time: NaiveDateTime,
}

/// Two incomplete tasks whose time windows overlap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conflict {
    /// The earlier-enumerated task of the pair
    pub first: ConflictSide,

    /// The later-enumerated task of the pair
    pub second: ConflictSide,

    /// Whether both tasks belong to the same pet
    pub scope: ConflictScope,
}

impl Conflict {
    /// Builds a conflict record, classifying its scope from the pet names
    pub fn new(first: ConflictSide, second: ConflictSide) -> Self {
        let scope = if first.pet_name == second.pet_name {
            ConflictScope::SamePet
        } else {
            ConflictScope::DifferentPets
        };
        Self {
            first,
            second,
            scope,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] '{}' ({} at {}) overlaps '{}' ({} at {})",
            self.scope.label(),
            self.first.description,
            self.first.pet_name,
            self.first.due_time.format("%Y-%m-%d %H:%M"),
            self.second.description,
            self.second.pet_name,
            self.second.due_time.format("%Y-%m-%d %H:%M"),
        )
    }
}
