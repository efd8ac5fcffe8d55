//! Pet CLI commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use super::app::load_scheduler;
use super::output::Output;
use crate::domain::Pet;
use crate::storage::{Config, SnapshotStore};

#[derive(Subcommand)]
pub enum PetCommands {
    /// Register a new pet
    Add {
        /// Pet name
        name: String,

        /// Species, e.g. "Dog" or "Cat"
        #[arg(long, short)]
        species: String,

        /// Age in years
        #[arg(long, short, default_value = "1")]
        age: u32,
    },

    /// List all pets
    List,
}

#[derive(Serialize)]
struct PetRow<'a> {
    name: &'a str,
    species: &'a str,
    age: u32,
    tasks: usize,
}

pub fn run(
    cmd: PetCommands,
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match cmd {
        PetCommands::Add { name, species, age } => add_pet(store, config, output, name, species, age),
        PetCommands::List => list_pets(store, config, output),
    }
}

fn add_pet(
    store: &SnapshotStore,
    config: &Config,
    output: &Output,
    name: String,
    species: String,
    age: u32,
) -> Result<()> {
    let pet = Pet::new(name, species, age)?;
    let label = format!("Added {} the {}", pet.name, pet.species);

    let mut scheduler = load_scheduler(store, config);
    if let Some(owner) = scheduler.owner_mut() {
        owner.add_pet(pet);
    }
    if let Some(owner) = scheduler.take_owner() {
        store.save(&owner)?;
    }

    output.success(&label);
    Ok(())
}

fn list_pets(store: &SnapshotStore, config: &Config, output: &Output) -> Result<()> {
    let scheduler = load_scheduler(store, config);
    let Some(owner) = scheduler.owner() else {
        return Ok(());
    };

    if output.is_json() {
        let rows: Vec<PetRow> = owner
            .pets
            .iter()
            .map(|pet| PetRow {
                name: &pet.name,
                species: &pet.species,
                age: pet.age,
                tasks: pet.tasks().len(),
            })
            .collect();
        output.data(&rows);
        return Ok(());
    }

    if owner.pets.is_empty() {
        output.text("No pets yet. Add one with 'pawpal pet add'.");
        return Ok(());
    }

    output.text(&format!("{}'s pets:", owner.name));
    for pet in &owner.pets {
        let pending = pet.pending_tasks().len();
        output.text(&format!(
            "  {} ({}, {} yr) - {} task(s), {} pending",
            pet.name,
            pet.species,
            pet.age,
            pet.tasks().len(),
            pending
        ));
    }
    Ok(())
}
