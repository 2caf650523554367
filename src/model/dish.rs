//! Dish reference data and the per-instance lifecycle record.
//!
//! # Framework
//! [`DishInstance`] implements the [`Entity`](brigade_framework::Entity) trait, allowing it to
//! be managed by a [`ResourceStore`](brigade_framework::ResourceStore).
//!
//! See [`crate::dishes`] for details on:
//! - Creation parameters ([`DishCreate`])
//! - Lifecycle actions ([`DishAction`](crate::dishes::DishAction))

use crate::config::ConfigError;
use crate::model::{TableId, TicketId};
use brigade_framework::Seconds;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::path::Path;

/// Type-safe identifier for dish instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DishId(pub u32);

impl From<u32> for DishId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for DishId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "dish_{}", self.0)
    }
}

/// Reference data for one dish type, authored outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishDefinition {
    pub name: String,
    /// Name of the station that cooks this dish.
    pub station: String,
    pub cook_seconds: Seconds,
    pub decay_seconds: Seconds,
    /// Dish may only appear in a ticket's first course.
    #[serde(default)]
    pub first_course_only: bool,
}

impl DishDefinition {
    pub fn new(
        name: impl Into<String>,
        station: impl Into<String>,
        cook_seconds: Seconds,
        decay_seconds: Seconds,
    ) -> Self {
        Self {
            name: name.into(),
            station: station.into(),
            cook_seconds,
            decay_seconds,
            first_course_only: false,
        }
    }

    pub fn first_course_only(mut self) -> Self {
        self.first_course_only = true;
        self
    }
}

/// Read-only catalog of dish definitions for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DishCatalog {
    definitions: Vec<DishDefinition>,
}

impl DishCatalog {
    pub fn new(definitions: Vec<DishDefinition>) -> Self {
        Self { definitions }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects duplicate names and negative or non-finite durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, definition) in self.definitions.iter().enumerate() {
            if self.definitions[..index]
                .iter()
                .any(|earlier| earlier.name == definition.name)
            {
                return Err(ConfigError::Invalid(format!(
                    "duplicate dish '{}'",
                    definition.name
                )));
            }
            for (label, value) in [
                ("cook_seconds", definition.cook_seconds),
                ("decay_seconds", definition.decay_seconds),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "dish '{}' has invalid {label}: {value}",
                        definition.name
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&DishDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DishDefinition> + '_ {
        self.definitions.iter()
    }

    /// Distinct station names, in first-seen order.
    pub fn stations(&self) -> Vec<String> {
        let mut stations: Vec<String> = Vec::new();
        for definition in &self.definitions {
            if !stations.contains(&definition.station) {
                stations.push(definition.station.clone());
            }
        }
        stations
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Lifecycle status of a dish instance.
///
/// Success path: `NotFired → Cooking → OnPass → Walking → Served`.
/// Failure path: `OnPass → Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DishStatus {
    NotFired,
    Cooking,
    OnPass,
    /// Still on the pass, but committed to delivery. Decay no longer accumulates.
    Walking,
    Served,
    Dead,
}

impl DishStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DishStatus::Served | DishStatus::Dead)
    }

    pub fn is_servable(self) -> bool {
        matches!(self, DishStatus::OnPass | DishStatus::Walking)
    }
}

/// Which ticket, table and course an instance was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishBinding {
    pub ticket: TicketId,
    pub table: TableId,
    pub course: u32,
}

/// One fired (or fireable) unit of work.
#[derive(Debug, Clone, Serialize)]
pub struct DishInstance {
    pub id: DishId,
    pub dish: String,
    pub station: String,
    pub status: DishStatus,
    /// Time spent in the current phase. Reset on every transition.
    pub elapsed: Seconds,
    pub cook_seconds: Seconds,
    pub decay_seconds: Seconds,
    /// `None` for dishes fired ad hoc.
    pub binding: Option<DishBinding>,
    /// Every status the instance has been in, oldest first.
    pub history: Vec<DishStatus>,
}

impl DishInstance {
    /// Creates an unfired instance with no timing captured yet.
    /// Durations are resolved from the catalog when the instance is stored.
    pub fn new(id: DishId, dish: impl Into<String>, binding: Option<DishBinding>) -> Self {
        Self {
            id,
            dish: dish.into(),
            station: String::new(),
            status: DishStatus::NotFired,
            elapsed: 0.0,
            cook_seconds: 0.0,
            decay_seconds: 0.0,
            binding,
            history: vec![DishStatus::NotFired],
        }
    }

    pub fn table(&self) -> Option<TableId> {
        self.binding.map(|b| b.table)
    }

    pub fn ticket(&self) -> Option<TicketId> {
        self.binding.map(|b| b.ticket)
    }

    pub fn course(&self) -> Option<u32> {
        self.binding.map(|b| b.course)
    }
}

/// Payload for creating a dish instance.
#[derive(Debug, Clone)]
pub struct DishCreate {
    pub dish: String,
    pub binding: Option<DishBinding>,
}
