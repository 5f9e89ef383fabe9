//! Simulation snapshot: the complete observable state read by the shell.

use serde::{Deserialize, Serialize};

use crate::components::EntityId;
use crate::enums::VirusKind;
use crate::types::{Position, SimTime, WorldBounds};

/// Everything a renderer needs after a tick or command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    pub bounds: WorldBounds,
    pub active_virus: VirusKind,
    pub population: usize,
    pub infected_count: usize,
    /// All entities, ordered by id.
    pub entities: Vec<EntityView>,
}

/// One entity as drawn by the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub position: Position,
    pub radius: f64,
    pub infected: bool,
    /// Tag of the carried pathogen, if any.
    pub pathogen_tag: Option<String>,
    /// Pathogen tag when infected, otherwise the healthy tag.
    pub colour: String,
}
