//! Commands sent from the shell to the simulation.
//!
//! None of them advance the tick counter.

use serde::{Deserialize, Serialize};

use crate::enums::VirusKind;

/// All possible user actions on a running simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Infect one uniformly random entity with the active virus kind.
    InfectRandom,
    /// Remove every infection.
    CureAll,
    /// Rebuild the population and spatial index from scratch.
    Reset {
        width: f64,
        height: f64,
        population: usize,
    },
    /// Change the virus kind used by subsequent `InfectRandom` commands.
    SelectVirus { kind: VirusKind },
}
