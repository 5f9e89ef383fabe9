//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// The two configured virus strains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VirusKind {
    /// Short-lived strain (red, 100 ticks by default).
    #[default]
    Alpha,
    /// Long-lived strain (yellow, 200 ticks by default).
    Beta,
}

/// Whether the shell is currently ticking the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl VirusKind {
    pub const ALL: [VirusKind; 2] = [VirusKind::Alpha, VirusKind::Beta];
}

impl RunState {
    /// The opposite state (start/stop toggle).
    pub fn toggled(self) -> Self {
        match self {
            RunState::Stopped => RunState::Running,
            RunState::Running => RunState::Stopped,
        }
    }
}
