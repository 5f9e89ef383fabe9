//! Simulation configuration.
//!
//! Passed into the engine at construction and reset. Nothing here is global:
//! the active virus kind and the healthy colour travel with the config value.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::VirusKind;
use crate::error::ConfigError;

/// Visual tag and lifetime of one virus kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirusProfile {
    pub tag: String,
    /// Ticks an infection lasts before the illness system clears it.
    pub duration: u32,
}

/// Static table of the configured virus kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirusTable {
    pub alpha: VirusProfile,
    pub beta: VirusProfile,
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub world_width: f64,
    pub world_height: f64,
    pub population: usize,
    pub radius: f64,
    /// Target number of grid cells across the world width.
    pub cell_divisions: u32,
    /// Kind used by `InfectRandom`.
    pub active_virus: VirusKind,
    pub viruses: VirusTable,
    /// Display colour reported for healthy entities.
    pub healthy_tag: String,
}

impl VirusTable {
    pub fn profile(&self, kind: VirusKind) -> &VirusProfile {
        match kind {
            VirusKind::Alpha => &self.alpha,
            VirusKind::Beta => &self.beta,
        }
    }
}

impl Default for VirusTable {
    fn default() -> Self {
        Self {
            alpha: VirusProfile {
                tag: ALPHA_TAG.to_string(),
                duration: ALPHA_DURATION,
            },
            beta: VirusProfile {
                tag: BETA_TAG.to_string(),
                duration: BETA_DURATION,
            },
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            world_width: DEFAULT_WORLD_WIDTH,
            world_height: DEFAULT_WORLD_HEIGHT,
            population: DEFAULT_POPULATION,
            radius: DEFAULT_RADIUS,
            cell_divisions: DEFAULT_CELL_DIVISIONS,
            active_virus: DEFAULT_VIRUS,
            viruses: VirusTable::default(),
            healthy_tag: HEALTHY_TAG.to_string(),
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Entity travel speed per tick.
    pub fn speed(&self) -> f64 {
        self.radius * SPEED_PER_RADIUS
    }

    /// The profile `InfectRandom` mints pathogens from.
    pub fn active_profile(&self) -> &VirusProfile {
        self.viruses.profile(self.active_virus)
    }

    /// Check every field. Invalid values are reported, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value) in [("width", self.world_width), ("height", self.world_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { axis, value });
            }
        }
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.radius));
        }
        for (axis, extent) in [("width", self.world_width), ("height", self.world_height)] {
            if extent < 2.0 * self.radius {
                return Err(ConfigError::WorldTooSmall {
                    axis,
                    extent,
                    radius: self.radius,
                });
            }
        }
        if self.cell_divisions == 0 {
            return Err(ConfigError::ZeroCellDivisions);
        }
        Ok(())
    }
}
