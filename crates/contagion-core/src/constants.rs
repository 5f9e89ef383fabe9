//! Simulation constants and tuning parameters.

use crate::enums::VirusKind;

// --- World ---

/// Default world width: an 800 unit canvas with a 50 unit margin per side.
pub const DEFAULT_WORLD_WIDTH: f64 = 700.0;

/// Default world height: a 600 unit canvas with a 50 unit margin per side.
pub const DEFAULT_WORLD_HEIGHT: f64 = 500.0;

/// Default number of entities.
pub const DEFAULT_POPULATION: usize = 200;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Entities ---

/// Entity radius in world units.
pub const DEFAULT_RADIUS: f64 = 7.0;

/// Speed as a fraction of radius (distance travelled per tick).
pub const SPEED_PER_RADIUS: f64 = 0.5;

// --- Spatial index ---

/// Target number of grid cells across the world width.
pub const DEFAULT_CELL_DIVISIONS: u32 = 14;

/// Halo of empty cells kept around the world's cell range.
pub const GRID_MARGIN_CELLS: i32 = 1;

// --- Viruses ---

/// Virus used by `InfectRandom` unless another kind is selected.
pub const DEFAULT_VIRUS: VirusKind = VirusKind::Alpha;

pub const ALPHA_TAG: &str = "red";
pub const ALPHA_DURATION: u32 = 100;

pub const BETA_TAG: &str = "yellow";
pub const BETA_DURATION: u32 = 200;

/// Display colour for healthy entities.
pub const HEALTHY_TAG: &str = "green";

// --- Shell ---

/// Delay between shell ticks in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1;
