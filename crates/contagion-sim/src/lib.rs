//! Simulation engine for the contagion model.
//!
//! Owns the hecs ECS world and the spatial index, advances entities one tick
//! at a time, and produces `SimSnapshot`s for the shell. Completely headless,
//! enabling deterministic testing.

pub mod engine;
pub mod spatial_index;
pub mod systems;
pub mod world_setup;

pub use contagion_core as core;
pub use engine::SimulationEngine;
pub use spatial_index::{CellKey, SpatialIndex};
