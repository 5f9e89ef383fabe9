//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` when read-only).
//! They do not own state; everything lives in components, the spatial index,
//! or the engine.

pub mod contagion;
pub mod illness;
pub mod movement;
pub mod snapshot;
