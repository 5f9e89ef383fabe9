//! Core types and definitions for the contagion simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, configuration, state snapshots, and constants.
//! It has no dependency on the engine or any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
