//! Headless contagion shell.
//!
//! Stands in for the rendering/input layer: owns the run state, drives the
//! engine from a timer thread, and forwards commands to it over a channel.

pub mod game_loop;
pub mod state;

pub use contagion_core as core;
