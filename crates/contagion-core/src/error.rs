//! Error types for configuration and construction.

use thiserror::Error;

/// Invalid simulation configuration, reported at construction or reset time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world {axis} must be finite and > 0, got {value}")]
    InvalidDimension { axis: &'static str, value: f64 },
    #[error("population must be > 0")]
    EmptyPopulation,
    #[error("radius must be finite and > 0, got {0}")]
    InvalidRadius(f64),
    #[error("world {axis} {extent} leaves no room for entities of radius {radius}")]
    WorldTooSmall {
        axis: &'static str,
        extent: f64,
        radius: f64,
    },
    #[error("cell_divisions must be > 0")]
    ZeroCellDivisions,
    #[error("malformed configuration: {0}")]
    Malformed(String),
}
