//! Simulation error types.

use crate::{broad::cosmos::PolygonId, Fp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// No live polygon carries this id; it was never spawned or has been removed.
    #[error("no live polygon with id {0}")]
    NotFound(PolygonId),

    #[error("viewport must have finite, non-negative extent (got {width} x {height})")]
    InvalidViewport { width: Fp, height: Fp },

    #[error("spawn setting `{field}` must be finite (got {value})")]
    InvalidSpawn { field: &'static str, value: Fp },

    #[error("failed to parse simulation config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type SimResult<T> = Result<T, SimError>;
