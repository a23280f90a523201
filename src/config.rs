//! Runtime simulation settings, loadable from TOML.
//!
//! Every field has a default, so a partial file only overrides what it names:
//!
//! ```toml
//! width = 1280.0
//! height = 720.0
//! initial_count = 8
//!
//! [spawn]
//! max_speed = 2.0
//! ```

use crate::{error::SimResult, Fp, PI};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: Fp,
    pub height: Fp,
    /// Number of random polygons `Cosmos::populate` spawns.
    pub initial_count: usize,
    pub spawn: SpawnConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: 800.0,
            height: 600.0,
            initial_count: 5,
            spawn: SpawnConfig::default(),
        }
    }
}

/// Parameters for randomly generated polygons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub min_vertices: usize,
    pub max_vertices: usize,
    pub min_radius: Fp,
    pub max_radius: Fp,
    /// Upper bound of each velocity component's magnitude.
    pub max_speed: Fp,
    /// Upper bound of the per-tick rotation's magnitude, radians.
    pub max_angle: Fp,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        SpawnConfig {
            min_vertices: 3,
            max_vertices: 12,
            min_radius: 75.0,
            max_radius: 100.0,
            max_speed: 4.0,
            max_angle: PI / 128.0,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(src: &str) -> SimResult<SimConfig> {
        Ok(toml::from_str(src)?)
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> SimConfig {
        //! Reads `path`, falling back to defaults when the file is missing or malformed.
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(src) => match SimConfig::from_toml_str(&src) {
                Ok(config) => {
                    debug!(path = %path.display(), "loaded simulation config");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), "{}; using defaults", e);
                    SimConfig::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "no simulation config; using defaults");
                SimConfig::default()
            }
        }
    }
}
