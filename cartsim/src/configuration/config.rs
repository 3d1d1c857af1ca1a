//! Configuration types for loading cart scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`CartConfig`]   – starting mass and applied force
//! - [`TrackConfig`]  – physical and on-screen track length
//! - [`EngineConfig`] – time scaling and display jitter
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! Every field has a default, so an empty document is a valid scenario.
//!
//! # YAML format
//!
//! ```yaml
//! cart:
//!   mass: 2.0               # kg
//!   force: 1.5              # N, may be negative
//!
//! track:
//!   length: 1.0             # metres to the finish line
//!   pixel_length: 640.0     # usable on-screen length
//!
//! engine:
//!   simulation_speed: 1.0   # 1 = real time
//!   jitter:
//!     enabled: true
//!     factor: 0.05          # +-5% on displayed time and velocity
//!     seed: 42              # omit for a fresh seed every launch
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::simulation::params::{
    DEFAULT_FORCE, DEFAULT_MASS, DEFAULT_TRACK_PIXELS, RANDOMNESS_FACTOR, SIMULATION_SPEED, TRACK_LENGTH,
};

/// Initial cart settings; the user can change both between runs
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct CartConfig {
    pub mass: f64,  // kg
    pub force: f64, // N
}

impl Default for CartConfig {
    fn default() -> Self {
        Self { mass: DEFAULT_MASS, force: DEFAULT_FORCE }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TrackConfig {
    pub length: f64,       // metres
    pub pixel_length: f64, // screen units between start and finish
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self { length: TRACK_LENGTH, pixel_length: DEFAULT_TRACK_PIXELS }
    }
}

/// Display noise settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct JitterConfig {
    pub enabled: bool,
    pub factor: f64,
    pub seed: Option<u64>,
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self { enabled: true, factor: RANDOMNESS_FACTOR, seed: None }
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub simulation_speed: f64, // wall-clock multiplier
    pub jitter: JitterConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { simulation_speed: SIMULATION_SPEED, jitter: JitterConfig::default() }
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct ScenarioConfig {
    pub cart: CartConfig,
    pub track: TrackConfig,
    pub engine: EngineConfig,
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        // an empty document deserializes as unit, not as an empty map
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
