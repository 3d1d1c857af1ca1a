//! Physical and visual parameters for a run
//!
//! `SimulationConfig` holds what the user controls (mass, force) plus the
//! fixed track length; `Track` holds the metres -> pixels mapping.

use crate::error::{finite, Result, SimError};

pub const TRACK_LENGTH: f64 = 1.0; // metres
pub const SIMULATION_SPEED: f64 = 1.0; // 1 = real time
pub const RANDOMNESS_FACTOR: f64 = 0.05; // +-5% display jitter
pub const DEFAULT_MASS: f64 = 2.0; // kg
pub const DEFAULT_FORCE: f64 = 0.0; // N
pub const DEFAULT_TRACK_PIXELS: f64 = 640.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub mass: f64, // kg, <= 0 gives zero acceleration
    pub force: f64, // N, signed
    pub track_length: f64, // m, > 0
}

impl SimulationConfig {
    pub fn new(mass: f64, force: f64, track_length: f64) -> Result<Self> {
        let track_length = finite("track length", track_length)?;
        if track_length <= 0.0 {
            return Err(SimError::InvalidInput { what: "track length", value: track_length });
        }
        Ok(Self {
            mass: finite("mass", mass)?,
            force: finite("force", force)?,
            track_length,
        })
    }

    /// a = F / m, defined as 0 when the mass is not positive
    pub fn acceleration(&self) -> f64 {
        if self.mass > 0.0 { self.force / self.mass } else { 0.0 }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            force: DEFAULT_FORCE,
            track_length: TRACK_LENGTH,
        }
    }
}

/// Visual track: usable pixel length and the derived scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub pixel_length: f64,
    pub pixels_per_meter: f64,
}

impl Track {
    pub fn new(pixel_length: f64, track_length: f64) -> Self {
        let pixel_length = pixel_length.max(0.0);
        let pixels_per_meter = if track_length > 0.0 { pixel_length / track_length } else { 0.0 };
        Self { pixel_length, pixels_per_meter }
    }

    /// Map a physical position onto the track, never past the finish line
    pub fn visual_position(&self, x: f64) -> f64 {
        (x * self.pixels_per_meter).min(self.pixel_length)
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new(DEFAULT_TRACK_PIXELS, TRACK_LENGTH)
    }
}
