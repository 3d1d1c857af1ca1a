//! Build a ready-to-run session from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing), validates it, and produces the
//! runtime bundle: simulation config, track mapping, time scale and jitter
//! source. `into_controller` hands those to a fresh `SessionController`.

use crate::configuration::config::ScenarioConfig;
use crate::error::{finite, Result, SimError};
use crate::simulation::jitter::Jitter;
use crate::simulation::params::{SimulationConfig, Track};
use crate::simulation::session::SessionController;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub config: SimulationConfig,
    pub track: Track,
    pub simulation_speed: f64,
    pub jitter: Jitter,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        let config = SimulationConfig::new(cfg.cart.mass, cfg.cart.force, cfg.track.length)?;

        let pixel_length = finite("track pixel length", cfg.track.pixel_length)?;
        if pixel_length < 0.0 {
            return Err(SimError::InvalidInput { what: "track pixel length", value: pixel_length });
        }
        let track = Track::new(pixel_length, config.track_length);

        let simulation_speed = finite("simulation speed", cfg.engine.simulation_speed)?;
        if simulation_speed <= 0.0 {
            return Err(SimError::InvalidInput { what: "simulation speed", value: simulation_speed });
        }

        let j_cfg = cfg.engine.jitter;
        let factor = finite("jitter factor", j_cfg.factor)?;
        if !(0.0..1.0).contains(&factor) {
            return Err(SimError::InvalidInput { what: "jitter factor", value: factor });
        }
        let jitter = if j_cfg.enabled { Jitter::new(factor, j_cfg.seed) } else { Jitter::disabled() };

        Ok(Self { config, track, simulation_speed, jitter })
    }

    pub fn into_controller(self) -> SessionController {
        SessionController::new(self.config, self.track, self.simulation_speed, self.jitter)
    }
}
