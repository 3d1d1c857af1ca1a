//! Core state types for the cart simulation.
//!
//! - `KinematicState` is the true physics state advanced by the integrator
//! - `DisplayState` is the jittered copy shown to the user
//! - `SessionState` is the lifecycle of a run
//! - `TickSnapshot` is what the UI layer renders after every tick

use std::fmt;

/// True kinematic state of the cart along the track (1D)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicState {
    pub x: f64, // position (m)
    pub v: f64, // velocity (m/s)
    pub t: f64, // simulated time (s)
}

impl KinematicState {
    /// Cart at rest at the start line, t = 0
    pub fn at_rest() -> Self {
        Self::default()
    }
}

/// Values shown to the user; never fed back into `KinematicState`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayState {
    pub time: f64,     // displayed time (s)
    pub velocity: f64, // displayed velocity (m/s)
}

impl DisplayState {
    /// Readout line for the timer, e.g. `Time: 1.23 s`
    pub fn time_label(&self) -> String {
        format!("Time: {:.2} s", self.time)
    }

    /// Readout line for the speedometer, e.g. `Velocity: 0.98 m/s`
    pub fn velocity_label(&self) -> String {
        format!("Velocity: {:.2} m/s", self.velocity)
    }
}

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
    Finished,
}

impl SessionState {
    /// Mass/force controls and the start button are enabled
    pub fn accepts_start(self) -> bool {
        !matches!(self, SessionState::Running)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Idle => "idle",
            SessionState::Running => "running",
            SessionState::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Per-tick output for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSnapshot {
    pub display: DisplayState,
    pub visual_position: f64, // clamped pixel coordinate along the track
    pub state: SessionState,
}
