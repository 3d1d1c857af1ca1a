pub mod simulation;
pub mod measurement;
pub mod configuration;
pub mod visualization;
pub mod error;

pub use simulation::states::{KinematicState, DisplayState, SessionState, TickSnapshot};
pub use simulation::params::{SimulationConfig, Track};
pub use simulation::integrator::{euler_step, integrate};
pub use simulation::jitter::Jitter;
pub use simulation::host::{Clock, FrameScheduler, FrameRequest, FrameHandle, RunId, InstantClock, ManualClock, ManualScheduler};
pub use simulation::session::{SessionController, Runner, StartOutcome, TickResult};
pub use simulation::scenario::Scenario;

pub use measurement::record::MeasurementRecord;
pub use measurement::ledger::Ledger;
pub use measurement::grading::{grade, grade_values, Verdict};

pub use configuration::config::{ScenarioConfig, CartConfig, TrackConfig, EngineConfig, JitterConfig};

pub use error::SimError;

pub use visualization::cart_vis2d::run_2d;
