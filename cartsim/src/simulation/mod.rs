pub mod states;
pub mod params;
pub mod integrator;
pub mod jitter;
pub mod host;
pub mod session;
pub mod scenario;
