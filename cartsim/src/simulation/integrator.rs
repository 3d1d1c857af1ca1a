//! Fixed-force time integrator for the cart
//!
//! Semi-implicit (symplectic) Euler: the velocity kick happens before the
//! position drift, so the drift already uses the updated velocity.

use super::params::SimulationConfig;
use super::states::KinematicState;

/// Advance the cart by one step of length `dt` (seconds)
///
/// Pure: identical `(state, cfg, dt)` always produce the identical result.
/// Negative `dt` is treated as zero.
pub fn euler_step(state: KinematicState, cfg: &SimulationConfig, dt: f64) -> KinematicState {
    let dt = dt.max(0.0);
    let a = cfg.acceleration();

    // Kick: v_n+1 = v_n + dt * a
    let v = state.v + a * dt;

    // Drift: x_n+1 = x_n + dt * v_n+1
    let x = state.x + v * dt;

    KinematicState { x, v, t: state.t + dt }
}

/// Run a whole `dt` sequence from rest, returning every intermediate state
pub fn integrate(cfg: &SimulationConfig, dts: &[f64]) -> Vec<KinematicState> {
    let mut state = KinematicState::at_rest();
    dts.iter()
        .map(|&dt| {
            state = euler_step(state, cfg, dt);
            state
        })
        .collect()
}
