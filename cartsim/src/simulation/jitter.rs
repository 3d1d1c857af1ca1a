//! Bounded multiplicative noise for displayed values
//!
//! Each call draws a fresh factor in `[1 - f, 1 + f]`; time and velocity get
//! independent draws every tick. Physics state never sees these values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::states::{DisplayState, KinematicState};

#[derive(Debug, Clone)]
pub struct Jitter {
    rng: StdRng,
    factor: f64,
    enabled: bool,
}

impl Jitter {
    /// `seed = None` draws the seed from OS entropy
    pub fn new(factor: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng, factor: factor.abs(), enabled: true }
    }

    /// Identity jitter: displayed values equal the true ones
    pub fn disabled() -> Self {
        Self { rng: StdRng::seed_from_u64(0), factor: 0.0, enabled: false }
    }

    pub fn factor(&self) -> f64 {
        if self.enabled { self.factor } else { 0.0 }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// value * (1 + u * factor), u uniform in [-1, 1]
    pub fn apply(&mut self, value: f64) -> f64 {
        if !self.enabled || self.factor == 0.0 {
            return value;
        }
        let u: f64 = self.rng.gen_range(-1.0..=1.0);
        value * (1.0 + u * self.factor)
    }

    /// Derive what the user sees from the true state
    pub fn display(&mut self, state: &KinematicState) -> DisplayState {
        DisplayState {
            time: self.apply(state.t),
            velocity: self.apply(state.v),
        }
    }
}
