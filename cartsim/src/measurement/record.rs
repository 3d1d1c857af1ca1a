//! One completed (or externally entered) experiment

/// Format a number with `dp` decimals, `-` for NaN/inf
pub fn fmt_num(n: f64, dp: usize) -> String {
    if n.is_finite() {
        format!("{n:.dp$}")
    } else {
        "-".to_string()
    }
}

/// Immutable measurement kept in the results ledger
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementRecord {
    pub mass: f64,
    pub force: f64,
    pub time: f64,     // displayed (noisy) final time
    pub velocity: f64, // displayed (noisy) final velocity
}

impl MeasurementRecord {
    pub fn new(mass: f64, force: f64, time: f64, velocity: f64) -> Self {
        Self { mass, force, time, velocity }
    }

    /// F / m, `None` when the mass is not positive
    pub fn theoretical_acceleration(&self) -> Option<f64> {
        let a = self.force / self.mass;
        (self.mass > 0.0 && a.is_finite()).then_some(a)
    }

    /// v / t from the displayed values, `None` when t <= 0
    pub fn measured_acceleration(&self) -> Option<f64> {
        let a = self.velocity / self.time;
        (self.time > 0.0 && a.is_finite()).then_some(a)
    }

    /// Table cells in header order: mass, force, time, final velocity
    pub fn cells(&self) -> [String; 4] {
        [
            fmt_num(self.mass, 1),
            fmt_num(self.force, 1),
            fmt_num(self.time, 2),
            fmt_num(self.velocity, 2),
        ]
    }
}
