//! Self-check of a student's acceleration against a ledger row
//!
//! The reference is the measured acceleration (v/t from the noisy readouts)
//! when available, otherwise the theoretical F/m.

use std::fmt;

use super::record::{fmt_num, MeasurementRecord};
use crate::error::SimError;

pub const RELATIVE_TOLERANCE: f64 = 0.05;
pub const ABSOLUTE_TOLERANCE: f64 = 1e-3;

#[derive(Debug)]
pub enum Verdict {
    Pass { expected: f64 },
    Fail { expected: f64 },
    Invalid(SimError),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass { .. })
    }

    pub fn expected(&self) -> Option<f64> {
        match self {
            Verdict::Pass { expected } | Verdict::Fail { expected } => Some(*expected),
            Verdict::Invalid(_) => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass { expected } => write!(f, "Correct ✓ (a={} m/s²)", fmt_num(*expected, 3)),
            Verdict::Fail { expected } => write!(f, "Not quite ✗ Expected ≈ {} m/s²", fmt_num(*expected, 3)),
            Verdict::Invalid(e) => write!(f, "{e}"),
        }
    }
}

/// Within 5% of the reference, or within 1e-3 absolute for references near 0
pub fn within_tolerance(user: f64, expected: f64) -> bool {
    let diff = (user - expected).abs();
    // a few ulps so that 2.1 vs 2.0 sits on the boundary, not just past it
    let ulps = 4.0 * f64::EPSILON * user.abs().max(expected.abs());
    diff <= expected.abs() * RELATIVE_TOLERANCE + ulps || diff <= ABSOLUTE_TOLERANCE
}

/// Grade from raw accelerations; non-finite references count as missing
pub fn grade_values(user: f64, theoretical: Option<f64>, measured: Option<f64>) -> Verdict {
    if !user.is_finite() {
        return Verdict::Invalid(SimError::NotANumber);
    }
    let reference = measured
        .filter(|a| a.is_finite())
        .or_else(|| theoretical.filter(|a| a.is_finite()));

    match reference {
        None => Verdict::Invalid(SimError::NoReference),
        Some(expected) if within_tolerance(user, expected) => Verdict::Pass { expected },
        Some(expected) => Verdict::Fail { expected },
    }
}

pub fn grade(user: f64, record: &MeasurementRecord) -> Verdict {
    grade_values(user, record.theoretical_acceleration(), record.measured_acceleration())
}

/// Grade raw text as typed into the input box; empty or unparsable is invalid
pub fn grade_input(raw: &str, record: &MeasurementRecord) -> Verdict {
    match raw.trim().parse::<f64>() {
        Ok(user) => grade(user, record),
        Err(_) => Verdict::Invalid(SimError::NotANumber),
    }
}
