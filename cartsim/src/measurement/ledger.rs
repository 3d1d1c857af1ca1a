//! Ordered table of results, numbered from 1 for display
//!
//! Rows carry no identity beyond their position: deleting a row shifts the
//! ones after it up and they are renumbered on the next render.

use std::fmt;

use super::record::MeasurementRecord;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    records: Vec<MeasurementRecord>,
    experiments: u64, // finished runs since the last clear
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Monotonic experiment counter, reset only by `clear`
    pub fn experiment_count(&self) -> u64 {
        self.experiments
    }

    /// Append a finished run; returns its 1-based row number
    pub fn record_experiment(&mut self, record: MeasurementRecord) -> usize {
        self.experiments += 1;
        self.push(record)
    }

    /// Append without touching the experiment counter; returns its row number
    pub fn push(&mut self, record: MeasurementRecord) -> usize {
        self.records.push(record);
        self.records.len()
    }

    /// 1-based lookup
    pub fn get(&self, index: usize) -> Result<&MeasurementRecord> {
        index
            .checked_sub(1)
            .and_then(|i| self.records.get(i))
            .ok_or(SimError::NoSuchEntry(index))
    }

    /// Remove the 1-based row `index`; later rows move up by one
    pub fn delete(&mut self, index: usize) -> Result<MeasurementRecord> {
        match index.checked_sub(1) {
            Some(i) if i < self.records.len() => Ok(self.records.remove(i)),
            _ => Err(SimError::NoSuchEntry(index)),
        }
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.experiments = 0;
    }

    /// `(row number, record)` pairs in display order
    pub fn rows(&self) -> impl Iterator<Item = (usize, &MeasurementRecord)> {
        self.records.iter().enumerate().map(|(i, r)| (i + 1, r))
    }
}

impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>3} | {:>8} | {:>8} | {:>8} | {:>20}", "#", "Mass", "Force", "Time (s)", "Final Velocity (m/s)")?;
        for (n, r) in self.rows() {
            let [m, fo, t, v] = r.cells();
            writeln!(f, "{n:>3} | {m:>8} | {fo:>8} | {t:>8} | {v:>20}")?;
        }
        Ok(())
    }
}
