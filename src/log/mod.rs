//! Training log
//!
//! The log keeps one [`LogRow`] per point in the training timeline, keyed by
//! the number of iterations done when the row was written. Monitors write to
//! the *current* row, i.e. the row of the latest completed iteration.

mod row;
mod status;

pub use row::LogRow;
pub use status::TrainingStatus;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// In-memory training log owned by the main loop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingLog {
    status: TrainingStatus,
    rows: BTreeMap<u64, LogRow>,
}

impl TrainingLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Training progress counters
    pub fn status(&self) -> &TrainingStatus {
        &self.status
    }

    /// Mutable training progress counters
    pub fn status_mut(&mut self) -> &mut TrainingStatus {
        &mut self.status
    }

    /// Row for the current iteration, if anything was written to it
    pub fn current_row(&self) -> Option<&LogRow> {
        self.rows.get(&self.status.iterations_done)
    }

    /// Row for the current iteration, created on first access
    pub fn current_row_mut(&mut self) -> &mut LogRow {
        self.rows.entry(self.status.iterations_done).or_default()
    }

    /// Row written at a given iteration
    pub fn row(&self, iteration: u64) -> Option<&LogRow> {
        self.rows.get(&iteration)
    }

    /// All rows in iteration order
    pub fn rows(&self) -> impl Iterator<Item = (u64, &LogRow)> {
        self.rows.iter().map(|(iteration, row)| (*iteration, row))
    }

    /// Latest value of a record across all rows, with its iteration
    pub fn last_value(&self, name: &str) -> Option<(u64, f64)> {
        self.rows
            .iter()
            .rev()
            .find_map(|(iteration, row)| row.get(name).map(|value| (*iteration, value)))
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no row has been written
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize the whole log as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Restore a log from JSON produced by [`TrainingLog::to_json`]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
