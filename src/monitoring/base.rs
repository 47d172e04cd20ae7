//! Record naming and write-through shared by monitors

use crate::aggregation::MonitoredVariable;
use crate::error::{Error, Result};
use crate::log::TrainingLog;

/// Separator between a monitor's prefix and a variable name
pub const PREFIX_SEPARATOR: &str = "_";

/// Naming and log writing logic shared by monitoring extensions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitoringExtension {
    prefix: Option<String>,
}

impl MonitoringExtension {
    /// Create with an optional prefix
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Prefix for record names
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Replace the prefix
    pub fn set_prefix(&mut self, prefix: Option<String>) {
        self.prefix = prefix;
    }

    /// Record name for a variable name: `prefix_name`, or `name` without a prefix
    pub fn record_name(&self, name: &str) -> String {
        match self.prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => format!("{prefix}{PREFIX_SEPARATOR}{name}"),
            _ => name.to_string(),
        }
    }

    /// Record name for a variable
    pub fn record_name_of(&self, variable: &MonitoredVariable) -> Result<String> {
        match variable.name() {
            Some(name) if !name.is_empty() => Ok(self.record_name(name)),
            _ => Err(Error::MissingName),
        }
    }

    /// Write `(name, value)` pairs into the log's current row, in order
    ///
    /// Fails on the first empty name; pairs before it stay written.
    pub fn add_records<I, N>(&self, log: &mut TrainingLog, records: I) -> Result<()>
    where
        I: IntoIterator<Item = (N, f64)>,
        N: AsRef<str>,
    {
        for (name, value) in records {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(Error::MissingName);
            }
            log.current_row_mut().set(self.record_name(name), value);
        }
        Ok(())
    }
}
