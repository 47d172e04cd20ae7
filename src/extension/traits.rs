//! Core traits and types for extensions
//!
//! - `ExtensionContext` - what an extension may touch during a callback
//! - `TrainingExtension` - the trait all extensions implement
//! - `SimpleExtension` - name and schedule shared by concrete extensions

use super::{Callback, Schedule};
use crate::algorithm::TrainingAlgorithm;
use crate::error::Result;
use crate::log::TrainingLog;

/// Main loop state lent to an extension for one callback
pub struct ExtensionContext<'a> {
    /// The training log; monitors write to its current row
    pub log: &'a mut TrainingLog,
    /// The training algorithm
    pub algorithm: &'a mut dyn TrainingAlgorithm,
}

impl<'a> ExtensionContext<'a> {
    /// Borrow the log and algorithm for one callback
    pub fn new(log: &'a mut TrainingLog, algorithm: &'a mut dyn TrainingAlgorithm) -> Self {
        Self { log, algorithm }
    }
}

/// Trait for main loop extensions
pub trait TrainingExtension: Send {
    /// Extension name for logging
    fn name(&self) -> &str;

    /// Callbacks this extension runs on
    fn schedule(&self) -> &Schedule;

    /// Do the extension's work for `callback`
    fn perform(&mut self, callback: Callback, ctx: &mut ExtensionContext<'_>) -> Result<()>;

    /// Run [`perform`](TrainingExtension::perform) if the schedule fires.
    /// Returns whether it ran.
    fn dispatch(&mut self, callback: Callback, ctx: &mut ExtensionContext<'_>) -> Result<bool> {
        if !self.schedule().fires(callback, ctx.log.status()) {
            return Ok(false);
        }
        tracing::debug!(extension = self.name(), callback = callback.name(), "dispatching");
        self.perform(callback, ctx)?;
        Ok(true)
    }
}

/// Name and schedule of an extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleExtension {
    name: String,
    schedule: Schedule,
}

impl SimpleExtension {
    /// Create with an explicit schedule
    pub fn new(name: impl Into<String>, schedule: Schedule) -> Self {
        Self { name: name.into(), schedule }
    }

    /// Extension name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the extension
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Current schedule
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Replace the schedule
    pub fn set_schedule(&mut self, schedule: Schedule) {
        self.schedule = schedule;
    }
}
