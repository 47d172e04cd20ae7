//! When an extension runs

use super::Callback;
use crate::error::{Error, Result};
use crate::log::TrainingStatus;
use serde::{Deserialize, Serialize};

/// Callback triggers of an extension
///
/// All triggers are off by default; each monitor sets its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schedule {
    /// Run once before training starts
    pub before_training: bool,
    /// Run at the start of the first epoch
    pub before_first_epoch: bool,
    /// Run at the start of every epoch
    pub before_every_epoch: bool,
    /// Run before every batch
    pub before_every_batch: bool,
    /// Run after every batch
    pub after_every_batch: bool,
    /// Run after every epoch
    pub after_every_epoch: bool,
    /// Run once after training
    pub after_training: bool,
    /// Run after every n-th epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub every_n_epochs: Option<u64>,
    /// Run after every n-th batch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub every_n_batches: Option<u64>,
}

impl Schedule {
    /// Schedule with every trigger off
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `before_training`
    pub fn before_training(mut self, on: bool) -> Self {
        self.before_training = on;
        self
    }

    /// Toggle `before_first_epoch`
    pub fn before_first_epoch(mut self, on: bool) -> Self {
        self.before_first_epoch = on;
        self
    }

    /// Toggle `before_every_epoch`
    pub fn before_every_epoch(mut self, on: bool) -> Self {
        self.before_every_epoch = on;
        self
    }

    /// Toggle `before_every_batch`
    pub fn before_every_batch(mut self, on: bool) -> Self {
        self.before_every_batch = on;
        self
    }

    /// Toggle `after_every_batch`
    pub fn after_every_batch(mut self, on: bool) -> Self {
        self.after_every_batch = on;
        self
    }

    /// Toggle `after_every_epoch`
    pub fn after_every_epoch(mut self, on: bool) -> Self {
        self.after_every_epoch = on;
        self
    }

    /// Toggle `after_training`
    pub fn after_training(mut self, on: bool) -> Self {
        self.after_training = on;
        self
    }

    /// Run after every `n`-th epoch
    pub fn every_n_epochs(mut self, n: u64) -> Self {
        self.every_n_epochs = Some(n);
        self
    }

    /// Run after every `n`-th batch
    pub fn every_n_batches(mut self, n: u64) -> Self {
        self.every_n_batches = Some(n);
        self
    }

    /// Reject zero periods
    pub fn validate(&self) -> Result<()> {
        if self.every_n_epochs == Some(0) {
            return Err(Error::Config("every_n_epochs must be > 0".to_string()));
        }
        if self.every_n_batches == Some(0) {
            return Err(Error::Config("every_n_batches must be > 0".to_string()));
        }
        Ok(())
    }

    /// Whether the extension should run for `callback` given the loop status
    pub fn fires(&self, callback: Callback, status: &TrainingStatus) -> bool {
        let every = |period: Option<u64>, counter: u64| {
            period.is_some_and(|n| n > 0 && counter > 0 && counter % n == 0)
        };
        match callback {
            Callback::BeforeTraining => self.before_training,
            Callback::BeforeFirstEpoch => self.before_first_epoch,
            Callback::BeforeEpoch => self.before_every_epoch,
            Callback::BeforeBatch => self.before_every_batch,
            Callback::AfterBatch => {
                self.after_every_batch || every(self.every_n_batches, status.iterations_done)
            }
            Callback::AfterEpoch => {
                self.after_every_epoch || every(self.every_n_epochs, status.epochs_done)
            }
            Callback::AfterTraining => self.after_training,
        }
    }
}
