//! Training progress counters

use serde::{Deserialize, Serialize};

/// Progress of a training run as seen by extensions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingStatus {
    /// Number of processed batches
    pub iterations_done: u64,
    /// Number of completed epochs
    pub epochs_done: u64,
    /// Set once the before-training callbacks have run
    pub training_started: bool,
    /// Set while an epoch is in progress
    pub epoch_started: bool,
    /// Set after the last epoch
    pub training_finished: bool,
}
