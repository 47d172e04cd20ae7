//! Lifecycle callbacks

use std::fmt;

/// Point in the main loop at which extensions are invoked
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Callback {
    /// Once, before the first epoch starts
    BeforeTraining,
    /// At the start of the first epoch only
    BeforeFirstEpoch,
    /// At the start of every epoch
    BeforeEpoch,
    /// Before every training step
    BeforeBatch,
    /// After every training step
    AfterBatch,
    /// After every completed epoch
    AfterEpoch,
    /// Once, after the last epoch
    AfterTraining,
}

impl Callback {
    /// Callback name as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Callback::BeforeTraining => "before_training",
            Callback::BeforeFirstEpoch => "before_first_epoch",
            Callback::BeforeEpoch => "before_epoch",
            Callback::BeforeBatch => "before_batch",
            Callback::AfterBatch => "after_batch",
            Callback::AfterEpoch => "after_epoch",
            Callback::AfterTraining => "after_training",
        }
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
