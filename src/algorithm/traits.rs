//! Core algorithm traits

use crate::data::{Batch, Scope};
use crate::error::Result;

/// An operation run on every training step, before the parameter update
pub trait StepUpdate: Send {
    /// Apply the operation to the current step's scope
    fn apply(&mut self, scope: &Scope<'_>) -> Result<()>;
}

/// A group of step updates handed to an algorithm in one call
pub type UpdateFragment = Vec<Box<dyn StepUpdate>>;

/// A training algorithm driven by the main loop
pub trait TrainingAlgorithm: Send {
    /// Called once before the first batch
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    /// Process one training batch
    fn process_batch(&mut self, batch: &Batch) -> Result<()>;

    /// The update-injection capability, if this algorithm has it
    fn as_cost_minimizer(&mut self) -> Option<&mut dyn DifferentiableCostMinimizer> {
        None
    }

    /// Algorithm name for logging
    fn name(&self) -> &'static str {
        "TrainingAlgorithm"
    }
}

/// Algorithm minimizing a differentiable cost that accepts extra per-step updates
pub trait DifferentiableCostMinimizer: TrainingAlgorithm {
    /// Register updates to run on every subsequent step
    fn add_updates(&mut self, updates: UpdateFragment);

    /// Number of registered updates
    fn update_count(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Frozen;

    impl TrainingAlgorithm for Frozen {
        fn process_batch(&mut self, _batch: &Batch) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_algorithm_has_no_update_capability() {
        let mut algorithm = Frozen;
        assert!(algorithm.initialize().is_ok());
        assert!(algorithm.as_cost_minimizer().is_none());
        assert_eq!(algorithm.name(), "TrainingAlgorithm");
        assert!(algorithm.process_batch(&Batch::new()).is_ok());
    }
}
