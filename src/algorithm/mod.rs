//! Training algorithm capabilities
//!
//! A [`TrainingAlgorithm`] processes one batch per step. Algorithms that can
//! run extra per-step operations alongside their own computation also
//! implement [`DifferentiableCostMinimizer`] and advertise it through
//! [`TrainingAlgorithm::as_cost_minimizer`].

mod gradient_descent;
mod traits;

pub use gradient_descent::{CostFn, GradientDescent};
pub use traits::{DifferentiableCostMinimizer, StepUpdate, TrainingAlgorithm, UpdateFragment};
