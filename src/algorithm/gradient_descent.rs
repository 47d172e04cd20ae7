//! Gradient descent over a flat parameter vector

use super::{DifferentiableCostMinimizer, TrainingAlgorithm, UpdateFragment};
use crate::data::{Batch, Scope};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Cost function: returns the cost and its gradient for the given parameters
pub type CostFn = Box<dyn FnMut(&[f64], &Batch) -> (f64, Vec<f64>) + Send>;

/// Gradient descent with optional momentum
///
/// Each step exposes the quantities `cost`, `gradient_norm` and
/// `learning_rate` to the injected updates, which run before the parameters
/// change.
pub struct GradientDescent {
    params: Vec<f64>,
    lr: f64,
    momentum: f64,
    velocities: Vec<f64>,
    cost_fn: CostFn,
    updates: UpdateFragment,
}

impl GradientDescent {
    /// Create plain gradient descent
    pub fn new<F>(params: Vec<f64>, lr: f64, cost_fn: F) -> Self
    where
        F: FnMut(&[f64], &Batch) -> (f64, Vec<f64>) + Send + 'static,
    {
        let velocities = vec![0.0; params.len()];
        Self {
            params,
            lr,
            momentum: 0.0,
            velocities,
            cost_fn: Box::new(cost_fn),
            updates: Vec::new(),
        }
    }

    /// Use momentum
    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    /// Current parameters
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// Learning rate
    pub fn lr(&self) -> f64 {
        self.lr
    }
}

impl TrainingAlgorithm for GradientDescent {
    fn process_batch(&mut self, batch: &Batch) -> Result<()> {
        let (cost, grad) = (self.cost_fn)(&self.params, batch);
        if grad.len() != self.params.len() {
            return Err(Error::GradientShape { expected: self.params.len(), actual: grad.len() });
        }

        let gradient_norm = grad.iter().map(|g| g * g).sum::<f64>().sqrt();
        let mut quantities = BTreeMap::new();
        quantities.insert("cost".to_string(), cost);
        quantities.insert("gradient_norm".to_string(), gradient_norm);
        quantities.insert("learning_rate".to_string(), self.lr);

        let scope = Scope::with_quantities(batch, &quantities);
        for update in &mut self.updates {
            update.apply(&scope)?;
        }

        for ((param, velocity), g) in self.params.iter_mut().zip(&mut self.velocities).zip(&grad) {
            // v = momentum * v - lr * grad
            *velocity = self.momentum * *velocity - self.lr * g;
            *param += *velocity;
        }
        Ok(())
    }

    fn as_cost_minimizer(&mut self) -> Option<&mut dyn DifferentiableCostMinimizer> {
        Some(self)
    }

    fn name(&self) -> &'static str {
        "GradientDescent"
    }
}

impl DifferentiableCostMinimizer for GradientDescent {
    fn add_updates(&mut self, updates: UpdateFragment) {
        tracing::debug!(count = updates.len(), "step updates registered");
        self.updates.extend(updates);
    }

    fn update_count(&self) -> usize {
        self.updates.len()
    }
}
