//! Aggregation buffer fed by per-step updates

use super::{AggregationScheme, Aggregator, MonitoredVariable, Records};
use crate::algorithm::{StepUpdate, UpdateFragment};
use crate::data::Scope;
use crate::error::{Error, Result};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug)]
struct BufferState {
    aggregators: Vec<Aggregator>,
    initialized: bool,
}

/// Accumulates monitored values across training steps
///
/// The buffer hands the training algorithm an update (see
/// [`AggregationBuffer::accumulation_updates`]) that feeds the aggregators on
/// every step; the owner reads them out and resets them once per interval.
#[derive(Debug)]
pub struct AggregationBuffer {
    variables: Vec<MonitoredVariable>,
    state: Arc<Mutex<BufferState>>,
}

impl AggregationBuffer {
    /// Create a buffer
    ///
    /// With `use_take_last`, variables without an explicit scheme report the
    /// value of the last step instead of the interval mean.
    pub fn new(variables: Vec<MonitoredVariable>, use_take_last: bool) -> Self {
        let fallback =
            if use_take_last { AggregationScheme::TakeLast } else { AggregationScheme::Mean };
        let aggregators =
            variables.iter().map(|v| Aggregator::new(v.scheme().unwrap_or(fallback))).collect();
        Self {
            variables,
            state: Arc::new(Mutex::new(BufferState { aggregators, initialized: false })),
        }
    }

    /// Variables being accumulated
    pub fn variables(&self) -> &[MonitoredVariable] {
        &self.variables
    }

    /// Updates to inject into the algorithm's per-step update list
    pub fn accumulation_updates(&self) -> UpdateFragment {
        vec![Box::new(AccumulationUpdate {
            variables: self.variables.clone(),
            state: Arc::clone(&self.state),
        })]
    }

    /// Reset all aggregators and start a new interval
    pub fn initialize_aggregators(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.aggregators.iter_mut().for_each(Aggregator::reset);
        state.initialized = true;
        tracing::debug!(variables = self.variables.len(), "aggregators initialized");
    }

    /// Check if the aggregators were initialized at least once
    pub fn is_initialized(&self) -> bool {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).initialized
    }

    /// Aggregated values of the current interval
    ///
    /// Variables that saw no step since the last reset are left out.
    pub fn get_aggregated_values(&self) -> Result<Records> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.initialized {
            return Err(Error::NotInitialized);
        }
        Ok(self
            .variables
            .iter()
            .zip(&state.aggregators)
            .filter_map(|(variable, aggregator)| {
                aggregator.readout().map(|value| (variable.record_key().to_string(), value))
            })
            .collect())
    }
}

/// Step update that evaluates the buffer's variables and accumulates them
struct AccumulationUpdate {
    variables: Vec<MonitoredVariable>,
    state: Arc<Mutex<BufferState>>,
}

impl StepUpdate for AccumulationUpdate {
    fn apply(&mut self, scope: &Scope<'_>) -> Result<()> {
        let values =
            self.variables.iter().map(|v| v.evaluate(scope)).collect::<Result<Vec<f64>>>()?;

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.initialized {
            return Err(Error::NotInitialized);
        }
        for (aggregator, value) in state.aggregators.iter_mut().zip(values) {
            aggregator.accumulate(value);
        }
        Ok(())
    }
}
