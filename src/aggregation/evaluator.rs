//! Full-epoch evaluation over a data stream

use super::{Aggregator, MonitoredVariable, Records};
use crate::data::{DataStream, Scope};
use crate::error::{Error, Result};

/// Evaluates monitored variables over one epoch of a data stream
pub trait Evaluator: Send {
    /// Run a full pass over `stream` and return the aggregated values
    fn evaluate(&mut self, stream: &mut dyn DataStream) -> Result<Records>;
}

/// Evaluator that aggregates every variable batch by batch
///
/// Variables without an explicit scheme are averaged over batches.
#[derive(Debug, Clone)]
pub struct DatasetEvaluator {
    variables: Vec<MonitoredVariable>,
}

impl DatasetEvaluator {
    /// Create an evaluator for the given variables
    pub fn new(variables: Vec<MonitoredVariable>) -> Self {
        Self { variables }
    }

    /// Variables being evaluated
    pub fn variables(&self) -> &[MonitoredVariable] {
        &self.variables
    }
}

impl Evaluator for DatasetEvaluator {
    fn evaluate(&mut self, stream: &mut dyn DataStream) -> Result<Records> {
        let mut aggregators: Vec<Aggregator> = self
            .variables
            .iter()
            .map(|v| Aggregator::new(v.scheme().unwrap_or_default()))
            .collect();

        let mut batches = 0usize;
        for batch in stream.epoch() {
            let scope = Scope::from_batch(&batch);
            for (variable, aggregator) in self.variables.iter().zip(aggregators.iter_mut()) {
                aggregator.accumulate(variable.evaluate(&scope)?);
            }
            batches += 1;
        }

        if batches == 0 {
            return Err(Error::EmptyStream);
        }
        tracing::debug!(batches, variables = self.variables.len(), "dataset evaluation done");

        Ok(self
            .variables
            .iter()
            .zip(&aggregators)
            .filter_map(|(variable, aggregator)| {
                aggregator.readout().map(|value| (variable.record_key().to_string(), value))
            })
            .collect())
    }
}
