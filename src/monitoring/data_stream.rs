//! Monitoring on auxiliary data streams

use super::MonitoringExtension;
use crate::aggregation::{DatasetEvaluator, Evaluator, MonitoredVariable};
use crate::config::MonitorConfig;
use crate::data::DataStream;
use crate::error::Result;
use crate::extension::{Callback, ExtensionContext, Schedule, SimpleExtension, TrainingExtension};

/// Monitors variables over a full epoch of a data stream
///
/// By default monitoring runs before the first epoch and after every epoch.
///
/// # Example
///
/// ```rust
/// use vigilar::{Batch, DataStreamMonitoring, InMemoryDataStream, MonitoredVariable};
///
/// let valid = InMemoryDataStream::new(vec![Batch::new().with_source("y", vec![1.0])]);
/// let monitor = DataStreamMonitoring::new(
///     vec![MonitoredVariable::new("y_sum", |s| s.source("y").map(|y| y.iter().sum()))],
///     valid,
/// )
/// .with_prefix("valid");
/// assert_eq!(monitor.monitoring().record_name("y_sum"), "valid_y_sum");
/// ```
pub struct DataStreamMonitoring<E = DatasetEvaluator> {
    base: SimpleExtension,
    monitoring: MonitoringExtension,
    evaluator: E,
    data_stream: Box<dyn DataStream>,
}

fn auxiliary_schedule() -> Schedule {
    Schedule::new().before_first_epoch(true).after_every_epoch(true)
}

impl DataStreamMonitoring<DatasetEvaluator> {
    /// Monitor `variables` on `data_stream`
    pub fn new(variables: Vec<MonitoredVariable>, data_stream: impl DataStream + 'static) -> Self {
        Self::with_evaluator(DatasetEvaluator::new(variables), data_stream)
    }

    /// Before the first epoch and after every epoch
    pub fn default_schedule() -> Schedule {
        auxiliary_schedule()
    }
}

impl<E: Evaluator> DataStreamMonitoring<E> {
    /// Monitor with a custom evaluator
    pub fn with_evaluator(evaluator: E, data_stream: impl DataStream + 'static) -> Self {
        Self {
            base: SimpleExtension::new("DataStreamMonitoring", auxiliary_schedule()),
            monitoring: MonitoringExtension::default(),
            evaluator,
            data_stream: Box::new(data_stream),
        }
    }

    /// Prefix record names with `prefix_`
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.monitoring.set_prefix(Some(prefix.into()));
        self
    }

    /// Replace the default schedule
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.base.set_schedule(schedule);
        self
    }

    /// Rename the extension
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.base.set_name(name);
        self
    }

    /// Apply prefix and schedule from configuration
    pub fn with_config(mut self, config: &MonitorConfig) -> Result<Self> {
        config.validate()?;
        if let Some(prefix) = &config.prefix {
            self.monitoring.set_prefix(Some(prefix.clone()));
        }
        if let Some(schedule) = &config.schedule {
            self.base.set_schedule(schedule.clone());
        }
        Ok(self)
    }

    /// Naming helper
    pub fn monitoring(&self) -> &MonitoringExtension {
        &self.monitoring
    }

    /// The evaluator
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<E: Evaluator> TrainingExtension for DataStreamMonitoring<E> {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn schedule(&self) -> &Schedule {
        self.base.schedule()
    }

    fn perform(&mut self, callback: Callback, ctx: &mut ExtensionContext<'_>) -> Result<()> {
        tracing::info!(
            extension = self.base.name(),
            callback = callback.name(),
            "Monitoring on auxiliary data started"
        );
        let records = self.evaluator.evaluate(self.data_stream.as_mut())?;
        self.monitoring.add_records(ctx.log, records)?;
        tracing::info!(extension = self.base.name(), "Monitoring on auxiliary data finished");
        Ok(())
    }
}
