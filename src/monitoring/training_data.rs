//! Monitoring on training batches

use super::MonitoringExtension;
use crate::aggregation::{AggregationBuffer, MonitoredVariable};
use crate::config::MonitorConfig;
use crate::error::{Error, Result};
use crate::extension::{Callback, ExtensionContext, Schedule, SimpleExtension, TrainingExtension};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Accumulating { last_report: Option<u64> },
}

/// Monitors variables on training batches
///
/// On `before_training` the monitor injects its accumulation update into the
/// algorithm, which must be a
/// [`DifferentiableCostMinimizer`](crate::DifferentiableCostMinimizer). Every
/// other scheduled callback writes the values aggregated since the previous
/// report and starts a new interval. Variables without an explicit scheme
/// report their value on the latest step.
///
/// All monitored variables are evaluated before the parameter update.
///
/// The default schedule only contains `before_training`; add the reporting
/// trigger, e.g. `after_every_epoch`, with [`TrainingDataMonitoring::with_schedule`]
/// and keep `before_training` on.
pub struct TrainingDataMonitoring {
    base: SimpleExtension,
    monitoring: MonitoringExtension,
    buffer: AggregationBuffer,
    phase: Phase,
}

impl TrainingDataMonitoring {
    /// Monitor `variables` on training batches
    pub fn new(variables: Vec<MonitoredVariable>) -> Self {
        Self {
            base: SimpleExtension::new("TrainingDataMonitoring", Self::default_schedule()),
            monitoring: MonitoringExtension::default(),
            buffer: AggregationBuffer::new(variables, true),
            phase: Phase::Uninitialized,
        }
    }

    /// Only `before_training`
    pub fn default_schedule() -> Schedule {
        Schedule::new().before_training(true)
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

    /// The aggregation buffer
    pub fn buffer(&self) -> &AggregationBuffer {
        &self.buffer
    }

    /// Whether the setup phase has run
    pub fn is_initialized(&self) -> bool {
        matches!(self.phase, Phase::Accumulating { .. })
    }

    /// Iteration of the last report, if any
    pub fn last_report(&self) -> Option<u64> {
        match self.phase {
            Phase::Accumulating { last_report } => last_report,
            Phase::Uninitialized => None,
        }
    }

    fn setup(&mut self, ctx: &mut ExtensionContext<'_>) -> Result<()> {
        if self.is_initialized() {
            return Err(Error::AlreadyInitialized);
        }
        let algorithm_name = ctx.algorithm.name();
        let Some(minimizer) = ctx.algorithm.as_cost_minimizer() else {
            return Err(Error::UnsupportedAlgorithm { algorithm: algorithm_name.to_string() });
        };

        minimizer.add_updates(self.buffer.accumulation_updates());
        self.buffer.initialize_aggregators();
        self.phase = Phase::Accumulating { last_report: None };
        tracing::info!(
            extension = self.base.name(),
            algorithm = algorithm_name,
            variables = self.buffer.variables().len(),
            "Training data monitoring set up"
        );
        Ok(())
    }

    fn report(&mut self, ctx: &mut ExtensionContext<'_>) -> Result<()> {
        let Phase::Accumulating { last_report } = self.phase else {
            return Err(Error::NotInitialized);
        };
        let iterations_done = ctx.log.status().iterations_done;
        if last_report == Some(iterations_done) {
            return Err(Error::DuplicateReport { iterations_done });
        }

        let values = self.buffer.get_aggregated_values()?;
        self.monitoring.add_records(ctx.log, values)?;
        self.buffer.initialize_aggregators();
        self.phase = Phase::Accumulating { last_report: Some(iterations_done) };
        Ok(())
    }
}

impl TrainingExtension for TrainingDataMonitoring {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn schedule(&self) -> &Schedule {
        self.base.schedule()
    }

    fn perform(&mut self, callback: Callback, ctx: &mut ExtensionContext<'_>) -> Result<()> {
        match callback {
            Callback::BeforeTraining => self.setup(ctx),
            _ => self.report(ctx),
        }
    }
}
