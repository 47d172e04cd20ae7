//! Vigilar: monitoring extensions for training main loops
//!
//! Monitored variables are evaluated either over an auxiliary data stream
//! (`DataStreamMonitoring`) or on the training batches themselves by
//! piggybacking on the algorithm's per-step updates
//! (`TrainingDataMonitoring`). Aggregated values land in the current row of
//! the `TrainingLog`.
//!
//! # Example
//!
//! ```rust
//! use vigilar::{
//!     Batch, DataStreamMonitoring, GradientDescent, InMemoryDataStream, MainLoop,
//!     MonitoredVariable, Schedule, TrainingDataMonitoring,
//! };
//!
//! let batches = vec![
//!     Batch::new().with_source("x", vec![1.0, 2.0]),
//!     Batch::new().with_source("x", vec![3.0, 4.0]),
//! ];
//!
//! // Fit a single scalar to the mean of `x`.
//! let algorithm = GradientDescent::new(vec![0.0], 0.1, |params, batch| {
//!     let xs = batch.source("x").unwrap_or(&[]);
//!     let n = xs.len().max(1) as f64;
//!     let cost = xs.iter().map(|x| (params[0] - x).powi(2)).sum::<f64>() / n;
//!     let grad = xs.iter().map(|x| 2.0 * (params[0] - x)).sum::<f64>() / n;
//!     (cost, vec![grad])
//! });
//!
//! let cost = MonitoredVariable::new("cost", |scope| scope.quantity("cost"));
//! let mean_x = MonitoredVariable::new("mean_x", |scope| {
//!     let xs = scope.source("x")?;
//!     Some(xs.iter().sum::<f64>() / xs.len() as f64)
//! });
//!
//! let mut main_loop = MainLoop::new(algorithm, InMemoryDataStream::new(batches.clone()));
//! main_loop.add_extension(
//!     TrainingDataMonitoring::new(vec![cost])
//!         .with_prefix("train")
//!         .with_schedule(Schedule::new().before_training(true).after_every_epoch(true)),
//! );
//! main_loop.add_extension(
//!     DataStreamMonitoring::new(vec![mean_x], InMemoryDataStream::new(batches))
//!         .with_prefix("valid"),
//! );
//! main_loop.run(2).unwrap();
//!
//! let row = main_loop.log().current_row().unwrap();
//! assert!(row.get("train_cost").is_some());
//! assert_eq!(row.get("valid_mean_x"), Some(2.5));
//! ```

pub mod aggregation;
pub mod algorithm;
pub mod config;
pub mod data;
pub mod error;
pub mod extension;
pub mod log;
pub mod main_loop;
pub mod monitoring;

pub use aggregation::{
    AggregationBuffer, AggregationScheme, Aggregator, DatasetEvaluator, Evaluator,
    MonitoredVariable, Records,
};
pub use algorithm::{
    DifferentiableCostMinimizer, GradientDescent, StepUpdate, TrainingAlgorithm, UpdateFragment,
};
pub use config::MonitorConfig;
pub use data::{Batch, DataStream, InMemoryDataStream, Scope};
pub use error::{Error, Result};
pub use extension::{Callback, ExtensionContext, Schedule, SimpleExtension, TrainingExtension};
pub use log::{LogRow, TrainingLog, TrainingStatus};
pub use main_loop::MainLoop;
pub use monitoring::{
    DataStreamMonitoring, MonitoringExtension, TrainingDataMonitoring, PREFIX_SEPARATOR,
};
