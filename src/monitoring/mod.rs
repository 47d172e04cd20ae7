//! Monitoring extensions
//!
//! - [`DataStreamMonitoring`] evaluates variables over a full pass of an
//!   auxiliary data stream (validation, test, ...)
//! - [`TrainingDataMonitoring`] piggybacks on the training algorithm's step
//!   so values are computed once per batch and aggregated between reports
//!
//! Both write through a [`MonitoringExtension`], which owns record naming.

mod base;
mod data_stream;
mod training_data;

pub use base::{MonitoringExtension, PREFIX_SEPARATOR};
pub use data_stream::DataStreamMonitoring;
pub use training_data::TrainingDataMonitoring;
