//! Monitored variables and how their values are aggregated
//!
//! - [`MonitoredVariable`] - a named expression over a [`Scope`](crate::Scope)
//! - [`Aggregator`] - running aggregate following an [`AggregationScheme`]
//! - [`DatasetEvaluator`] - full-epoch evaluation over a data stream
//! - [`AggregationBuffer`] - accumulation across training steps

mod buffer;
mod evaluator;
mod scheme;
mod variable;

pub use buffer::AggregationBuffer;
pub use evaluator::{DatasetEvaluator, Evaluator};
pub use scheme::{AggregationScheme, Aggregator};
pub use variable::MonitoredVariable;

use std::collections::BTreeMap;

/// Aggregated values keyed by variable name
pub type Records = BTreeMap<String, f64>;
