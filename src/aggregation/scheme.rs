//! Aggregation schemes

use serde::{Deserialize, Serialize};

/// How per-batch values are combined over a reporting interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationScheme {
    /// Average of the per-batch values
    #[default]
    Mean,
    /// Value of the most recent batch
    TakeLast,
    /// Smallest value seen
    Minimum,
    /// Largest value seen
    Maximum,
    /// Sum of the per-batch values
    Sum,
}

/// Running aggregate of one variable
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregator {
    scheme: AggregationScheme,
    count: u64,
    sum: f64,
    last: f64,
    min: f64,
    max: f64,
}

impl Aggregator {
    /// Create an empty aggregator
    pub fn new(scheme: AggregationScheme) -> Self {
        Self {
            scheme,
            count: 0,
            sum: 0.0,
            last: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Scheme this aggregator follows
    pub fn scheme(&self) -> AggregationScheme {
        self.scheme
    }

    /// Number of values seen since the last reset
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Feed one value
    ///
    /// A NaN poisons every scheme except `TakeLast` until the next reset.
    pub fn accumulate(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.last = value;
        // f64::min/max drop NaN operands
        if value.is_nan() || self.min.is_nan() {
            self.min = f64::NAN;
            self.max = f64::NAN;
        } else {
            self.min = self.min.min(value);
            self.max = self.max.max(value);
        }
    }

    /// Aggregated value, `None` if nothing was accumulated
    pub fn readout(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let value = match self.scheme {
            AggregationScheme::Mean => self.sum / self.count as f64,
            AggregationScheme::TakeLast => self.last,
            AggregationScheme::Minimum => self.min,
            AggregationScheme::Maximum => self.max,
            AggregationScheme::Sum => self.sum,
        };
        Some(value)
    }

    /// Forget everything accumulated so far
    pub fn reset(&mut self) {
        *self = Self::new(self.scheme);
    }
}
