//! Monitored variable definition

use super::AggregationScheme;
use crate::data::Scope;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

type Expression = Arc<dyn Fn(&Scope<'_>) -> Option<f64> + Send + Sync>;

/// A named expression whose value is tracked during training
///
/// The expression returns `None` when something it reads is missing from the
/// scope, e.g. a step quantity requested on an auxiliary data stream.
#[derive(Clone)]
pub struct MonitoredVariable {
    name: Option<String>,
    expression: Expression,
    scheme: Option<AggregationScheme>,
}

impl MonitoredVariable {
    /// Create a named variable
    pub fn new<F>(name: impl Into<String>, expression: F) -> Self
    where
        F: Fn(&Scope<'_>) -> Option<f64> + Send + Sync + 'static,
    {
        Self { name: Some(name.into()), expression: Arc::new(expression), scheme: None }
    }

    /// Create a variable without a name; it can be evaluated but not recorded
    pub fn unnamed<F>(expression: F) -> Self
    where
        F: Fn(&Scope<'_>) -> Option<f64> + Send + Sync + 'static,
    {
        Self { name: None, expression: Arc::new(expression), scheme: None }
    }

    /// Variable reading a step quantity such as `cost`
    pub fn quantity(name: impl Into<String>) -> Self {
        let name = name.into();
        let key = name.clone();
        Self::new(name, move |scope| scope.quantity(&key))
    }

    /// Aggregate this variable with an explicit scheme
    pub fn with_scheme(mut self, scheme: AggregationScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Variable name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Key used for this variable in [`Records`](super::Records); empty when unnamed
    pub fn record_key(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Explicit aggregation scheme, if any
    pub fn scheme(&self) -> Option<AggregationScheme> {
        self.scheme
    }

    /// Evaluate the expression in a scope
    pub fn evaluate(&self, scope: &Scope<'_>) -> Result<f64> {
        (self.expression)(scope).ok_or_else(|| Error::UndefinedValue {
            variable: self.name.clone().unwrap_or_else(|| "<unnamed>".to_string()),
        })
    }
}

impl fmt::Debug for MonitoredVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitoredVariable")
            .field("name", &self.name)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}
