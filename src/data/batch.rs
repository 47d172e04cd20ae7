//! Batch data structure and the scope expressions are evaluated in

use std::collections::BTreeMap;

/// A batch of named numeric sources (features, targets, masks, ...)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    sources: BTreeMap<String, Vec<f64>>,
}

impl Batch {
    /// Create an empty batch
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, builder style
    pub fn with_source(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    /// Add or replace a source
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.sources.insert(name.into(), values);
    }

    /// Values of a source
    pub fn source(&self, name: &str) -> Option<&[f64]> {
        self.sources.get(name).map(Vec::as_slice)
    }

    /// Source names in order
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.keys().map(String::as_str)
    }

    /// Number of examples (length of the longest source)
    pub fn size(&self) -> usize {
        self.sources.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// What a monitored expression can see: the batch and, on training
/// batches, the quantities the algorithm computed for this step
#[derive(Clone, Copy, Debug)]
pub struct Scope<'a> {
    batch: &'a Batch,
    quantities: Option<&'a BTreeMap<String, f64>>,
}

impl<'a> Scope<'a> {
    /// Scope over a bare batch (auxiliary data streams)
    pub fn from_batch(batch: &'a Batch) -> Self {
        Self { batch, quantities: None }
    }

    /// Scope over a training batch and the step's quantities
    pub fn with_quantities(batch: &'a Batch, quantities: &'a BTreeMap<String, f64>) -> Self {
        Self { batch, quantities: Some(quantities) }
    }

    /// The batch being evaluated
    pub fn batch(&self) -> &'a Batch {
        self.batch
    }

    /// Values of a batch source
    pub fn source(&self, name: &str) -> Option<&'a [f64]> {
        self.batch.source(name)
    }

    /// A step quantity such as `cost` or `gradient_norm`
    pub fn quantity(&self, name: &str) -> Option<f64> {
        self.quantities.and_then(|q| q.get(name).copied())
    }
}
