//! Error types for monitoring extensions
//!
//! Every failure is fatal to the callback that raised it and is handed back
//! to the main loop unchanged.

use thiserror::Error;

/// Result type alias for vigilar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by monitors, evaluators and the main loop
#[derive(Debug, Error)]
pub enum Error {
    /// A record was written for a variable with an empty or missing name
    #[error("monitor variable without name")]
    MissingName,

    /// The training algorithm cannot take additional per-step updates
    #[error("training algorithm '{algorithm}' does not accept additional updates\n  → Use a differentiable cost minimizer such as GradientDescent")]
    UnsupportedAlgorithm { algorithm: String },

    /// The reporting phase ran twice for the same completed iteration
    #[error("TrainingDataMonitoring should be invoked no more than once per iteration (iterations done: {iterations_done})")]
    DuplicateReport { iterations_done: u64 },

    /// Aggregators were read or reported before being set up
    #[error("aggregation buffer is not initialized\n  → Schedule the monitor with before_training enabled")]
    NotInitialized,

    /// The one-time setup phase ran a second time
    #[error("monitor was already set up for this training run")]
    AlreadyInitialized,

    /// A data stream epoch produced no batches
    #[error("data stream produced an empty epoch")]
    EmptyStream,

    /// An expression referenced a source or quantity absent from its scope
    #[error("cannot evaluate '{variable}': a source or quantity it reads is not available")]
    UndefinedValue { variable: String },

    /// The cost function returned a gradient of the wrong length
    #[error("gradient has {actual} entries but there are {expected} parameters")]
    GradientShape { expected: usize, actual: usize },

    /// Invalid monitor configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// YAML parsing failure
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Stable error code for structured output
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingName => "M001",
            Self::UnsupportedAlgorithm { .. } => "M002",
            Self::DuplicateReport { .. } => "M003",
            Self::NotInitialized => "M004",
            Self::AlreadyInitialized => "M005",
            Self::EmptyStream => "M010",
            Self::UndefinedValue { .. } => "M011",
            Self::GradientShape { .. } => "M012",
            Self::Config(_) => "M020",
            Self::Yaml(_) => "M021",
            Self::Serialization(_) => "M030",
        }
    }

    /// Whether the error points at a wiring mistake in the host rather than bad data
    pub fn is_integration_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedAlgorithm { .. }
                | Self::DuplicateReport { .. }
                | Self::NotInitialized
                | Self::AlreadyInitialized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = vec![
            Error::MissingName,
            Error::UnsupportedAlgorithm { algorithm: "x".into() },
            Error::DuplicateReport { iterations_done: 0 },
            Error::NotInitialized,
            Error::AlreadyInitialized,
            Error::EmptyStream,
            Error::UndefinedValue { variable: "a".into() },
            Error::GradientShape { expected: 1, actual: 2 },
            Error::Config("bad".into()),
        ];

        let codes: Vec<_> = errors.iter().map(Error::code).collect();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_missing_name_message() {
        assert_eq!(Error::MissingName.to_string(), "monitor variable without name");
    }

    #[test]
    fn test_unsupported_algorithm_names_algorithm() {
        let err = Error::UnsupportedAlgorithm { algorithm: "Frozen".into() };
        let msg = err.to_string();
        assert!(msg.contains("Frozen"));
        assert!(msg.contains("GradientDescent"));
    }

    #[test]
    fn test_duplicate_report_mentions_iteration() {
        let err = Error::DuplicateReport { iterations_done: 42 };
        assert!(err.to_string().contains("42"));
        assert!(err.is_integration_error());
    }

    #[test]
    fn test_data_errors_are_not_integration_errors() {
        assert!(!Error::EmptyStream.is_integration_error());
        assert!(!Error::MissingName.is_integration_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.code(), "M030");
    }
}
