//! Analysis error types

use thiserror::Error;

use crate::experiment::ExperimentError;

/// Errors raised by the analysis pipeline
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A declared family name failed to compile as a match pattern
    #[error("invalid pattern for family '{family}': {source}")]
    InvalidPattern {
        family: String,
        #[source]
        source: regex::Error,
    },

    /// A metric appeared in the tables with no registered scorer
    #[error("no scorer registered for metric '{0}'")]
    UnknownMetric(String),

    /// The Friedman test needs at least three compared methods
    #[error("Friedman test requires at least {required} method families, found {found}")]
    InsufficientMethods { found: usize, required: usize },

    /// Experiment preconditions failed
    #[error(transparent)]
    Experiment(#[from] ExperimentError),
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
