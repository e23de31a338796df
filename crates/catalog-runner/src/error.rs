//! Error types for the scenario runner and catalog steps.

use catalog_test_utils::{DbError, HttpError, TestCodeError};
use thiserror::Error;

/// Reasons a step fails
#[derive(Debug, Error)]
pub enum StepError {
    /// An expectation did not hold
    #[error("expected {what} {expected}, got {actual}")]
    Assertion {
        what: String,
        expected: String,
        actual: String,
    },

    /// A previous step did not leave the state this step needs
    #[error("precondition not met: {0}")]
    Precondition(String),

    #[error("invalid step argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    TestCode(#[from] TestCodeError),

    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("failed to read response body: {0}")]
    ResponseBody(String),

    /// The handler panicked
    #[error("step panicked: {0}")]
    Panicked(String),
}

impl StepError {
    pub fn assertion(what: &str, expected: impl ToString, actual: impl ToString) -> Self {
        StepError::Assertion {
            what: what.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Errors raised while setting up or loading a run
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A step pattern is not a valid regular expression
    #[error("invalid step pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse feature {path}: {message}")]
    FeatureParse { path: String, message: String },

    #[error("no feature files found in {0}")]
    NoFeatures(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StepResult = Result<(), StepError>;
