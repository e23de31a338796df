use thiserror::Error;

/// Errors raised while parsing a `category-method-testcase` code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestCodeError {
    /// The input did not split into exactly three parts
    #[error("invalid test code format: {0}")]
    InvalidFormat(String),

    #[error("invalid category number: {0}")]
    InvalidCategory(String),

    #[error("invalid method number: {0}")]
    InvalidMethod(String),

    #[error("invalid testcase number: {0}")]
    InvalidTestcase(String),

    #[error("test code out of range: {0}")]
    OutOfRange(String),
}

/// Error types for the HTTP request helper
#[derive(Debug, Error)]
pub enum HttpError {
    /// The payload could not be encoded as JSON
    #[error("failed to marshal payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Connection, timeout or transport failure
    #[error("failed to send API request to {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Error types for the database query helper
#[derive(Debug, Error)]
pub enum DbError {
    /// Pool could not be created or the server did not answer
    #[error("could not connect to the PostgreSQL database: {0}")]
    Connect(String),

    /// The driver rejected or failed the statement
    #[error("database query failed: {0}")]
    Query(String),

    /// A scalar query returned no rows
    #[error("no row found for parameter {param}")]
    NotFound { param: String },

    /// A scalar query returned more than one row
    #[error("expected exactly one row for parameter {param}, got {count}")]
    UnexpectedRows { param: String, count: usize },
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::Query(err.to_string())
    }
}

/// Error types for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// An environment override could not be parsed
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },

    /// A required setting is empty
    #[error("missing required setting: {0}")]
    Missing(String),
}
