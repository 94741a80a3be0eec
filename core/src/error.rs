use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Invalid record count {count}: must be at least 1")]
    InvalidRecordCount { count: usize },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("Malformed input: {reason}")]
    Format { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type FixtureResult<T> = Result<T, FixtureError>;
