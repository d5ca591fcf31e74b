use thiserror::Error;

/// Errors raised by the data pipeline (fetch, parse, cache).
#[derive(Debug, Error)]
pub enum DataError {
    #[error("downloading dataset failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("reading dataset file failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported dataset source: {0}")]
    UnsupportedSource(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' is not a valid date")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("cache store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("'{0}' is not a valid table name")]
    InvalidTableName(String),
}

pub type Result<T> = std::result::Result<T, DataError>;
