//! Error types shared by every stage of the pipeline

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: missing columns, non-numeric amounts, bad dates
    #[error("Format error: {0}")]
    Format(String),

    #[error("No transactions to analyze")]
    EmptyInput,

    /// Network or API failure talking to the insight service
    #[error("Insight service error: {0}")]
    ExternalService(String),

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
