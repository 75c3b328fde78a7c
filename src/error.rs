use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrackError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Invalid Key: {0}")]
    InvalidKey(String),

    #[error("Invalid key size range {min}..={max}")]
    InvalidKeyRange { min: usize, max: usize },

    #[error("Search produced no candidates")]
    NoCandidates,

    #[error("Worker Error: {0}")]
    Worker(String),
}

pub type CrackResult<T> = Result<T, CrackError>;
