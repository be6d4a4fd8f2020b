use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Entropy source exhausted")]
    EntropyExhausted,

    #[error("Entropy source returned an invalid draw: {value}")]
    EntropyCorrupted { value: f64 },

    #[error("Invalid planet config: {reason}")]
    InvalidConfig { reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
