use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Malformed line {line}: {details}")]
    MalformedLine { line: usize, details: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InsightsError>;
