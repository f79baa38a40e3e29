use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("duplicate field path in configuration: {path}")]
    DuplicateFieldPath { path: String },
    #[error("invalid statistics for {path}: {message}")]
    InvalidStatistics { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
