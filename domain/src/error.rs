use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid image dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
