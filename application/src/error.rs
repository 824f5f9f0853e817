use std::io;
use thiserror::Error;

use domain::error::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{message}")]
    ValidationError { message: String },

    #[error("Invalid image: {message}")]
    DecodeError { message: String },

    #[error("Unknown operation: {name}")]
    UnknownOperation { name: String },

    #[error("Error processing image: {message}")]
    ProcessingError { message: String },

    #[error("Payload exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Internal server error")]
    InternalServerError,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::DecodeError {
            message: message.into(),
        }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    /// Lifts domain rejections into the request-facing error kinds.
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Domain(DomainError::UnknownOperation(name)) => Self::UnknownOperation { name },
            Self::Domain(err @ DomainError::InvalidParameter { .. }) => {
                Self::validation(err.to_string())
            }
            Self::Domain(err @ DomainError::InvalidDimensions(_)) => {
                Self::processing(err.to_string())
            }
            other => other,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_domain_kinds() {
        let unknown = AppError::from(DomainError::UnknownOperation("swirl".into())).normalize();
        assert!(matches!(unknown, AppError::UnknownOperation { ref name } if name == "swirl"));

        let invalid = AppError::from(DomainError::InvalidParameter {
            name: "scale".into(),
            message: "must be greater than 0, got 0".into(),
        })
        .normalize();
        assert!(matches!(invalid, AppError::ValidationError { .. }));
        assert_eq!(
            invalid.to_string(),
            "Invalid parameter 'scale': must be greater than 0, got 0"
        );

        let dims = AppError::from(DomainError::InvalidDimensions("0x0".into())).normalize();
        assert!(matches!(dims, AppError::ProcessingError { .. }));
    }
}
