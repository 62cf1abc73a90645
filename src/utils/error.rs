use std::fmt;

use crate::validation::FieldError;

#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    NotFound(String),
    ValidationFailed(Vec<FieldError>),
    PersistenceFailure(String),
    Unexpected(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationFailed(errors) => {
                write!(f, "Validation failed: {} field(s) rejected", errors.len())
            }
            AppError::PersistenceFailure(msg) => write!(f, "Persistence failure: {}", msg),
            AppError::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}
