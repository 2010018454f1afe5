// Central Error Type for the Application

use crate::domain::DomainError;
use crate::port::ExecutionError;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Execution error: {0}")]
    Execution(ExecutionError),
}

impl AppError {
    /// Request field a validation failure refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(e) => Some(e.field()),
            AppError::Execution(ExecutionError::InvalidLocation(e)) => Some(e.field()),
            _ => None,
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::Validation(err)
    }
}

// Executor failures that describe the caller's mistake keep their own category
impl From<ExecutionError> for AppError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::UnknownProcessor(name) => {
                AppError::NotFound(format!("Unknown processor: {}", name))
            }
            ExecutionError::DuplicateKey(key) => {
                AppError::Conflict(format!("Job key already submitted: {}", key))
            }
            other => AppError::Execution(other),
        }
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
