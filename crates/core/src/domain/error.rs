// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: '{field}' {reason}")]
    ValidationError { field: &'static str, reason: String },

    #[error("Invalid location: '{field}' {reason}")]
    InvalidLocation { field: &'static str, reason: String },
}

impl DomainError {
    /// Required field that is absent or blank after trimming
    pub fn blank(field: &'static str) -> Self {
        DomainError::ValidationError {
            field,
            reason: "must not be blank".to_string(),
        }
    }

    /// Name of the offending request field
    pub fn field(&self) -> &'static str {
        match self {
            DomainError::ValidationError { field, .. } => field,
            DomainError::InvalidLocation { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
