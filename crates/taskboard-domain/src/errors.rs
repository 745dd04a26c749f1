//! Domain errors for Taskboard

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Entity not found: {entity_type} with id {id}")]
    EntityNotFound { entity_type: String, id: String },

    #[error("Store failure: {reason}")]
    StoreFailure { reason: String },
}

impl DomainError {
    /// Create a validation error for a field
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a not found error for a task id
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity_type: "Task".to_string(),
            id: id.into(),
        }
    }

    /// Create a store failure error
    pub fn store(reason: impl Into<String>) -> Self {
        Self::StoreFailure {
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntityNotFound { .. })
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
