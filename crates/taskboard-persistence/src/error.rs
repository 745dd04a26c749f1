//! Persistence Layer Error Types

use thiserror::Error;

use taskboard_domain::DomainError;

/// Errors that can occur during persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Stored record could not be turned back into a task
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),
}

/// Convert persistence errors to domain errors
impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        DomainError::store(err.to_string())
    }
}
