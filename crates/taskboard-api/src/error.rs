//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use taskboard_domain::DomainError;

use crate::models::{ApiResponse, EmptyPayload};

/// Task operation an error occurred in, used to pick the failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing tasks
    List,
    /// Fetching a single task
    Get,
    /// Creating a task
    Create,
    /// Updating a task
    Update,
    /// Deleting a task
    Delete,
    /// Flipping a task's completion flag
    Toggle,
}

impl Operation {
    /// Envelope message reported when the store fails during this operation
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "Error fetching tasks",
            Operation::Get => "Error fetching task",
            Operation::Create => "Error creating task",
            Operation::Update => "Error updating task",
            Operation::Delete => "Error deleting task",
            Operation::Toggle => "Error toggling task status",
        }
    }
}

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation or could not be parsed
    #[error("Validation error: {0}")]
    Validation(String),

    /// No task has the requested id
    #[error("Task not found")]
    NotFound,

    /// The task store failed
    #[error("{}: {reason}", .operation.failure_message())]
    Store {
        /// Operation that was running
        operation: Operation,
        /// Underlying store failure
        reason: String,
    },
}

impl ApiError {
    /// Classify a domain error raised while running `operation`
    pub fn from_domain(err: DomainError, operation: Operation) -> Self {
        match err {
            DomainError::ValidationError { field, reason } => {
                ApiError::Validation(format!("{}: {}", field, reason))
            }
            DomainError::EntityNotFound { .. } => ApiError::NotFound,
            DomainError::StoreFailure { reason } => ApiError::Store { operation, reason },
        }
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body: ApiResponse<EmptyPayload> = match self {
            ApiError::Validation(detail) => ApiResponse::failure("Validation error", Some(detail)),
            ApiError::NotFound => ApiResponse::failure("Task not found", None),
            ApiError::Store { operation, reason } => {
                tracing::error!("{}: {}", operation.failure_message(), reason);
                ApiResponse::failure(operation.failure_message(), Some(reason))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
