//! API request/response models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use taskboard_domain::Task;

/// Uniform response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    TaskEnvelope = ApiResponse<TaskResponse>,
    TaskListEnvelope = ApiResponse<Vec<TaskResponse>>,
    EmptyEnvelope = ApiResponse<EmptyPayload>
)]
pub struct ApiResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Payload on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Number of items in `data` for list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Human readable outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Failure detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
            error: None,
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Failed response
    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message: Some(message.into()),
            error,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Successful list response; `count` mirrors the number of items
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            count: Some(count),
            ..Self::ok(items)
        }
    }
}

/// Empty object payload, returned by delete
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EmptyPayload {}

/// Task representation on the wire
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Server-assigned id
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag
    pub completed: bool,
    /// `low`, `medium` or `high`
    #[schema(example = "medium")]
    pub priority: String,
    /// Optional calendar due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title,
            description: task.description,
            completed: task.completed,
            priority: task.priority.as_str().to_string(),
            due_date: task.due_date,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Task create/update request body
///
/// Members outside this list are ignored. On update `description` and
/// `dueDate` may be `null` or `""` to clear them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    /// Required on create, 1-200 characters after trimming
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    /// Up to 1000 characters after trimming
    pub description: Option<String>,
    /// `low`, `medium` or `high`
    #[schema(example = "high")]
    pub priority: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[schema(example = "2030-01-02")]
    pub due_date: Option<String>,
    /// Update only
    pub completed: Option<bool>,
}

/// Query parameters for task listing
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTasksQuery {
    /// `active` or `completed`; anything else lists every task
    pub filter: Option<String>,
}

/// Root liveness message
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    /// Always "Task Management API is running"
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Server version
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
    /// Active storage backend
    pub storage: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_domain::TaskDraft;

    #[test]
    fn test_list_envelope_counts_items() {
        let json = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(json, serde_json::json!({"success": true, "data": [1, 2, 3], "count": 3}));
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let json = serde_json::to_value(ApiResponse::<EmptyPayload>::failure(
            "Task not found",
            None,
        ))
        .unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "message": "Task not found"}));
    }

    #[test]
    fn test_task_response_shape() {
        let task = Task::create(TaskDraft::new("Buy milk").unwrap());
        let json = serde_json::to_value(TaskResponse::from(task.clone())).unwrap();

        assert_eq!(json["id"], task.id.to_string());
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["completed"], false);
        assert!(json.get("description").is_none());
        assert!(json.get("dueDate").is_none());
        assert!(json["createdAt"].is_string());

        // the domain type reads the wire shape back
        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }
}
