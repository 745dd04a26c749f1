//! Task CRUD handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use taskboard_domain::{TaskFilter, TaskInput};

use crate::{
    error::{ApiError, ApiResult, Operation},
    models::{ApiResponse, EmptyPayload, ListTasksQuery, TaskResponse},
    state::AppState,
};

type Envelope<T> = Json<ApiResponse<T>>;

// Malformed bodies are reported through the envelope, not axum's plain text.
fn body(payload: Result<Json<TaskInput>, JsonRejection>) -> ApiResult<TaskInput> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

/// List tasks, newest first
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Tasks matching the filter", body = crate::models::TaskListEnvelope),
        (status = 500, description = "Error fetching tasks", body = crate::models::EmptyEnvelope)
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    query: Option<Query<ListTasksQuery>>,
) -> ApiResult<Envelope<Vec<TaskResponse>>> {
    let filter = TaskFilter::parse(query.as_ref().and_then(|q| q.filter.as_deref()));
    let tasks = state
        .tasks
        .list(filter)
        .await
        .map_err(|e| ApiError::from_domain(e, Operation::List))?;

    Ok(Json(ApiResponse::list(
        tasks.into_iter().map(TaskResponse::from).collect(),
    )))
}

/// Get task by ID
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task details", body = crate::models::TaskEnvelope),
        (status = 404, description = "Task not found", body = crate::models::EmptyEnvelope),
        (status = 500, description = "Error fetching task", body = crate::models::EmptyEnvelope)
    )
)]
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<TaskResponse>> {
    let task = state
        .tasks
        .get(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, Operation::Get))?;

    Ok(Json(ApiResponse::ok(task.into())))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = crate::models::TaskRequest,
    responses(
        (status = 201, description = "Task created successfully", body = crate::models::TaskEnvelope),
        (status = 400, description = "Validation error", body = crate::models::EmptyEnvelope),
        (status = 500, description = "Error creating task", body = crate::models::EmptyEnvelope)
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Envelope<TaskResponse>)> {
    let input = body(payload)?;
    let task = state
        .tasks
        .create(input)
        .await
        .map_err(|e| ApiError::from_domain(e, Operation::Create))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(task.into()).with_message("Task created successfully")),
    ))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task ID")),
    request_body = crate::models::TaskRequest,
    responses(
        (status = 200, description = "Task updated successfully", body = crate::models::TaskEnvelope),
        (status = 400, description = "Validation error", body = crate::models::EmptyEnvelope),
        (status = 404, description = "Task not found", body = crate::models::EmptyEnvelope),
        (status = 500, description = "Error updating task", body = crate::models::EmptyEnvelope)
    )
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskInput>, JsonRejection>,
) -> ApiResult<Envelope<TaskResponse>> {
    let input = match body(payload) {
        Ok(input) => input,
        Err(rejected) => {
            // an unknown id outranks an unreadable body
            state
                .tasks
                .get(&id)
                .await
                .map_err(|e| ApiError::from_domain(e, Operation::Update))?;
            return Err(rejected);
        }
    };
    let task = state
        .tasks
        .update(&id, input)
        .await
        .map_err(|e| ApiError::from_domain(e, Operation::Update))?;

    Ok(Json(
        ApiResponse::ok(task.into()).with_message("Task updated successfully"),
    ))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted successfully", body = crate::models::EmptyEnvelope),
        (status = 404, description = "Task not found", body = crate::models::EmptyEnvelope),
        (status = 500, description = "Error deleting task", body = crate::models::EmptyEnvelope)
    )
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<EmptyPayload>> {
    state
        .tasks
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, Operation::Delete))?;

    Ok(Json(
        ApiResponse::ok(EmptyPayload::default()).with_message("Task deleted successfully"),
    ))
}

/// Toggle a task's completion flag
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/toggle",
    params(("id" = String, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task status updated", body = crate::models::TaskEnvelope),
        (status = 404, description = "Task not found", body = crate::models::EmptyEnvelope),
        (status = 500, description = "Error toggling task status", body = crate::models::EmptyEnvelope)
    )
)]
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<TaskResponse>> {
    let task = state
        .tasks
        .toggle(&id)
        .await
        .map_err(|e| ApiError::from_domain(e, Operation::Toggle))?;

    Ok(Json(
        ApiResponse::ok(task.into()).with_message("Task status updated"),
    ))
}
