//! API route definitions

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

use crate::{
    handlers::{health, tasks},
    middleware::logging_middleware,
    state::AppState,
};

/// Task CRUD routes, relative to the API prefix
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/:id/toggle", patch(tasks::toggle_task))
}

/// API routes with the task routes nested under `prefix`
pub fn api_routes(prefix: &str) -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest(prefix, task_routes())
}

/// OpenAPI document, plus Swagger UI when the `swagger-ui` feature is on
#[cfg(feature = "swagger-ui")]
pub fn docs_routes() -> Router<AppState> {
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// OpenAPI document, plus Swagger UI when the `swagger-ui` feature is on
#[cfg(not(feature = "swagger-ui"))]
pub fn docs_routes() -> Router<AppState> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Combined routes with logging and CORS applied
pub fn all_routes(prefix: &str) -> Router<AppState> {
    api_routes(prefix)
        .merge(docs_routes())
        .layer(middleware::from_fn(logging_middleware))
        .layer(CorsLayer::permissive())
}

/// Ready-to-serve application
pub fn app(state: AppState, prefix: &str) -> Router {
    all_routes(prefix).with_state(state)
}

/// OpenAPI description of the task API
#[derive(OpenApi)]
#[openapi(
    paths(
        health::root,
        health::health_check,
        tasks::list_tasks,
        tasks::get_task,
        tasks::create_task,
        tasks::update_task,
        tasks::delete_task,
        tasks::toggle_task,
    ),
    components(schemas(
        crate::models::TaskResponse,
        crate::models::TaskRequest,
        crate::models::TaskEnvelope,
        crate::models::TaskListEnvelope,
        crate::models::EmptyEnvelope,
        crate::models::EmptyPayload,
        crate::models::RootResponse,
        crate::models::HealthResponse,
    )),
    info(
        title = "Taskboard API",
        version = "1.0.0",
        description = "RESTful API for creating, filtering, completing and deleting tasks"
    )
)]
pub struct ApiDoc;
