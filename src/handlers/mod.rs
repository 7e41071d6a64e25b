//! HTTP handlers for the task and user services.
//!
//! Route configuration lives here so the binaries and the integration tests
//! mount exactly the same surface.

mod health;
pub mod response;
mod task;
mod user;

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use utoipa::OpenApi;

use crate::{
    dtos, error::ApiError, lifecycle::TaskLifecycle, models, store::UserStore,
};

pub use health::health_check;
pub use task::{add_task, get_task, list_tasks, update_task};
pub use user::{add_user, get_user, list_users};

/// Shared state of the task service
#[derive(Clone)]
pub struct TaskState {
    pub lifecycle: TaskLifecycle,
}

/// Shared state of the user service
#[derive(Clone)]
pub struct UserState {
    pub users: Arc<dyn UserStore>,
}

/// Health check response.
#[derive(serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// Always "ok" once the service is listening
    pub status: String,
}

/// Malformed or mistyped JSON bodies become a 400 with the usual error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected request body: {}", err);
        ApiError::BadRequest("invalid request body".to_string()).into()
    })
}

/// Undecodable query strings, e.g. a repeated `user_id`, get the same 400 as
/// a non-integer filter.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected query string: {}", err);
        ApiError::BadRequest("invalid user_id".to_string()).into()
    })
}

// =============================================================================
// OpenAPI Documentation
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        task::list_tasks,
        task::add_task,
        task::get_task,
        task::update_task,
    ),
    components(schemas(
        HealthResponse,
        response::ErrorBody,
        dtos::NewTaskDto,
        dtos::UpdateTaskDto,
        models::Task,
        models::TaskStatus,
    )),
    tags(
        (name = "health", description = "Liveness probe."),
        (name = "tasks", description = "Task CRUD. Creating a task first checks that the owning user exists in the user service."),
    ),
    info(title = "Task Service API", version = "0.1.0")
)]
pub struct TaskApiDoc;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        user::list_users,
        user::add_user,
        user::get_user,
    ),
    components(schemas(
        HealthResponse,
        response::ErrorBody,
        dtos::NewUserDto,
        models::User,
    )),
    tags(
        (name = "health", description = "Liveness probe."),
        (name = "users", description = "User CRUD."),
    ),
    info(title = "User Service API", version = "0.1.0")
)]
pub struct UserApiDoc;

async fn task_openapi() -> HttpResponse {
    HttpResponse::Ok().json(TaskApiDoc::openapi())
}

async fn user_openapi() -> HttpResponse {
    HttpResponse::Ok().json(UserApiDoc::openapi())
}

// =============================================================================
// Route Configuration
// =============================================================================

/// Routes of the task service. Expects `web::Data<TaskState>`.
pub fn configure_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(health_check))
        .route("/tasks", web::get().to(list_tasks))
        .route("/tasks", web::post().to(add_task))
        // before /tasks/{id}
        .route("/tasks/health", web::get().to(health_check))
        .route("/tasks/{id}", web::get().to(get_task))
        .route("/tasks/{id}", web::put().to(update_task))
        .route("/api-docs/openapi.json", web::get().to(task_openapi));
}

/// Routes of the user service. Expects `web::Data<UserState>`.
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .route("/users", web::get().to(list_users))
        .route("/users", web::post().to(add_user))
        .route("/users/health", web::get().to(health_check))
        .route("/users/{id}", web::get().to(get_user))
        .route("/api-docs/openapi.json", web::get().to(user_openapi));
}
