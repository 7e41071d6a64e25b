use actix_web::{HttpResponse, web};

use super::TaskState;
use super::response::ErrorBody;
use crate::dtos::{NewTaskDto, TaskFilterDto, UpdateTaskDto};
use crate::error::ApiResult;
use crate::models::Task;

#[utoipa::path(
    get,
    path = "/tasks",
    summary = "List tasks",
    description = "All tasks in creation order, or only those owned by `user_id`. An empty `user_id` is ignored.",
    params(TaskFilterDto),
    responses(
        (status = 200, description = "Tasks", body = Vec<Task>),
        (status = 400, description = "user_id is not an integer", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "tasks"
)]
pub async fn list_tasks(
    state: web::Data<TaskState>,
    filter: web::Query<TaskFilterDto>,
) -> ApiResult<HttpResponse> {
    let tasks = state.lifecycle.list(filter.user_id.as_deref()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[utoipa::path(
    get,
    path = "/tasks/{id}",
    summary = "Get a task",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "Task not found", body = ErrorBody),
    ),
    tag = "tasks"
)]
pub async fn get_task(
    state: web::Data<TaskState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let task = state.lifecycle.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(task))
}

#[utoipa::path(
    post,
    path = "/tasks",
    summary = "Create a task",
    description = "Checks `userId` against the user service, then stores the task as `pending`. \
        The user reference is not re-checked afterwards.",
    request_body = NewTaskDto,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Missing title or userId", body = ErrorBody),
        (status = 404, description = "User does not exist or the user service could not confirm it", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "tasks"
)]
pub async fn add_task(
    state: web::Data<TaskState>,
    form: web::Json<NewTaskDto>,
) -> ApiResult<HttpResponse> {
    let task = state.lifecycle.create(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(task))
}

#[utoipa::path(
    put,
    path = "/tasks/{id}",
    summary = "Update task status",
    description = "Sets the status to any of `pending`, `in_progress`, `completed`. Setting the current status again is allowed.",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 400, description = "Invalid status or id", body = ErrorBody),
        (status = 404, description = "Task not found", body = ErrorBody),
    ),
    tag = "tasks"
)]
pub async fn update_task(
    state: web::Data<TaskState>,
    path: web::Path<String>,
    form: web::Json<UpdateTaskDto>,
) -> ApiResult<HttpResponse> {
    let task = state
        .lifecycle
        .update_status(&path.into_inner(), form.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(task))
}
