use actix_web::{HttpResponse, web};

use super::UserState;
use super::response::ErrorBody;
use crate::dtos::NewUserDto;
use crate::error::{ApiResult, ServiceError};
use crate::models::User;
use crate::validation;

#[utoipa::path(
    get,
    path = "/users",
    summary = "List users",
    responses(
        (status = 200, description = "Users", body = Vec<User>),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "users"
)]
pub async fn list_users(state: web::Data<UserState>) -> ApiResult<HttpResponse> {
    let users = state.users.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    summary = "Get a user",
    description = "This is the endpoint the task service calls to check that a user exists. Only a 200 counts.",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Id is not an integer", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
    ),
    tag = "users"
)]
pub async fn get_user(
    state: web::Data<UserState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = validation::parse_id(&path.into_inner())?;
    let user = state
        .users
        .find_user(id)
        .await?
        .ok_or(ServiceError::UserNotFound(id))?;
    Ok(HttpResponse::Ok().json(user))
}

#[utoipa::path(
    post,
    path = "/users",
    summary = "Create a user",
    request_body = NewUserDto,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Missing name or email", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody),
    ),
    tag = "users"
)]
pub async fn add_user(
    state: web::Data<UserState>,
    form: web::Json<NewUserDto>,
) -> ApiResult<HttpResponse> {
    let new_user = validation::validate_new_user(form.into_inner())?;
    let user = state.users.insert_user(new_user).await?;
    log::info!("Created user {}", user.id);
    Ok(HttpResponse::Created().json(user))
}
