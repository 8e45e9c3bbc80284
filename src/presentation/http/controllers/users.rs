// src/presentation/http/controllers/users.rs
use crate::application::{
    commands::users::{CreateUserCommand, DeleteUserCommand, UpdateUserCommand},
    dto::UserDto,
};
use crate::domain::user::Role;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "captura1")]
    pub username: String,
    pub password: String,
    #[schema(value_type = String, example = "CAPTURA")]
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: String,
    #[schema(value_type = String, example = "LECTURA")]
    pub role: Role,
    pub is_active: bool,
    /// Leave out or send blank to keep the current password.
    #[serde(default)]
    pub password: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "All users, newest first.", body = [UserDto]),
        (status = 401, description = "Unauthorized.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .user_queries
        .list_users(&user)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created.", body = UserDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 403, description = "Forbidden.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Username already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Json(payload): Json<CreateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = CreateUserCommand {
        username: payload.username,
        password: payload.password,
        role: payload.role,
        is_active: payload.is_active,
    };

    state
        .services
        .user_commands
        .create_user(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated.", body = UserDto),
        (status = 403, description = "Forbidden or self deactivation.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Username already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = UpdateUserCommand {
        user_id: id,
        username: payload.username,
        role: payload.role,
        is_active: payload.is_active,
        password: payload.password,
    };

    state
        .services
        .user_commands
        .update_user(&user, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted."),
        (status = 403, description = "Forbidden or self deletion.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<serde_json::Value>> {
    state
        .services
        .user_commands
        .delete_user(&user, DeleteUserCommand { user_id: id })
        .await
        .into_http()?;

    Ok(Json(json!({ "status": "deleted" })))
}
