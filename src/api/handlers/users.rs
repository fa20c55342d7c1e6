//! User handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::api::common::ValidatedJson;
use crate::api::dto::user::{CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserResponse};
use crate::api::dto::{ApiError, ErrorResponse, ErrorsResponse, MessageResponse};
use crate::shared::Paginated;

/// List users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = Paginated<UserResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<Paginated<UserResponse>>, ApiError> {
    let (req, filter) = query.parse()?;
    let page = state
        .users
        .list(&req, &filter)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching users", e))?;
    Ok(Json(page.map(UserResponse::from)))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching user", e))?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(UserResponse::from(user)))
}

/// Create a user
///
/// Emails are unique among live users.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 409, description = "Email already taken", body = MessageResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .users
        .create(body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error creating user", e))?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 404, description = "User not found", body = MessageResponse),
        (status = 409, description = "Email already taken", body = MessageResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .update(id, body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error updating user", e))?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user (soft)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .users
        .soft_delete(id)
        .await
        .map_err(|e| ApiError::from_domain("Error deleting user", e))?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
