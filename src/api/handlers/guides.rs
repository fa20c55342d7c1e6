//! Guide handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::api::common::ValidatedJson;
use crate::api::dto::guide::{
    CreateGuideRequest, GuideResponse, ListGuidesQuery, UpdateGuideRequest,
};
use crate::api::dto::{ApiError, ErrorResponse, ErrorsResponse, MessageResponse};
use crate::shared::Paginated;

/// List guides
///
/// Paginated, filterable and sortable. A non-blank `search` overrides the
/// per-field filters.
#[utoipa::path(
    get,
    path = "/api/v1/guides",
    tag = "Guides",
    params(ListGuidesQuery),
    responses(
        (status = 200, description = "Page of guides", body = Paginated<GuideResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_guides(
    State(state): State<AppState>,
    Query(query): Query<ListGuidesQuery>,
) -> Result<Json<Paginated<GuideResponse>>, ApiError> {
    let (req, filter) = query.parse()?;
    let page = state
        .guides
        .list(&req, &filter)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching guides", e))?;
    Ok(Json(page.map(GuideResponse::from)))
}

/// Get a guide by ID
#[utoipa::path(
    get,
    path = "/api/v1/guides/{id}",
    tag = "Guides",
    params(("id" = i32, Path, description = "Guide ID")),
    responses(
        (status = 200, description = "The guide", body = GuideResponse),
        (status = 404, description = "Guide not found", body = MessageResponse)
    )
)]
pub async fn get_guide(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GuideResponse>, ApiError> {
    let guide = state
        .guides
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching guide", e))?
        .ok_or_else(|| ApiError::NotFound("Guide not found".to_string()))?;
    Ok(Json(GuideResponse::from(guide)))
}

/// Create a guide
#[utoipa::path(
    post,
    path = "/api/v1/guides",
    tag = "Guides",
    request_body = CreateGuideRequest,
    responses(
        (status = 201, description = "Guide created", body = GuideResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse)
    )
)]
pub async fn create_guide(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateGuideRequest>,
) -> Result<(StatusCode, Json<GuideResponse>), ApiError> {
    let guide = state
        .guides
        .create(body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error creating guide", e))?;
    Ok((StatusCode::CREATED, Json(GuideResponse::from(guide))))
}

/// Update a guide
///
/// Partial update: only supplied fields change.
#[utoipa::path(
    put,
    path = "/api/v1/guides/{id}",
    tag = "Guides",
    params(("id" = i32, Path, description = "Guide ID")),
    request_body = UpdateGuideRequest,
    responses(
        (status = 200, description = "Updated guide", body = GuideResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 404, description = "Guide not found", body = MessageResponse)
    )
)]
pub async fn update_guide(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateGuideRequest>,
) -> Result<Json<GuideResponse>, ApiError> {
    let guide = state
        .guides
        .update(id, body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error updating guide", e))?;
    Ok(Json(GuideResponse::from(guide)))
}

/// Delete a guide
///
/// Soft deletion: the guide disappears from reads but the row is kept.
#[utoipa::path(
    delete,
    path = "/api/v1/guides/{id}",
    tag = "Guides",
    params(("id" = i32, Path, description = "Guide ID")),
    responses(
        (status = 200, description = "Guide deleted", body = MessageResponse),
        (status = 404, description = "Guide not found", body = MessageResponse)
    )
)]
pub async fn delete_guide(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .guides
        .soft_delete(id)
        .await
        .map_err(|e| ApiError::from_domain("Error deleting guide", e))?;
    Ok(Json(MessageResponse::new("Guide deleted successfully")))
}
