//! City handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::api::common::ValidatedJson;
use crate::api::dto::city::{CityResponse, CreateCityRequest, ListCitiesQuery, UpdateCityRequest};
use crate::api::dto::{ApiError, ErrorResponse, ErrorsResponse, MessageResponse};
use crate::shared::Paginated;

/// List cities
#[utoipa::path(
    get,
    path = "/api/v1/cities",
    tag = "Cities",
    params(ListCitiesQuery),
    responses(
        (status = 200, description = "Page of cities", body = Paginated<CityResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<ListCitiesQuery>,
) -> Result<Json<Paginated<CityResponse>>, ApiError> {
    let (req, filter) = query.parse()?;
    let page = state
        .cities
        .list(&req, &filter)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching cities", e))?;
    Ok(Json(page.map(CityResponse::from)))
}

/// Get a city by ID
#[utoipa::path(
    get,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    params(("id" = i32, Path, description = "City ID")),
    responses(
        (status = 200, description = "The city", body = CityResponse),
        (status = 404, description = "City not found", body = MessageResponse)
    )
)]
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CityResponse>, ApiError> {
    let city = state
        .cities
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching city", e))?
        .ok_or_else(|| ApiError::NotFound("City not found".to_string()))?;
    Ok(Json(CityResponse::from(city)))
}

/// Create a city
///
/// City names are unique among live cities.
#[utoipa::path(
    post,
    path = "/api/v1/cities",
    tag = "Cities",
    request_body = CreateCityRequest,
    responses(
        (status = 201, description = "City created", body = CityResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 409, description = "Name already taken", body = MessageResponse)
    )
)]
pub async fn create_city(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateCityRequest>,
) -> Result<(StatusCode, Json<CityResponse>), ApiError> {
    let city = state
        .cities
        .create(body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error creating city", e))?;
    Ok((StatusCode::CREATED, Json(CityResponse::from(city))))
}

/// Update a city
#[utoipa::path(
    put,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    params(("id" = i32, Path, description = "City ID")),
    request_body = UpdateCityRequest,
    responses(
        (status = 200, description = "Updated city", body = CityResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 404, description = "City not found", body = MessageResponse),
        (status = 409, description = "Name already taken", body = MessageResponse)
    )
)]
pub async fn update_city(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateCityRequest>,
) -> Result<Json<CityResponse>, ApiError> {
    let city = state
        .cities
        .update(id, body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error updating city", e))?;
    Ok(Json(CityResponse::from(city)))
}

/// Delete a city (soft)
#[utoipa::path(
    delete,
    path = "/api/v1/cities/{id}",
    tag = "Cities",
    params(("id" = i32, Path, description = "City ID")),
    responses(
        (status = 200, description = "City deleted", body = MessageResponse),
        (status = 404, description = "City not found", body = MessageResponse)
    )
)]
pub async fn delete_city(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .cities
        .soft_delete(id)
        .await
        .map_err(|e| ApiError::from_domain("Error deleting city", e))?;
    Ok(Json(MessageResponse::new("City deleted successfully")))
}
