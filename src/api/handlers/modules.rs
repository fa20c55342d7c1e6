//! Module handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::api::common::ValidatedJson;
use crate::api::dto::module::{
    CreateModuleRequest, ListModulesQuery, ModuleResponse, UpdateModuleRequest,
};
use crate::api::dto::question::QuestionResponse;
use crate::api::dto::{ApiError, ErrorResponse, ErrorsResponse, MessageResponse};
use crate::shared::Paginated;

/// List modules
#[utoipa::path(
    get,
    path = "/api/v1/modules",
    tag = "Modules",
    params(ListModulesQuery),
    responses(
        (status = 200, description = "Page of modules", body = Paginated<ModuleResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_modules(
    State(state): State<AppState>,
    Query(query): Query<ListModulesQuery>,
) -> Result<Json<Paginated<ModuleResponse>>, ApiError> {
    let (req, filter) = query.parse()?;
    let page = state
        .modules
        .list(&req, &filter)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching modules", e))?;
    Ok(Json(page.map(ModuleResponse::from)))
}

/// Get a module by ID
#[utoipa::path(
    get,
    path = "/api/v1/modules/{id}",
    tag = "Modules",
    params(("id" = i32, Path, description = "Module ID")),
    responses(
        (status = 200, description = "The module", body = ModuleResponse),
        (status = 404, description = "Module not found", body = MessageResponse)
    )
)]
pub async fn get_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ModuleResponse>, ApiError> {
    let module = state
        .modules
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching module", e))?
        .ok_or_else(|| ApiError::NotFound("Module not found".to_string()))?;
    Ok(Json(ModuleResponse::from(module)))
}

/// List a module's questions
#[utoipa::path(
    get,
    path = "/api/v1/modules/{id}/questions",
    tag = "Modules",
    params(("id" = i32, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Questions of the module", body = [QuestionResponse]),
        (status = 404, description = "Module not found", body = MessageResponse)
    )
)]
pub async fn list_module_questions(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<QuestionResponse>>, ApiError> {
    state
        .modules
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching module", e))?
        .ok_or_else(|| ApiError::NotFound("Module not found".to_string()))?;

    let questions = state
        .modules
        .questions(id)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching module questions", e))?;
    Ok(Json(questions.into_iter().map(QuestionResponse::from).collect()))
}

/// Create a module
///
/// Fails with 404 when the owning guide does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/modules",
    tag = "Modules",
    request_body = CreateModuleRequest,
    responses(
        (status = 201, description = "Module created", body = ModuleResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 404, description = "Guide not found", body = MessageResponse)
    )
)]
pub async fn create_module(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateModuleRequest>,
) -> Result<(StatusCode, Json<ModuleResponse>), ApiError> {
    let module = state
        .modules
        .create(body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error creating module", e))?;
    Ok((StatusCode::CREATED, Json(ModuleResponse::from(module))))
}

/// Update a module
#[utoipa::path(
    put,
    path = "/api/v1/modules/{id}",
    tag = "Modules",
    params(("id" = i32, Path, description = "Module ID")),
    request_body = UpdateModuleRequest,
    responses(
        (status = 200, description = "Updated module", body = ModuleResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 404, description = "Module or target guide not found", body = MessageResponse)
    )
)]
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateModuleRequest>,
) -> Result<Json<ModuleResponse>, ApiError> {
    let module = state
        .modules
        .update(id, body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error updating module", e))?;
    Ok(Json(ModuleResponse::from(module)))
}

/// Delete a module (soft)
#[utoipa::path(
    delete,
    path = "/api/v1/modules/{id}",
    tag = "Modules",
    params(("id" = i32, Path, description = "Module ID")),
    responses(
        (status = 200, description = "Module deleted", body = MessageResponse),
        (status = 404, description = "Module not found", body = MessageResponse)
    )
)]
pub async fn delete_module(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .modules
        .soft_delete(id)
        .await
        .map_err(|e| ApiError::from_domain("Error deleting module", e))?;
    Ok(Json(MessageResponse::new("Module deleted successfully")))
}
