//! Question handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::api::common::ValidatedJson;
use crate::api::dto::question::{
    CreateQuestionRequest, ListQuestionsQuery, QuestionResponse, UpdateQuestionRequest,
};
use crate::api::dto::{ApiError, ErrorResponse, ErrorsResponse, MessageResponse};
use crate::shared::Paginated;

/// List questions
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    tag = "Questions",
    params(ListQuestionsQuery),
    responses(
        (status = 200, description = "Page of questions", body = Paginated<QuestionResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorsResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ListQuestionsQuery>,
) -> Result<Json<Paginated<QuestionResponse>>, ApiError> {
    let (req, filter) = query.parse()?;
    let page = state
        .questions
        .list(&req, &filter)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching questions", e))?;
    Ok(Json(page.map(QuestionResponse::from)))
}

/// Get a question by ID
#[utoipa::path(
    get,
    path = "/api/v1/questions/{id}",
    tag = "Questions",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "The question", body = QuestionResponse),
        (status = 404, description = "Question not found", body = MessageResponse)
    )
)]
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state
        .questions
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_domain("Error fetching question", e))?
        .ok_or_else(|| ApiError::NotFound("Question not found".to_string()))?;
    Ok(Json(QuestionResponse::from(question)))
}

/// Create a question
///
/// Fails with 404 when the owning module does not exist.
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    tag = "Questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = QuestionResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 404, description = "Module not found", body = MessageResponse)
    )
)]
pub async fn create_question(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), ApiError> {
    let question = state
        .questions
        .create(body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error creating question", e))?;
    Ok((StatusCode::CREATED, Json(QuestionResponse::from(question))))
}

/// Update a question
#[utoipa::path(
    put,
    path = "/api/v1/questions/{id}",
    tag = "Questions",
    params(("id" = i32, Path, description = "Question ID")),
    request_body = UpdateQuestionRequest,
    responses(
        (status = 200, description = "Updated question", body = QuestionResponse),
        (status = 400, description = "Validation failure", body = ErrorsResponse),
        (status = 404, description = "Question or target module not found", body = MessageResponse)
    )
)]
pub async fn update_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(body): ValidatedJson<UpdateQuestionRequest>,
) -> Result<Json<QuestionResponse>, ApiError> {
    let question = state
        .questions
        .update(id, body.into())
        .await
        .map_err(|e| ApiError::from_domain("Error updating question", e))?;
    Ok(Json(QuestionResponse::from(question)))
}

/// Delete a question (soft)
#[utoipa::path(
    delete,
    path = "/api/v1/questions/{id}",
    tag = "Questions",
    params(("id" = i32, Path, description = "Question ID")),
    responses(
        (status = 200, description = "Question deleted", body = MessageResponse),
        (status = 404, description = "Question not found", body = MessageResponse)
    )
)]
pub async fn delete_question(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .questions
        .soft_delete(id)
        .await
        .map_err(|e| ApiError::from_domain("Error deleting question", e))?;
    Ok(Json(MessageResponse::new("Question deleted successfully")))
}
