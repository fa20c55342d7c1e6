//! Question DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{ApiError, QueryParser};
use crate::infrastructure::database::entities::question::{
    self, BlockType, DynamicType, QuestionType,
};
use crate::infrastructure::database::repositories::question_repository::{
    NewQuestion, UpdateQuestion, SORTABLE_FIELDS,
};
use crate::infrastructure::database::repositories::QuestionFilter;
use crate::shared::PageRequest;

/// Query parameters of the question list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuestionsQuery {
    /// Page number (1-based). Default 1
    pub page: Option<String>,
    /// Items per page. Default 10
    pub limit: Option<String>,
    /// Sort field: `id`, `createdAt`, `updatedAt`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`. Default `DESC`
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    /// Free-text search over statement, description and feedback;
    /// overrides per-field filters
    pub search: Option<String>,
    /// Filter by block type: `text`, `image`, `video`
    #[serde(rename = "blockType")]
    pub block_type: Option<String>,
    /// Filter by dynamic type: `static`, `dynamic`
    #[serde(rename = "dynamicType")]
    pub dynamic_type: Option<String>,
    /// Filter by question type: `multiple_choice`, `true_false`, `short_answer`
    #[serde(rename = "questionType")]
    pub question_type: Option<String>,
    /// Filter by owning module ID
    #[serde(rename = "moduleId")]
    pub module_id: Option<String>,
}

impl ListQuestionsQuery {
    pub fn parse(self) -> Result<(PageRequest, QuestionFilter), ApiError> {
        let mut p = QueryParser::new();

        let page = p.page(&self.page);
        let limit = p.limit(&self.limit);
        let sort_by = p.sort_by(&self.sort_by, SORTABLE_FIELDS);
        let sort_direction = p.sort_direction(&self.sort_direction);

        let filter = QuestionFilter {
            block_type: p.enum_value("blockType", &self.block_type, "text, image, video"),
            dynamic_type: p.enum_value("dynamicType", &self.dynamic_type, "static, dynamic"),
            question_type: p.enum_value(
                "questionType",
                &self.question_type,
                "multiple_choice, true_false, short_answer",
            ),
            module_id: p.int("moduleId", &self.module_id),
        };

        let req = p.finish(page, limit, sort_by, sort_direction, self.search)?;
        Ok((req, filter))
    }
}

/// Question as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: i32,
    pub block_type: BlockType,
    pub statement: String,
    pub description: Option<String>,
    pub resource_url: Option<String>,
    pub dynamic_type: DynamicType,
    pub question_type: QuestionType,
    pub feedback: String,
    pub module_id: i32,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<question::Model> for QuestionResponse {
    fn from(q: question::Model) -> Self {
        Self {
            id: q.id,
            block_type: q.block_type,
            statement: q.statement,
            description: q.description,
            resource_url: q.resource_url,
            dynamic_type: q.dynamic_type,
            question_type: q.question_type,
            feedback: q.feedback,
            module_id: q.module_id,
            created_at: q.created_at.to_rfc3339(),
            updated_at: q.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a question. The owning module must exist.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "blockType": "text",
    "statement": "Which bin takes glass bottles?",
    "dynamicType": "static",
    "questionType": "multiple_choice",
    "feedback": "Glass goes in the green bin",
    "moduleId": 1
}))]
pub struct CreateQuestionRequest {
    pub block_type: BlockType,
    #[validate(length(min = 1, message = "statement must not be empty"))]
    pub statement: String,
    pub description: Option<String>,
    #[validate(url(message = "resourceUrl must be a valid URL"))]
    pub resource_url: Option<String>,
    pub dynamic_type: DynamicType,
    pub question_type: QuestionType,
    #[validate(length(min = 1, message = "feedback must not be empty"))]
    pub feedback: String,
    pub module_id: i32,
}

impl From<CreateQuestionRequest> for NewQuestion {
    fn from(r: CreateQuestionRequest) -> Self {
        Self {
            block_type: r.block_type,
            statement: r.statement,
            description: r.description,
            resource_url: r.resource_url,
            dynamic_type: r.dynamic_type,
            question_type: r.question_type,
            feedback: r.feedback,
            module_id: r.module_id,
        }
    }
}

/// Request to update a question. All fields optional.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    pub block_type: Option<BlockType>,
    #[validate(length(min = 1, message = "statement must not be empty"))]
    pub statement: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "resourceUrl must be a valid URL"))]
    pub resource_url: Option<String>,
    pub dynamic_type: Option<DynamicType>,
    pub question_type: Option<QuestionType>,
    #[validate(length(min = 1, message = "feedback must not be empty"))]
    pub feedback: Option<String>,
    pub module_id: Option<i32>,
}

impl From<UpdateQuestionRequest> for UpdateQuestion {
    fn from(r: UpdateQuestionRequest) -> Self {
        Self {
            block_type: r.block_type,
            statement: r.statement,
            description: r.description,
            resource_url: r.resource_url,
            dynamic_type: r.dynamic_type,
            question_type: r.question_type,
            feedback: r.feedback,
            module_id: r.module_id,
        }
    }
}
