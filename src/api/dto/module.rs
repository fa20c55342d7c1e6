//! Module DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{ApiError, QueryParser};
use crate::infrastructure::database::entities::module::{self, ModuleStatus};
use crate::infrastructure::database::repositories::module_repository::{
    NewModule, UpdateModule, SORTABLE_FIELDS,
};
use crate::infrastructure::database::repositories::ModuleFilter;
use crate::shared::PageRequest;

/// Query parameters of the module list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListModulesQuery {
    /// Page number (1-based). Default 1
    pub page: Option<String>,
    /// Items per page. Default 10
    pub limit: Option<String>,
    /// Sort field: `id`, `name`, `order`, `points`, `createdAt`, `updatedAt`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`. Default `DESC`
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    /// Free-text search over name and description; overrides per-field filters
    pub search: Option<String>,
    /// Filter by status: `draft`, `published`, `archived`
    pub status: Option<String>,
    /// Filter by owning guide ID
    #[serde(rename = "guideId")]
    pub guide_id: Option<String>,
    /// Minimum points (inclusive)
    #[serde(rename = "minPoints")]
    pub min_points: Option<String>,
    /// Maximum points (inclusive)
    #[serde(rename = "maxPoints")]
    pub max_points: Option<String>,
}

impl ListModulesQuery {
    pub fn parse(self) -> Result<(PageRequest, ModuleFilter), ApiError> {
        let mut p = QueryParser::new();

        let page = p.page(&self.page);
        let limit = p.limit(&self.limit);
        let sort_by = p.sort_by(&self.sort_by, SORTABLE_FIELDS);
        let sort_direction = p.sort_direction(&self.sort_direction);

        let filter = ModuleFilter {
            status: p.enum_value("status", &self.status, "draft, published, archived"),
            guide_id: p.int("guideId", &self.guide_id),
            min_points: p.int("minPoints", &self.min_points),
            max_points: p.int("maxPoints", &self.max_points),
        };

        let req = p.finish(page, limit, sort_by, sort_direction, self.search)?;
        Ok((req, filter))
    }
}

/// Module as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub order: i32,
    pub points: i32,
    pub status: ModuleStatus,
    pub guide_id: i32,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<module::Model> for ModuleResponse {
    fn from(m: module::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            order: m.order,
            points: m.points,
            status: m.status,
            guide_id: m.guide_id,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a module. The owning guide must exist.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Sorting plastics",
    "description": "Plastic types and their bins",
    "order": 1,
    "points": 50,
    "guideId": 1
}))]
pub struct CreateModuleRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[validate(range(min = 1, message = "order must be at least 1"))]
    pub order: i32,
    #[validate(range(min = 0, message = "points must not be negative"))]
    pub points: i32,
    /// Defaults to `draft`
    pub status: Option<ModuleStatus>,
    pub guide_id: i32,
}

impl From<CreateModuleRequest> for NewModule {
    fn from(r: CreateModuleRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            order: r.order,
            points: r.points,
            status: r.status,
            guide_id: r.guide_id,
        }
    }
}

/// Request to update a module. All fields optional.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModuleRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    #[validate(range(min = 1, message = "order must be at least 1"))]
    pub order: Option<i32>,
    #[validate(range(min = 0, message = "points must not be negative"))]
    pub points: Option<i32>,
    pub status: Option<ModuleStatus>,
    pub guide_id: Option<i32>,
}

impl From<UpdateModuleRequest> for UpdateModule {
    fn from(r: UpdateModuleRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            order: r.order,
            points: r.points,
            status: r.status,
            guide_id: r.guide_id,
        }
    }
}
