//! City DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{ApiError, QueryParser};
use crate::infrastructure::database::entities::city;
use crate::infrastructure::database::entities::Language;
use crate::infrastructure::database::repositories::city_repository::{
    NewCity, UpdateCity, SORTABLE_FIELDS,
};
use crate::infrastructure::database::repositories::CityFilter;
use crate::shared::PageRequest;

/// Query parameters of the city list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCitiesQuery {
    /// Page number (1-based). Default 1
    pub page: Option<String>,
    /// Items per page. Default 10
    pub limit: Option<String>,
    /// Sort field: `id`, `name`, `language`, `createdAt`, `updatedAt`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`. Default `DESC`
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    /// Free-text search over name and description; overrides per-field filters
    pub search: Option<String>,
    /// Filter by name (case-insensitive substring)
    pub name: Option<String>,
    /// Filter by language: `en`, `es`, `pt`
    pub language: Option<String>,
}

impl ListCitiesQuery {
    pub fn parse(self) -> Result<(PageRequest, CityFilter), ApiError> {
        let mut p = QueryParser::new();

        let page = p.page(&self.page);
        let limit = p.limit(&self.limit);
        let sort_by = p.sort_by(&self.sort_by, SORTABLE_FIELDS);
        let sort_direction = p.sort_direction(&self.sort_direction);

        let filter = CityFilter {
            name: self.name,
            language: p.enum_value("language", &self.language, "en, es, pt"),
        };

        let req = p.finish(page, limit, sort_by, sort_direction, self.search)?;
        Ok((req, filter))
    }
}

/// City as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub language: Language,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<city::Model> for CityResponse {
    fn from(c: city::Model) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            language: c.language,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a city. Names are unique among live cities.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Lisbon",
    "description": "Guides for the Lisbon region",
    "language": "pt"
}))]
pub struct CreateCityRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub language: Language,
}

impl From<CreateCityRequest> for NewCity {
    fn from(r: CreateCityRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            language: r.language,
        }
    }
}

/// Request to update a city. All fields optional.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCityRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub language: Option<Language>,
}

impl From<UpdateCityRequest> for UpdateCity {
    fn from(r: UpdateCityRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            language: r.language,
        }
    }
}
