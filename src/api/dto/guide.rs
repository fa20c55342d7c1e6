//! Guide DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{ApiError, QueryParser};
use crate::infrastructure::database::entities::guide::{self, GuideDifficulty, GuideStatus};
use crate::infrastructure::database::entities::Language;
use crate::infrastructure::database::repositories::guide_repository::{
    NewGuide, UpdateGuide, SORTABLE_FIELDS,
};
use crate::infrastructure::database::repositories::GuideFilter;
use crate::shared::PageRequest;

/// Query parameters of the guide list endpoint.
///
/// Everything arrives as a raw string and is coerced by [`parse`](Self::parse),
/// which reports all violations in one response.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListGuidesQuery {
    /// Page number (1-based). Default 1
    pub page: Option<String>,
    /// Items per page. Default 10
    pub limit: Option<String>,
    /// Sort field: `id`, `name`, `difficulty`, `estimatedDuration`, `points`, `createdAt`, `updatedAt`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`. Default `DESC`
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    /// Free-text search over name and description; overrides per-field filters
    pub search: Option<String>,
    /// Filter by difficulty: `beginner`, `intermediate`, `advanced`
    pub difficulty: Option<String>,
    /// Filter by status: `draft`, `published`, `archived`
    pub status: Option<String>,
    /// Filter by language: `en`, `es`, `pt`
    pub language: Option<String>,
    /// Minimum estimated duration in minutes (inclusive)
    #[serde(rename = "minDuration")]
    pub min_duration: Option<String>,
    /// Maximum estimated duration in minutes (inclusive)
    #[serde(rename = "maxDuration")]
    pub max_duration: Option<String>,
    /// Minimum points (inclusive)
    #[serde(rename = "minPoints")]
    pub min_points: Option<String>,
    /// Maximum points (inclusive)
    #[serde(rename = "maxPoints")]
    pub max_points: Option<String>,
}

impl ListGuidesQuery {
    pub fn parse(self) -> Result<(PageRequest, GuideFilter), ApiError> {
        let mut p = QueryParser::new();

        let page = p.page(&self.page);
        let limit = p.limit(&self.limit);
        let sort_by = p.sort_by(&self.sort_by, SORTABLE_FIELDS);
        let sort_direction = p.sort_direction(&self.sort_direction);

        let filter = GuideFilter {
            difficulty: p.enum_value(
                "difficulty",
                &self.difficulty,
                "beginner, intermediate, advanced",
            ),
            status: p.enum_value("status", &self.status, "draft, published, archived"),
            language: p.enum_value("language", &self.language, "en, es, pt"),
            min_duration: p.int("minDuration", &self.min_duration),
            max_duration: p.int("maxDuration", &self.max_duration),
            min_points: p.int("minPoints", &self.min_points),
            max_points: p.int("maxPoints", &self.max_points),
        };

        let req = p.finish(page, limit, sort_by, sort_direction, self.search)?;
        Ok((req, filter))
    }
}

/// Guide as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuideResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub difficulty: GuideDifficulty,
    pub estimated_duration: i32,
    pub status: GuideStatus,
    pub language: Language,
    pub points: i32,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<guide::Model> for GuideResponse {
    fn from(g: guide::Model) -> Self {
        Self {
            id: g.id,
            name: g.name,
            description: g.description,
            difficulty: g.difficulty,
            estimated_duration: g.estimated_duration,
            status: g.status,
            language: g.language,
            points: g.points,
            created_at: g.created_at.to_rfc3339(),
            updated_at: g.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a guide.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "name": "Recycling basics",
    "description": "How to sort household waste",
    "difficulty": "beginner",
    "estimatedDuration": 30,
    "language": "en",
    "points": 100
}))]
pub struct CreateGuideRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub difficulty: GuideDifficulty,
    #[validate(range(min = 1, message = "estimatedDuration must be at least 1 minute"))]
    pub estimated_duration: i32,
    /// Defaults to `draft`
    pub status: Option<GuideStatus>,
    pub language: Language,
    #[validate(range(min = 0, message = "points must not be negative"))]
    pub points: i32,
}

impl From<CreateGuideRequest> for NewGuide {
    fn from(r: CreateGuideRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            difficulty: r.difficulty,
            estimated_duration: r.estimated_duration,
            status: r.status,
            language: r.language,
            points: r.points,
        }
    }
}

/// Request to update a guide. All fields optional; only supplied ones change.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuideRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub difficulty: Option<GuideDifficulty>,
    #[validate(range(min = 1, message = "estimatedDuration must be at least 1 minute"))]
    pub estimated_duration: Option<i32>,
    pub status: Option<GuideStatus>,
    pub language: Option<Language>,
    #[validate(range(min = 0, message = "points must not be negative"))]
    pub points: Option<i32>,
}

impl From<UpdateGuideRequest> for UpdateGuide {
    fn from(r: UpdateGuideRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            difficulty: r.difficulty,
            estimated_duration: r.estimated_duration,
            status: r.status,
            language: r.language,
            points: r.points,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::SortDirection;

    #[test]
    fn parse_coerces_filters_and_window() {
        let query = ListGuidesQuery {
            page: Some("2".to_string()),
            limit: Some("25".to_string()),
            sort_by: Some("points".to_string()),
            sort_direction: Some("ASC".to_string()),
            difficulty: Some("intermediate".to_string()),
            min_points: Some("10".to_string()),
            ..Default::default()
        };

        let (req, filter) = query.parse().unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.limit, 25);
        assert_eq!(req.sort_by.as_deref(), Some("points"));
        assert_eq!(req.sort_direction, SortDirection::Asc);
        assert_eq!(filter.difficulty, Some(GuideDifficulty::Intermediate));
        assert_eq!(filter.min_points, Some(10));
        assert_eq!(filter.max_points, None);
    }

    #[test]
    fn parse_rejects_unknown_sort_field() {
        let query = ListGuidesQuery {
            sort_by: Some("deletedAt".to_string()),
            ..Default::default()
        };
        assert!(query.parse().is_err());
    }

    #[test]
    fn response_serializes_in_camel_case() {
        use chrono::Utc;

        let model = guide::Model {
            id: 1,
            name: "G".to_string(),
            description: "D".to_string(),
            difficulty: GuideDifficulty::Beginner,
            estimated_duration: 15,
            status: GuideStatus::Published,
            language: Language::En,
            points: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        let json = serde_json::to_value(GuideResponse::from(model)).unwrap();
        assert!(json.get("estimatedDuration").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "published");
    }
}
