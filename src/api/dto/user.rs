//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{ApiError, QueryParser};
use crate::infrastructure::database::entities::user::{self, UserRole};
use crate::infrastructure::database::repositories::user_repository::{
    NewUser, UpdateUser, SORTABLE_FIELDS,
};
use crate::infrastructure::database::repositories::UserFilter;
use crate::shared::PageRequest;

/// Query parameters of the user list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Page number (1-based). Default 1
    pub page: Option<String>,
    /// Items per page. Default 10
    pub limit: Option<String>,
    /// Sort field: `id`, `name`, `email`, `role`, `createdAt`, `updatedAt`
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    /// `ASC` or `DESC`. Default `DESC`
    #[serde(rename = "sortDirection")]
    pub sort_direction: Option<String>,
    /// Free-text search over name and email; overrides per-field filters
    pub search: Option<String>,
    /// Filter by name (case-insensitive substring)
    pub name: Option<String>,
    /// Filter by email (case-insensitive substring)
    pub email: Option<String>,
    /// Filter by role: `citizen`, `moderator`, `admin`
    pub role: Option<String>,
}

impl ListUsersQuery {
    pub fn parse(self) -> Result<(PageRequest, UserFilter), ApiError> {
        let mut p = QueryParser::new();

        let page = p.page(&self.page);
        let limit = p.limit(&self.limit);
        let sort_by = p.sort_by(&self.sort_by, SORTABLE_FIELDS);
        let sort_direction = p.sort_direction(&self.sort_direction);

        let filter = UserFilter {
            name: self.name,
            email: self.email,
            role: p.enum_value("role", &self.role, "citizen, moderator, admin"),
        };

        let req = p.finish(page, limit, sort_by, sort_direction, self.search)?;
        Ok((req, filter))
    }
}

/// User as returned to clients.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Creation timestamp (ISO 8601)
    pub created_at: String,
    /// Last update timestamp (ISO 8601)
    pub updated_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            role: u.role,
            created_at: u.created_at.to_rfc3339(),
            updated_at: u.updated_at.to_rfc3339(),
        }
    }
}

/// Request to create a user. Emails are unique among live users.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "email": "ana@example.com",
    "name": "Ana",
    "role": "citizen"
}))]
pub struct CreateUserRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    /// Defaults to `citizen`
    pub role: Option<UserRole>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            email: r.email,
            name: r.name,
            role: r.role,
        }
    }
}

/// Request to update a user. All fields optional.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            email: r.email,
            name: r.name,
            role: r.role,
        }
    }
}
