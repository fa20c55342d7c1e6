//! Common API DTOs: response envelopes, the API error type and the
//! query-string parsing toolkit shared by every list endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::error;
use utoipa::ToSchema;

use crate::shared::{DomainError, FieldError, PageRequest, SortDirection};

/// Simple `{"message": ...}` envelope, used for deletions and 404/409 errors.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `{"errors": [...]}` envelope for validation failures.
///
/// Carries every violation found in the request at once, so clients fix the
/// whole request in one round trip.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorsResponse {
    pub errors: Vec<FieldError>,
}

/// `{"message": ..., "error": ...}` envelope for internal failures:
/// a stable operation description plus the underlying error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub error: String,
}

/// Error as exposed to API clients.
///
/// Maps onto status codes: validation → 400, missing entity → 404,
/// uniqueness/referential conflict → 409, storage failure → 500.
#[derive(Debug)]
pub enum ApiError {
    Validation(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    Internal { message: String, error: String },
}

impl ApiError {
    /// Translate a domain error, attaching `context` as the stable message
    /// for internal failures (e.g. "Error fetching guides").
    pub fn from_domain(context: &str, err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => Self::Validation(errors),
            DomainError::NotFound { entity, .. } => Self::NotFound(format!("{entity} not found")),
            DomainError::Conflict(message) => Self::Conflict(message),
            DomainError::Storage(e) => {
                error!("{context}: {e}");
                Self::Internal {
                    message: context.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(ErrorsResponse { errors })).into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(MessageResponse::new(message))).into_response()
            }
            Self::Conflict(message) => {
                (StatusCode::CONFLICT, Json(MessageResponse::new(message))).into_response()
            }
            Self::Internal { message, error } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { message, error }),
            )
                .into_response(),
        }
    }
}

/// Collects violations while coercing raw query-string values.
///
/// Every list endpoint receives its parameters as raw strings and runs them
/// through one of these; all violations in a request are gathered and
/// reported together rather than failing on the first.
#[derive(Debug, Default)]
pub struct QueryParser {
    errors: Vec<FieldError>,
}

impl QueryParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, constraint: impl Into<String>) {
        self.errors.push(FieldError::new(field, constraint));
    }

    /// `page`: positive integer, defaults to 1.
    pub fn page(&mut self, raw: &Option<String>) -> u64 {
        self.positive_int("page", raw, 1)
    }

    /// `limit`: positive integer, defaults to 10.
    pub fn limit(&mut self, raw: &Option<String>) -> u64 {
        self.positive_int("limit", raw, 10)
    }

    fn positive_int(&mut self, field: &str, raw: &Option<String>, default: u64) -> u64 {
        match raw.as_deref() {
            None => default,
            Some(s) => match s.parse::<u64>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    self.push(field, format!("{field} must be a positive integer"));
                    default
                }
            },
        }
    }

    /// `sortBy`: must name a field in the entity's whitelist.
    pub fn sort_by(&mut self, raw: &Option<String>, sortable: &[&str]) -> Option<String> {
        match raw.as_deref() {
            None => None,
            Some(s) if sortable.contains(&s) => Some(s.to_string()),
            Some(s) => {
                self.push(
                    "sortBy",
                    format!("sortBy must be one of [{}], got '{s}'", sortable.join(", ")),
                );
                None
            }
        }
    }

    /// `sortDirection`: `ASC` or `DESC`, defaults to `DESC`.
    pub fn sort_direction(&mut self, raw: &Option<String>) -> SortDirection {
        match raw.as_deref() {
            None => SortDirection::default(),
            Some(s) => s.parse().unwrap_or_else(|_| {
                self.push("sortDirection", "sortDirection must be ASC or DESC");
                SortDirection::default()
            }),
        }
    }

    /// Optional integer filter value.
    pub fn int(&mut self, field: &str, raw: &Option<String>) -> Option<i32> {
        match raw.as_deref() {
            None => None,
            Some(s) => match s.parse::<i32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    self.push(field, format!("{field} must be an integer"));
                    None
                }
            },
        }
    }

    /// Optional enum filter value; `allowed` is echoed in the violation.
    pub fn enum_value<T: FromStr>(
        &mut self,
        field: &str,
        raw: &Option<String>,
        allowed: &str,
    ) -> Option<T> {
        match raw.as_deref() {
            None => None,
            Some(s) => match s.parse::<T>() {
                Ok(v) => Some(v),
                Err(_) => {
                    self.push(field, format!("{field} must be one of [{allowed}], got '{s}'"));
                    None
                }
            },
        }
    }

    /// Assemble the validated [`PageRequest`], or fail with every violation
    /// collected so far.
    pub fn finish(
        self,
        page: u64,
        limit: u64,
        sort_by: Option<String>,
        sort_direction: SortDirection,
        search: Option<String>,
    ) -> Result<PageRequest, ApiError> {
        if self.errors.is_empty() {
            Ok(PageRequest {
                page,
                limit,
                sort_by,
                sort_direction,
                search,
            })
        } else {
            Err(ApiError::Validation(self.errors))
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_absent() {
        let mut p = QueryParser::new();
        let page = p.page(&None);
        let limit = p.limit(&None);
        let sort_by = p.sort_by(&None, &["id", "createdAt"]);
        let dir = p.sort_direction(&None);
        let req = p.finish(page, limit, sort_by, dir, None).unwrap();

        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
        assert_eq!(req.sort_by, None);
        assert_eq!(req.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn all_violations_are_reported_together() {
        let mut p = QueryParser::new();
        let page = p.page(&Some("0".to_string()));
        let limit = p.limit(&Some("abc".to_string()));
        let sort_by = p.sort_by(&Some("password".to_string()), &["id", "createdAt"]);
        let dir = p.sort_direction(&Some("sideways".to_string()));
        let err = p.finish(page, limit, sort_by, dir, None).unwrap_err();

        match err {
            ApiError::Validation(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["page", "limit", "sortBy", "sortDirection"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn enum_and_int_coercion() {
        use crate::infrastructure::database::entities::guide::GuideDifficulty;

        let mut p = QueryParser::new();
        let difficulty: Option<GuideDifficulty> =
            p.enum_value("difficulty", &Some("advanced".to_string()), "beginner, intermediate, advanced");
        let bad: Option<GuideDifficulty> =
            p.enum_value("difficulty", &Some("impossible".to_string()), "beginner, intermediate, advanced");
        let n = p.int("minPoints", &Some("42".to_string()));

        assert_eq!(difficulty, Some(GuideDifficulty::Advanced));
        assert_eq!(bad, None);
        assert_eq!(n, Some(42));
        assert!(p.finish(1, 10, None, SortDirection::Desc, None).is_err());
    }

    #[test]
    fn not_found_maps_to_entity_message() {
        let err = ApiError::from_domain(
            "Error fetching guide",
            DomainError::not_found("Guide", 7),
        );
        match err {
            ApiError::NotFound(message) => assert_eq!(message, "Guide not found"),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
