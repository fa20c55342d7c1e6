//! Pagination request/response types shared by every list endpoint.
//!
//! The metadata formulas are pure functions of `(page, limit, total)`:
//! `page_count = ceil(total / limit)`, `has_next_page ⇔ page * limit < total`,
//! `has_previous_page ⇔ page > 1`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Sort direction, `DESC` unless the request says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum SortDirection {
    #[serde(rename = "ASC")]
    Asc,
    #[default]
    #[serde(rename = "DESC")]
    Desc,
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

/// A validated list request.
///
/// `page` and `limit` are always >= 1 here; construction goes through the
/// per-entity query parsers which reject anything else. `sort_by` holds an
/// API-level field name already checked against the entity's whitelist.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
    pub sort_by: Option<String>,
    pub sort_direction: SortDirection,
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sort_by: None,
            sort_direction: SortDirection::Desc,
            search: None,
        }
    }
}

impl PageRequest {
    /// Skip/take window offset: `(page - 1) * limit`. Saturates so an
    /// absurdly large page degenerates to an empty window instead of
    /// wrapping.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// Free-text search term, if present and non-blank.
    /// A non-blank search takes precedence over all per-field filters.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Page metadata for a list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub page_count: u64,
    pub total: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationMeta {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            page_count: total.div_ceil(limit),
            total,
            has_next_page: page.saturating_mul(limit) < total,
            has_previous_page: page > 1,
        }
    }
}

/// Sort metadata echoed back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SortMeta {
    /// Field the result set is ordered by
    pub by: String,
    /// `ASC` or `DESC`
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListMeta {
    pub pagination: PaginationMeta,
    pub sort: SortMeta,
}

/// Response envelope for list endpoints: `{data, meta}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: ListMeta,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, req: &PageRequest, total: u64) -> Self {
        Self {
            data,
            meta: ListMeta {
                pagination: PaginationMeta::new(req.page, req.limit, total),
                sort: SortMeta {
                    by: req
                        .sort_by
                        .clone()
                        .unwrap_or_else(|| "createdAt".to_string()),
                    direction: req.sort_direction,
                },
            },
        }
    }

    /// Convert the page's items, keeping the metadata intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_ceil_of_total_over_limit() {
        assert_eq!(PaginationMeta::new(1, 10, 50).page_count, 5);
        assert_eq!(PaginationMeta::new(1, 10, 51).page_count, 6);
        assert_eq!(PaginationMeta::new(1, 10, 9).page_count, 1);
        assert_eq!(PaginationMeta::new(1, 10, 0).page_count, 0);
    }

    #[test]
    fn has_next_page_iff_window_end_before_total() {
        assert!(PaginationMeta::new(1, 10, 11).has_next_page);
        assert!(!PaginationMeta::new(1, 10, 10).has_next_page);
        assert!(!PaginationMeta::new(2, 10, 20).has_next_page);
        assert!(PaginationMeta::new(2, 10, 21).has_next_page);
    }

    #[test]
    fn has_previous_page_iff_past_first_page() {
        assert!(!PaginationMeta::new(1, 10, 100).has_previous_page);
        assert!(PaginationMeta::new(2, 10, 100).has_previous_page);
    }

    #[test]
    fn page_beyond_total_reports_consistent_meta() {
        let meta = PaginationMeta::new(100, 10, 5);
        assert_eq!(meta.total, 5);
        assert_eq!(meta.page_count, 1);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn offset_is_zero_based_window_start() {
        let req = PageRequest {
            page: 3,
            limit: 25,
            ..Default::default()
        };
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn huge_page_saturates_instead_of_wrapping() {
        let req = PageRequest {
            page: u64::MAX,
            limit: 10,
            ..Default::default()
        };
        assert_eq!(req.offset(), u64::MAX);

        let meta = PaginationMeta::new(u64::MAX, 10, 5);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn blank_search_is_ignored() {
        let req = PageRequest {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(req.search_term(), None);

        let req = PageRequest {
            search: Some(" rust ".to_string()),
            ..Default::default()
        };
        assert_eq!(req.search_term(), Some("rust"));
    }

    #[test]
    fn meta_serializes_in_camel_case() {
        let meta = PaginationMeta::new(1, 10, 50);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["pageCount"], 5);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["hasPreviousPage"], false);
    }

    #[test]
    fn sort_direction_round_trips() {
        assert_eq!("ASC".parse::<SortDirection>(), Ok(SortDirection::Asc));
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("asc".parse::<SortDirection>().is_err());
        assert_eq!(SortDirection::Desc.to_string(), "DESC");
    }
}
