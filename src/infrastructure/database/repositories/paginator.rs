//! Generic pagination/filtering/sorting engine.
//!
//! Every list endpoint runs through [`paginate`]: one entity-agnostic
//! pipeline of predicate → order → skip/take window → page metadata.
//! Entities plug in through [`ListSpec`], a declarative description of
//! their free-text search columns, sortable-field whitelist and per-field
//! filters.

use sea_orm::sea_query::{Condition, Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::shared::{DomainError, DomainResult, PageRequest, Paginated, SortDirection};

/// Per-entity configuration for the pagination engine.
///
/// Implemented by each entity's filter struct: the instance carries the
/// supplied per-field filter values, the associated functions declare the
/// entity's search columns and sort whitelist.
pub trait ListSpec {
    type Entity: EntityTrait;

    /// AND-conjunction of the per-field filters supplied on this request.
    /// Absent filters contribute no clause.
    fn filter_condition(&self) -> Condition;

    /// Columns matched (case-insensitively, as substring) by the free-text
    /// `search` parameter.
    fn search_columns() -> Vec<<Self::Entity as EntityTrait>::Column>;

    /// Resolve a whitelisted API-level sort field name to its column.
    fn sort_column(name: &str) -> Option<<Self::Entity as EntityTrait>::Column>;

    /// Creation-timestamp column, used when no `sortBy` is given.
    fn default_sort_column() -> <Self::Entity as EntityTrait>::Column;

    /// Soft-deletion marker column; rows with a value here are invisible.
    fn deleted_at_column() -> <Self::Entity as EntityTrait>::Column;
}

/// Case-insensitive substring match: `LOWER(col) LIKE '%term%'`.
pub fn contains_ci<C: ColumnTrait>(col: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", term.to_lowercase());
    Expr::expr(Func::lower(Expr::col(col))).like(pattern)
}

/// Run one paginated list query.
///
/// A non-blank `search` builds an OR-group over the entity's search columns
/// and replaces the per-field filters entirely; otherwise the per-field
/// filters apply as an AND-conjunction. Soft-deleted rows never match.
/// An offset beyond the last row yields an empty page with correct totals.
pub async fn paginate<S: ListSpec>(
    db: &DatabaseConnection,
    filter: &S,
    req: &PageRequest,
) -> DomainResult<Paginated<<S::Entity as EntityTrait>::Model>>
where
    <S::Entity as EntityTrait>::Model: Send + Sync,
{
    let mut query = S::Entity::find().filter(S::deleted_at_column().is_null());

    // Search is exclusive with per-field filtering: when present it is the
    // entire predicate.
    let condition = match req.search_term() {
        Some(term) => {
            let mut any = Condition::any();
            for col in S::search_columns() {
                any = any.add(contains_ci(col, term));
            }
            any
        }
        None => filter.filter_condition(),
    };
    query = query.filter(condition);

    let sort_column = match req.sort_by.as_deref() {
        Some(name) => S::sort_column(name).ok_or_else(|| {
            DomainError::validation("sortBy", format!("sortBy must be a sortable field, got '{name}'"))
        })?,
        None => S::default_sort_column(),
    };
    query = match req.sort_direction {
        SortDirection::Asc => query.order_by_asc(sort_column),
        SortDirection::Desc => query.order_by_desc(sort_column),
    };

    let total = query.clone().count(db).await?;
    let models = query.offset(req.offset()).limit(req.limit).all(db).await?;

    Ok(Paginated::new(models, req, total))
}
