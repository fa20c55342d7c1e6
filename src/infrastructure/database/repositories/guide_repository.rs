//! Guide repository

use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Condition;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};

use super::paginator::{paginate, ListSpec};
use crate::infrastructure::database::entities::guide::{self, GuideDifficulty, GuideStatus};
use crate::infrastructure::database::entities::Language;
use crate::shared::{DomainError, DomainResult, PageRequest, Paginated};

/// API-level sort field whitelist for guides.
pub const SORTABLE_FIELDS: &[&str] = &[
    "id",
    "name",
    "difficulty",
    "estimatedDuration",
    "points",
    "createdAt",
    "updatedAt",
];

/// Per-field filters accepted by the guide list endpoint.
#[derive(Debug, Default)]
pub struct GuideFilter {
    pub difficulty: Option<GuideDifficulty>,
    pub status: Option<GuideStatus>,
    pub language: Option<Language>,
    pub min_duration: Option<i32>,
    pub max_duration: Option<i32>,
    pub min_points: Option<i32>,
    pub max_points: Option<i32>,
}

impl ListSpec for GuideFilter {
    type Entity = guide::Entity;

    fn filter_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(difficulty) = self.difficulty {
            cond = cond.add(guide::Column::Difficulty.eq(difficulty));
        }
        if let Some(status) = self.status {
            cond = cond.add(guide::Column::Status.eq(status));
        }
        if let Some(language) = self.language {
            cond = cond.add(guide::Column::Language.eq(language));
        }
        if let Some(min) = self.min_duration {
            cond = cond.add(guide::Column::EstimatedDuration.gte(min));
        }
        if let Some(max) = self.max_duration {
            cond = cond.add(guide::Column::EstimatedDuration.lte(max));
        }
        if let Some(min) = self.min_points {
            cond = cond.add(guide::Column::Points.gte(min));
        }
        if let Some(max) = self.max_points {
            cond = cond.add(guide::Column::Points.lte(max));
        }
        cond
    }

    fn search_columns() -> Vec<guide::Column> {
        vec![guide::Column::Name, guide::Column::Description]
    }

    fn sort_column(name: &str) -> Option<guide::Column> {
        match name {
            "id" => Some(guide::Column::Id),
            "name" => Some(guide::Column::Name),
            "difficulty" => Some(guide::Column::Difficulty),
            "estimatedDuration" => Some(guide::Column::EstimatedDuration),
            "points" => Some(guide::Column::Points),
            "createdAt" => Some(guide::Column::CreatedAt),
            "updatedAt" => Some(guide::Column::UpdatedAt),
            _ => None,
        }
    }

    fn default_sort_column() -> guide::Column {
        guide::Column::CreatedAt
    }

    fn deleted_at_column() -> guide::Column {
        guide::Column::DeletedAt
    }
}

/// Input for creating a guide.
#[derive(Debug)]
pub struct NewGuide {
    pub name: String,
    pub description: String,
    pub difficulty: GuideDifficulty,
    pub estimated_duration: i32,
    pub status: Option<GuideStatus>,
    pub language: Language,
    pub points: i32,
}

/// Partial update for a guide.
#[derive(Debug, Default)]
pub struct UpdateGuide {
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<GuideDifficulty>,
    pub estimated_duration: Option<i32>,
    pub status: Option<GuideStatus>,
    pub language: Option<Language>,
    pub points: Option<i32>,
}

pub struct GuideRepository {
    db: DatabaseConnection,
}

impl GuideRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        req: &PageRequest,
        filter: &GuideFilter,
    ) -> DomainResult<Paginated<guide::Model>> {
        paginate(&self.db, filter, req).await
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<guide::Model>> {
        let model = guide::Entity::find_by_id(id)
            .filter(guide::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    pub async fn create(&self, new: NewGuide) -> DomainResult<guide::Model> {
        debug!("Creating guide: {}", new.name);
        let now = Utc::now();

        let model = guide::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            description: Set(new.description),
            difficulty: Set(new.difficulty),
            estimated_duration: Set(new.estimated_duration),
            status: Set(new.status.unwrap_or_default()),
            language: Set(new.language),
            points: Set(new.points),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, changes: UpdateGuide) -> DomainResult<guide::Model> {
        debug!("Updating guide: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Guide", id))?;

        let mut active: guide::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(difficulty) = changes.difficulty {
            active.difficulty = Set(difficulty);
        }
        if let Some(duration) = changes.estimated_duration {
            active.estimated_duration = Set(duration);
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        if let Some(language) = changes.language {
            active.language = Set(language);
        }
        if let Some(points) = changes.points {
            active.points = Set(points);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn soft_delete(&self, id: i32) -> DomainResult<()> {
        debug!("Soft-deleting guide: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Guide", id))?;

        let mut active: guide::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::shared::SortDirection;
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> GuideRepository {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        GuideRepository::new(db)
    }

    fn new_guide(name: &str, difficulty: GuideDifficulty, points: i32) -> NewGuide {
        NewGuide {
            name: name.to_string(),
            description: format!("{name} description"),
            difficulty,
            estimated_duration: 30,
            status: Some(GuideStatus::Published),
            language: Language::En,
            points,
        }
    }

    #[tokio::test]
    async fn search_wins_over_per_field_filters() {
        let repo = setup().await;
        repo.create(new_guide("Foo Guide", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();
        repo.create(new_guide("Bar", GuideDifficulty::Advanced, 10))
            .await
            .unwrap();

        // difficulty=advanced would exclude "Foo Guide", but search takes
        // precedence over all per-field filters.
        let req = PageRequest {
            search: Some("foo".to_string()),
            ..Default::default()
        };
        let filter = GuideFilter {
            difficulty: Some(GuideDifficulty::Advanced),
            ..Default::default()
        };

        let page = repo.list(&req, &filter).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Foo Guide");
        assert_eq!(page.meta.pagination.total, 1);
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let repo = setup().await;
        repo.create(new_guide("Rust Basics", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();
        repo.create(new_guide("Advanced Cooking", GuideDifficulty::Advanced, 10))
            .await
            .unwrap();

        let req = PageRequest {
            search: Some("RUST".to_string()),
            ..Default::default()
        };
        let page = repo.list(&req, &GuideFilter::default()).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Rust Basics");
    }

    #[tokio::test]
    async fn enum_filter_matches_exactly() {
        let repo = setup().await;
        let mut published = new_guide("Published", GuideDifficulty::Beginner, 10);
        published.status = Some(GuideStatus::Published);
        repo.create(published).await.unwrap();

        let mut draft = new_guide("Draft", GuideDifficulty::Beginner, 10);
        draft.status = Some(GuideStatus::Draft);
        repo.create(draft).await.unwrap();

        let filter = GuideFilter {
            status: Some(GuideStatus::Published),
            ..Default::default()
        };
        let page = repo
            .list(&PageRequest::default(), &filter)
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Published");
    }

    #[tokio::test]
    async fn numeric_range_bounds_are_inclusive() {
        let repo = setup().await;
        for points in [49, 50, 75, 100, 101] {
            repo.create(new_guide(
                &format!("Guide {points}"),
                GuideDifficulty::Beginner,
                points,
            ))
            .await
            .unwrap();
        }

        let filter = GuideFilter {
            min_points: Some(50),
            max_points: Some(100),
            ..Default::default()
        };
        let req = PageRequest {
            sort_by: Some("points".to_string()),
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        let page = repo.list(&req, &filter).await.unwrap();

        let points: Vec<i32> = page.data.iter().map(|g| g.points).collect();
        assert_eq!(points, vec![50, 75, 100]);
    }

    #[tokio::test]
    async fn either_range_bound_works_alone() {
        let repo = setup().await;
        for points in [10, 50, 90] {
            repo.create(new_guide(
                &format!("Guide {points}"),
                GuideDifficulty::Beginner,
                points,
            ))
            .await
            .unwrap();
        }

        let only_min = GuideFilter {
            min_points: Some(50),
            ..Default::default()
        };
        let page = repo
            .list(&PageRequest::default(), &only_min)
            .await
            .unwrap();
        assert_eq!(page.meta.pagination.total, 2);

        let only_max = GuideFilter {
            max_points: Some(50),
            ..Default::default()
        };
        let page = repo
            .list(&PageRequest::default(), &only_max)
            .await
            .unwrap();
        assert_eq!(page.meta.pagination.total, 2);
    }

    #[tokio::test]
    async fn page_beyond_total_is_empty_with_correct_meta() {
        let repo = setup().await;
        for i in 0..5 {
            repo.create(new_guide(&format!("Guide {i}"), GuideDifficulty::Beginner, 10))
                .await
                .unwrap();
        }

        let req = PageRequest {
            page: 100,
            limit: 10,
            ..Default::default()
        };
        let page = repo
            .list(&req, &GuideFilter::default())
            .await
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.meta.pagination.total, 5);
        assert_eq!(page.meta.pagination.page_count, 1);
        assert!(!page.meta.pagination.has_next_page);
        assert!(page.meta.pagination.has_previous_page);
    }

    #[tokio::test]
    async fn default_sort_is_created_at_descending() {
        let repo = setup().await;
        let first = repo
            .create(new_guide("First", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();
        // Force distinct creation timestamps.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo
            .create(new_guide("Second", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();

        let page = repo
            .list(&PageRequest::default(), &GuideFilter::default())
            .await
            .unwrap();
        assert_eq!(page.data[0].id, second.id);
        assert_eq!(page.data[1].id, first.id);
        assert_eq!(page.meta.sort.by, "createdAt");
        assert_eq!(page.meta.sort.direction, SortDirection::Desc);
    }

    #[tokio::test]
    async fn explicit_sort_by_whitelisted_field() {
        let repo = setup().await;
        repo.create(new_guide("B guide", GuideDifficulty::Beginner, 20))
            .await
            .unwrap();
        repo.create(new_guide("A guide", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();

        let req = PageRequest {
            sort_by: Some("name".to_string()),
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        let page = repo.list(&req, &GuideFilter::default()).await.unwrap();
        assert_eq!(page.data[0].name, "A guide");
        assert_eq!(page.meta.sort.by, "name");
    }

    #[tokio::test]
    async fn unknown_sort_field_is_a_validation_error() {
        let repo = setup().await;
        let req = PageRequest {
            sort_by: Some("password".to_string()),
            ..Default::default()
        };
        let err = repo
            .list(&req, &GuideFilter::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn soft_deleted_guides_are_invisible() {
        let repo = setup().await;
        let guide = repo
            .create(new_guide("Doomed", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();
        repo.create(new_guide("Survivor", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();

        repo.soft_delete(guide.id).await.unwrap();

        let page = repo
            .list(&PageRequest::default(), &GuideFilter::default())
            .await
            .unwrap();
        assert_eq!(page.meta.pagination.total, 1);
        assert_eq!(page.data[0].name, "Survivor");

        assert!(repo.find_by_id(guide.id).await.unwrap().is_none());
        // Deleting twice reports not-found.
        assert!(matches!(
            repo.soft_delete(guide.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn windowing_slices_the_sorted_set() {
        let repo = setup().await;
        for i in 1..=25 {
            repo.create(new_guide(&format!("Guide {i:02}"), GuideDifficulty::Beginner, i))
                .await
                .unwrap();
        }

        let req = PageRequest {
            page: 2,
            limit: 10,
            sort_by: Some("points".to_string()),
            sort_direction: SortDirection::Asc,
            ..Default::default()
        };
        let page = repo.list(&req, &GuideFilter::default()).await.unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.data[0].points, 11);
        assert_eq!(page.data[9].points, 20);
        assert_eq!(page.meta.pagination.total, 25);
        assert_eq!(page.meta.pagination.page_count, 3);
        assert!(page.meta.pagination.has_next_page);
        assert!(page.meta.pagination.has_previous_page);
    }

    #[tokio::test]
    async fn update_applies_only_supplied_fields() {
        let repo = setup().await;
        let guide = repo
            .create(new_guide("Original", GuideDifficulty::Beginner, 10))
            .await
            .unwrap();

        let updated = repo
            .update(
                guide.id,
                UpdateGuide {
                    name: Some("Renamed".to_string()),
                    points: Some(42),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.points, 42);
        assert_eq!(updated.description, guide.description);
        assert_eq!(updated.difficulty, GuideDifficulty::Beginner);
    }
}
