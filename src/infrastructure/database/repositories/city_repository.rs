//! City repository

use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Condition;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};

use super::paginator::{contains_ci, paginate, ListSpec};
use crate::infrastructure::database::entities::city;
use crate::infrastructure::database::entities::Language;
use crate::shared::{DomainError, DomainResult, PageRequest, Paginated};

/// API-level sort field whitelist for cities.
pub const SORTABLE_FIELDS: &[&str] = &["id", "name", "language", "createdAt", "updatedAt"];

/// Per-field filters accepted by the city list endpoint.
#[derive(Debug, Default)]
pub struct CityFilter {
    pub name: Option<String>,
    pub language: Option<Language>,
}

impl ListSpec for CityFilter {
    type Entity = city::Entity;

    fn filter_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(name) = &self.name {
            cond = cond.add(contains_ci(city::Column::Name, name));
        }
        if let Some(language) = self.language {
            cond = cond.add(city::Column::Language.eq(language));
        }
        cond
    }

    fn search_columns() -> Vec<city::Column> {
        vec![city::Column::Name, city::Column::Description]
    }

    fn sort_column(name: &str) -> Option<city::Column> {
        match name {
            "id" => Some(city::Column::Id),
            "name" => Some(city::Column::Name),
            "language" => Some(city::Column::Language),
            "createdAt" => Some(city::Column::CreatedAt),
            "updatedAt" => Some(city::Column::UpdatedAt),
            _ => None,
        }
    }

    fn default_sort_column() -> city::Column {
        city::Column::CreatedAt
    }

    fn deleted_at_column() -> city::Column {
        city::Column::DeletedAt
    }
}

/// Input for creating a city.
#[derive(Debug)]
pub struct NewCity {
    pub name: String,
    pub description: String,
    pub language: Language,
}

/// Partial update for a city.
#[derive(Debug, Default)]
pub struct UpdateCity {
    pub name: Option<String>,
    pub description: Option<String>,
    pub language: Option<Language>,
}

pub struct CityRepository {
    db: DatabaseConnection,
}

impl CityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        req: &PageRequest,
        filter: &CityFilter,
    ) -> DomainResult<Paginated<city::Model>> {
        paginate(&self.db, filter, req).await
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<city::Model>> {
        let model = city::Entity::find_by_id(id)
            .filter(city::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// City names are unique among live rows. `exclude_id` skips the row
    /// being updated so a city can keep its own name.
    async fn name_taken(&self, name: &str, exclude_id: Option<i32>) -> DomainResult<bool> {
        let mut query = city::Entity::find()
            .filter(city::Column::Name.eq(name))
            .filter(city::Column::DeletedAt.is_null());
        if let Some(id) = exclude_id {
            query = query.filter(city::Column::Id.ne(id));
        }
        Ok(query.one(&self.db).await?.is_some())
    }

    pub async fn create(&self, new: NewCity) -> DomainResult<city::Model> {
        debug!("Creating city: {}", new.name);

        if self.name_taken(&new.name, None).await? {
            return Err(DomainError::Conflict(
                "City with this name already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let model = city::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            description: Set(new.description),
            language: Set(new.language),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, changes: UpdateCity) -> DomainResult<city::Model> {
        debug!("Updating city: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("City", id))?;

        if let Some(name) = &changes.name {
            if self.name_taken(name, Some(id)).await? {
                return Err(DomainError::Conflict(
                    "City with this name already exists".to_string(),
                ));
            }
        }

        let mut active: city::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(language) = changes.language {
            active.language = Set(language);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn soft_delete(&self, id: i32) -> DomainResult<()> {
        debug!("Soft-deleting city: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("City", id))?;

        let mut active: city::ActiveModel = existing.into();
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
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> CityRepository {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        CityRepository::new(db)
    }

    fn new_city(name: &str, language: Language) -> NewCity {
        NewCity {
            name: name.to_string(),
            description: format!("About {name}"),
            language,
        }
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let repo = setup().await;
        repo.create(new_city("Lisbon", Language::Pt)).await.unwrap();

        let err = repo
            .create(new_city("Lisbon", Language::En))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_may_keep_its_own_name() {
        let repo = setup().await;
        let city = repo.create(new_city("Madrid", Language::Es)).await.unwrap();

        let updated = repo
            .update(
                city.id,
                UpdateCity {
                    name: Some("Madrid".to_string()),
                    description: Some("Capital of Spain".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.description, "Capital of Spain");
    }

    #[tokio::test]
    async fn update_rejects_another_citys_name() {
        let repo = setup().await;
        repo.create(new_city("Porto", Language::Pt)).await.unwrap();
        let city = repo.create(new_city("Faro", Language::Pt)).await.unwrap();

        let err = repo
            .update(
                city.id,
                UpdateCity {
                    name: Some("Porto".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn soft_deleted_name_can_be_reused() {
        let repo = setup().await;
        let city = repo.create(new_city("Quito", Language::Es)).await.unwrap();
        repo.soft_delete(city.id).await.unwrap();

        repo.create(new_city("Quito", Language::Es)).await.unwrap();
    }

    #[tokio::test]
    async fn name_filter_is_ci_substring_and_ands_with_language() {
        let repo = setup().await;
        repo.create(new_city("San Salvador", Language::Es))
            .await
            .unwrap();
        repo.create(new_city("Salvador", Language::Pt)).await.unwrap();
        repo.create(new_city("Bogota", Language::Es)).await.unwrap();

        let filter = CityFilter {
            name: Some("salvador".to_string()),
            language: Some(Language::Es),
        };
        let page = repo.list(&PageRequest::default(), &filter).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "San Salvador");
    }
}
