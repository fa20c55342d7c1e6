//! Module repository

use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Condition;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};

use super::paginator::{paginate, ListSpec};
use crate::infrastructure::database::entities::module::{self, ModuleStatus};
use crate::infrastructure::database::entities::{guide, question};
use crate::shared::{DomainError, DomainResult, PageRequest, Paginated};

/// API-level sort field whitelist for modules.
pub const SORTABLE_FIELDS: &[&str] =
    &["id", "name", "order", "points", "createdAt", "updatedAt"];

/// Per-field filters accepted by the module list endpoint.
#[derive(Debug, Default)]
pub struct ModuleFilter {
    pub status: Option<ModuleStatus>,
    pub guide_id: Option<i32>,
    pub min_points: Option<i32>,
    pub max_points: Option<i32>,
}

impl ListSpec for ModuleFilter {
    type Entity = module::Entity;

    fn filter_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(status) = self.status {
            cond = cond.add(module::Column::Status.eq(status));
        }
        if let Some(guide_id) = self.guide_id {
            cond = cond.add(module::Column::GuideId.eq(guide_id));
        }
        if let Some(min) = self.min_points {
            cond = cond.add(module::Column::Points.gte(min));
        }
        if let Some(max) = self.max_points {
            cond = cond.add(module::Column::Points.lte(max));
        }
        cond
    }

    fn search_columns() -> Vec<module::Column> {
        vec![module::Column::Name, module::Column::Description]
    }

    fn sort_column(name: &str) -> Option<module::Column> {
        match name {
            "id" => Some(module::Column::Id),
            "name" => Some(module::Column::Name),
            "order" => Some(module::Column::Order),
            "points" => Some(module::Column::Points),
            "createdAt" => Some(module::Column::CreatedAt),
            "updatedAt" => Some(module::Column::UpdatedAt),
            _ => None,
        }
    }

    fn default_sort_column() -> module::Column {
        module::Column::CreatedAt
    }

    fn deleted_at_column() -> module::Column {
        module::Column::DeletedAt
    }
}

/// Input for creating a module.
#[derive(Debug)]
pub struct NewModule {
    pub name: String,
    pub description: String,
    pub order: i32,
    pub points: i32,
    pub status: Option<ModuleStatus>,
    pub guide_id: i32,
}

/// Partial update for a module.
#[derive(Debug, Default)]
pub struct UpdateModule {
    pub name: Option<String>,
    pub description: Option<String>,
    pub order: Option<i32>,
    pub points: Option<i32>,
    pub status: Option<ModuleStatus>,
    pub guide_id: Option<i32>,
}

pub struct ModuleRepository {
    db: DatabaseConnection,
}

impl ModuleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        req: &PageRequest,
        filter: &ModuleFilter,
    ) -> DomainResult<Paginated<module::Model>> {
        paginate(&self.db, filter, req).await
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<module::Model>> {
        let model = module::Entity::find_by_id(id)
            .filter(module::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// Parent guide must exist (and not be soft-deleted).
    async fn require_guide(&self, guide_id: i32) -> DomainResult<()> {
        let guide = guide::Entity::find_by_id(guide_id)
            .filter(guide::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        if guide.is_none() {
            return Err(DomainError::not_found("Guide", guide_id));
        }
        Ok(())
    }

    pub async fn create(&self, new: NewModule) -> DomainResult<module::Model> {
        debug!("Creating module: {} (guide {})", new.name, new.guide_id);
        self.require_guide(new.guide_id).await?;

        let now = Utc::now();
        let model = module::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            description: Set(new.description),
            order: Set(new.order),
            points: Set(new.points),
            status: Set(new.status.unwrap_or_default()),
            guide_id: Set(new.guide_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, changes: UpdateModule) -> DomainResult<module::Model> {
        debug!("Updating module: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Module", id))?;

        if let Some(guide_id) = changes.guide_id {
            self.require_guide(guide_id).await?;
        }

        let mut active: module::ActiveModel = existing.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(description);
        }
        if let Some(order) = changes.order {
            active.order = Set(order);
        }
        if let Some(points) = changes.points {
            active.points = Set(points);
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        if let Some(guide_id) = changes.guide_id {
            active.guide_id = Set(guide_id);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn soft_delete(&self, id: i32) -> DomainResult<()> {
        debug!("Soft-deleting module: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Module", id))?;

        let mut active: module::ActiveModel = existing.into();
        active.deleted_at = Set(Some(Utc::now()));
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    /// Questions contained in one module, in display order of creation.
    pub async fn questions(&self, module_id: i32) -> DomainResult<Vec<question::Model>> {
        let models = question::Entity::find()
            .filter(question::Column::ModuleId.eq(module_id))
            .filter(question::Column::DeletedAt.is_null())
            .all(&self.db)
            .await?;
        Ok(models)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::entities::guide::{GuideDifficulty, GuideStatus};
    use crate::infrastructure::database::entities::Language;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::guide_repository::{
        GuideRepository, NewGuide,
    };
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> (ModuleRepository, i32) {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");

        let guides = GuideRepository::new(db.clone());
        let guide = guides
            .create(NewGuide {
                name: "Parent guide".to_string(),
                description: "Parent".to_string(),
                difficulty: GuideDifficulty::Beginner,
                estimated_duration: 30,
                status: Some(GuideStatus::Published),
                language: Language::En,
                points: 100,
            })
            .await
            .unwrap();

        (ModuleRepository::new(db), guide.id)
    }

    fn new_module(name: &str, guide_id: i32, points: i32) -> NewModule {
        NewModule {
            name: name.to_string(),
            description: format!("{name} description"),
            order: 1,
            points,
            status: Some(ModuleStatus::Published),
            guide_id,
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_parent_guide() {
        let (repo, _guide_id) = setup().await;
        let err = repo.create(new_module("Orphan", 9999, 10)).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "Guide", .. }
        ));
    }

    #[tokio::test]
    async fn guide_id_filter_scopes_the_list() {
        let (repo, guide_id) = setup().await;
        repo.create(new_module("In guide", guide_id, 10))
            .await
            .unwrap();

        let filter = ModuleFilter {
            guide_id: Some(guide_id),
            ..Default::default()
        };
        let page = repo
            .list(&PageRequest::default(), &filter)
            .await
            .unwrap();
        assert_eq!(page.meta.pagination.total, 1);

        let other = ModuleFilter {
            guide_id: Some(guide_id + 1),
            ..Default::default()
        };
        let page = repo.list(&PageRequest::default(), &other).await.unwrap();
        assert_eq!(page.meta.pagination.total, 0);
    }

    #[tokio::test]
    async fn points_range_and_status_combine_as_and() {
        let (repo, guide_id) = setup().await;
        repo.create(new_module("Low", guide_id, 10)).await.unwrap();
        repo.create(new_module("Mid", guide_id, 60)).await.unwrap();
        let mut draft = new_module("Mid draft", guide_id, 60);
        draft.status = Some(ModuleStatus::Draft);
        repo.create(draft).await.unwrap();

        let filter = ModuleFilter {
            status: Some(ModuleStatus::Published),
            min_points: Some(50),
            max_points: Some(100),
            ..Default::default()
        };
        let page = repo
            .list(&PageRequest::default(), &filter)
            .await
            .unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].name, "Mid");
    }
}
