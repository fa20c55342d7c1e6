//! Question repository

use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Condition;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set};

use super::paginator::{paginate, ListSpec};
use crate::infrastructure::database::entities::module;
use crate::infrastructure::database::entities::question::{
    self, BlockType, DynamicType, QuestionType,
};
use crate::shared::{DomainError, DomainResult, PageRequest, Paginated};

/// API-level sort field whitelist for questions.
pub const SORTABLE_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Per-field filters accepted by the question list endpoint.
#[derive(Debug, Default)]
pub struct QuestionFilter {
    pub block_type: Option<BlockType>,
    pub dynamic_type: Option<DynamicType>,
    pub question_type: Option<QuestionType>,
    pub module_id: Option<i32>,
}

impl ListSpec for QuestionFilter {
    type Entity = question::Entity;

    fn filter_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(block_type) = self.block_type {
            cond = cond.add(question::Column::BlockType.eq(block_type));
        }
        if let Some(dynamic_type) = self.dynamic_type {
            cond = cond.add(question::Column::DynamicType.eq(dynamic_type));
        }
        if let Some(question_type) = self.question_type {
            cond = cond.add(question::Column::QuestionType.eq(question_type));
        }
        if let Some(module_id) = self.module_id {
            cond = cond.add(question::Column::ModuleId.eq(module_id));
        }
        cond
    }

    fn search_columns() -> Vec<question::Column> {
        vec![
            question::Column::Statement,
            question::Column::Description,
            question::Column::Feedback,
        ]
    }

    fn sort_column(name: &str) -> Option<question::Column> {
        match name {
            "id" => Some(question::Column::Id),
            "createdAt" => Some(question::Column::CreatedAt),
            "updatedAt" => Some(question::Column::UpdatedAt),
            _ => None,
        }
    }

    fn default_sort_column() -> question::Column {
        question::Column::CreatedAt
    }

    fn deleted_at_column() -> question::Column {
        question::Column::DeletedAt
    }
}

/// Input for creating a question.
#[derive(Debug)]
pub struct NewQuestion {
    pub block_type: BlockType,
    pub statement: String,
    pub description: Option<String>,
    pub resource_url: Option<String>,
    pub dynamic_type: DynamicType,
    pub question_type: QuestionType,
    pub feedback: String,
    pub module_id: i32,
}

/// Partial update for a question.
#[derive(Debug, Default)]
pub struct UpdateQuestion {
    pub block_type: Option<BlockType>,
    pub statement: Option<String>,
    pub description: Option<String>,
    pub resource_url: Option<String>,
    pub dynamic_type: Option<DynamicType>,
    pub question_type: Option<QuestionType>,
    pub feedback: Option<String>,
    pub module_id: Option<i32>,
}

pub struct QuestionRepository {
    db: DatabaseConnection,
}

impl QuestionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        req: &PageRequest,
        filter: &QuestionFilter,
    ) -> DomainResult<Paginated<question::Model>> {
        paginate(&self.db, filter, req).await
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<question::Model>> {
        let model = question::Entity::find_by_id(id)
            .filter(question::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    /// Parent module must exist (and not be soft-deleted).
    async fn require_module(&self, module_id: i32) -> DomainResult<()> {
        let module = module::Entity::find_by_id(module_id)
            .filter(module::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        if module.is_none() {
            return Err(DomainError::not_found("Module", module_id));
        }
        Ok(())
    }

    pub async fn create(&self, new: NewQuestion) -> DomainResult<question::Model> {
        debug!("Creating question for module {}", new.module_id);
        self.require_module(new.module_id).await?;

        let now = Utc::now();
        let model = question::ActiveModel {
            id: NotSet,
            block_type: Set(new.block_type),
            statement: Set(new.statement),
            description: Set(new.description),
            resource_url: Set(new.resource_url),
            dynamic_type: Set(new.dynamic_type),
            question_type: Set(new.question_type),
            feedback: Set(new.feedback),
            module_id: Set(new.module_id),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, changes: UpdateQuestion) -> DomainResult<question::Model> {
        debug!("Updating question: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Question", id))?;

        if let Some(module_id) = changes.module_id {
            self.require_module(module_id).await?;
        }

        let mut active: question::ActiveModel = existing.into();
        if let Some(block_type) = changes.block_type {
            active.block_type = Set(block_type);
        }
        if let Some(statement) = changes.statement {
            active.statement = Set(statement);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(resource_url) = changes.resource_url {
            active.resource_url = Set(Some(resource_url));
        }
        if let Some(dynamic_type) = changes.dynamic_type {
            active.dynamic_type = Set(dynamic_type);
        }
        if let Some(question_type) = changes.question_type {
            active.question_type = Set(question_type);
        }
        if let Some(feedback) = changes.feedback {
            active.feedback = Set(feedback);
        }
        if let Some(module_id) = changes.module_id {
            active.module_id = Set(module_id);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn soft_delete(&self, id: i32) -> DomainResult<()> {
        debug!("Soft-deleting question: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Question", id))?;

        let mut active: question::ActiveModel = existing.into();
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
    use crate::infrastructure::database::entities::guide::{GuideDifficulty, GuideStatus};
    use crate::infrastructure::database::entities::module::ModuleStatus;
    use crate::infrastructure::database::entities::Language;
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::guide_repository::{
        GuideRepository, NewGuide,
    };
    use crate::infrastructure::database::repositories::module_repository::{
        ModuleRepository, NewModule,
    };
    use sea_orm_migration::MigratorTrait;

    async fn setup() -> (QuestionRepository, i32) {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");

        let guide = GuideRepository::new(db.clone())
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
        let module = ModuleRepository::new(db.clone())
            .create(NewModule {
                name: "Parent module".to_string(),
                description: "Parent".to_string(),
                order: 1,
                points: 50,
                status: Some(ModuleStatus::Published),
                guide_id: guide.id,
            })
            .await
            .unwrap();

        (QuestionRepository::new(db), module.id)
    }

    fn new_question(statement: &str, module_id: i32) -> NewQuestion {
        NewQuestion {
            block_type: BlockType::Text,
            statement: statement.to_string(),
            description: None,
            resource_url: None,
            dynamic_type: DynamicType::Static,
            question_type: QuestionType::MultipleChoice,
            feedback: "Well done".to_string(),
            module_id,
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_parent_module() {
        let (repo, _module_id) = setup().await;
        let err = repo
            .create(new_question("Orphan?", 9999))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "Module", .. }
        ));
    }

    #[tokio::test]
    async fn search_spans_statement_description_and_feedback() {
        let (repo, module_id) = setup().await;
        repo.create(new_question("What is recycling?", module_id))
            .await
            .unwrap();
        let mut q = new_question("Pick one", module_id);
        q.feedback = "Recycling reduces waste".to_string();
        repo.create(q).await.unwrap();
        repo.create(new_question("Unrelated", module_id))
            .await
            .unwrap();

        let req = PageRequest {
            search: Some("RECYCL".to_string()),
            ..Default::default()
        };
        let page = repo.list(&req, &QuestionFilter::default()).await.unwrap();
        assert_eq!(page.meta.pagination.total, 2);
    }

    #[tokio::test]
    async fn type_filters_combine_as_and() {
        let (repo, module_id) = setup().await;
        repo.create(new_question("MC static", module_id)).await.unwrap();
        let mut q = new_question("TF static", module_id);
        q.question_type = QuestionType::TrueFalse;
        repo.create(q).await.unwrap();

        let filter = QuestionFilter {
            dynamic_type: Some(DynamicType::Static),
            question_type: Some(QuestionType::TrueFalse),
            ..Default::default()
        };
        let page = repo.list(&PageRequest::default(), &filter).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].statement, "TF static");
    }
}
