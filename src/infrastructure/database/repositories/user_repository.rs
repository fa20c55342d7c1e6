//! User repository

use chrono::Utc;
use log::debug;
use sea_orm::sea_query::Condition;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait, QueryFilter, Set};

use super::paginator::{contains_ci, paginate, ListSpec};
use crate::infrastructure::database::entities::user::{self, UserRole};
use crate::shared::{DomainError, DomainResult, PageRequest, Paginated};

/// API-level sort field whitelist for users.
pub const SORTABLE_FIELDS: &[&str] = &["id", "name", "email", "role", "createdAt", "updatedAt"];

/// Per-field filters accepted by the user list endpoint.
#[derive(Debug, Default)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

impl ListSpec for UserFilter {
    type Entity = user::Entity;

    fn filter_condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(name) = &self.name {
            cond = cond.add(contains_ci(user::Column::Name, name));
        }
        if let Some(email) = &self.email {
            cond = cond.add(contains_ci(user::Column::Email, email));
        }
        if let Some(role) = self.role {
            cond = cond.add(user::Column::Role.eq(role));
        }
        cond
    }

    fn search_columns() -> Vec<user::Column> {
        vec![user::Column::Name, user::Column::Email]
    }

    fn sort_column(name: &str) -> Option<user::Column> {
        match name {
            "id" => Some(user::Column::Id),
            "name" => Some(user::Column::Name),
            "email" => Some(user::Column::Email),
            "role" => Some(user::Column::Role),
            "createdAt" => Some(user::Column::CreatedAt),
            "updatedAt" => Some(user::Column::UpdatedAt),
            _ => None,
        }
    }

    fn default_sort_column() -> user::Column {
        user::Column::CreatedAt
    }

    fn deleted_at_column() -> user::Column {
        user::Column::DeletedAt
    }
}

/// Input for creating a user.
#[derive(Debug)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: Option<UserRole>,
}

/// Partial update for a user.
#[derive(Debug, Default)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        req: &PageRequest,
        filter: &UserFilter,
    ) -> DomainResult<Paginated<user::Model>> {
        paginate(&self.db, filter, req).await
    }

    pub async fn find_by_id(&self, id: i32) -> DomainResult<Option<user::Model>> {
        let model = user::Entity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;
        Ok(model)
    }

    pub async fn count(&self) -> DomainResult<u64> {
        let total = user::Entity::find()
            .filter(user::Column::DeletedAt.is_null())
            .count(&self.db)
            .await?;
        Ok(total)
    }

    /// Emails are unique among live rows. `exclude_id` skips the row being
    /// updated so a user can keep their own email.
    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> DomainResult<bool> {
        let mut query = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::DeletedAt.is_null());
        if let Some(id) = exclude_id {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.one(&self.db).await?.is_some())
    }

    pub async fn create(&self, new: NewUser) -> DomainResult<user::Model> {
        debug!("Creating user: {}", new.email);

        if self.email_taken(&new.email, None).await? {
            return Err(DomainError::Conflict("Email already exists".to_string()));
        }

        let now = Utc::now();
        let model = user::ActiveModel {
            id: NotSet,
            email: Set(new.email),
            name: Set(new.name),
            role: Set(new.role.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        };
        Ok(model.insert(&self.db).await?)
    }

    pub async fn update(&self, id: i32, changes: UpdateUser) -> DomainResult<user::Model> {
        debug!("Updating user: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        if let Some(email) = &changes.email {
            if self.email_taken(email, Some(id)).await? {
                return Err(DomainError::Conflict("Email already exists".to_string()));
            }
        }

        let mut active: user::ActiveModel = existing.into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        active.updated_at = Set(Utc::now());

        Ok(active.update(&self.db).await?)
    }

    pub async fn soft_delete(&self, id: i32) -> DomainResult<()> {
        debug!("Soft-deleting user: {}", id);

        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let mut active: user::ActiveModel = existing.into();
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

    async fn setup() -> UserRepository {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        UserRepository::new(db)
    }

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: name.to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = setup().await;
        repo.create(new_user("ana@example.com", "Ana")).await.unwrap();

        let err = repo
            .create(new_user("ana@example.com", "Other Ana"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn soft_deleted_email_can_be_reused() {
        let repo = setup().await;
        let user = repo.create(new_user("gone@example.com", "Gus")).await.unwrap();
        repo.soft_delete(user.id).await.unwrap();

        repo.create(new_user("gone@example.com", "New Gus"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_rejects_another_users_email() {
        let repo = setup().await;
        repo.create(new_user("ha@example.com", "Hana")).await.unwrap();
        let user = repo.create(new_user("ivo@example.com", "Ivo")).await.unwrap();

        let err = repo
            .update(
                user.id,
                UpdateUser {
                    email: Some("ha@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn role_defaults_to_citizen() {
        let repo = setup().await;
        let user = repo.create(new_user("bo@example.com", "Bo")).await.unwrap();
        assert_eq!(user.role, UserRole::Citizen);
    }

    #[tokio::test]
    async fn search_matches_name_or_email() {
        let repo = setup().await;
        repo.create(new_user("carla@example.com", "Carla"))
            .await
            .unwrap();
        repo.create(new_user("dev@carlton.io", "Dee")).await.unwrap();
        repo.create(new_user("eve@example.com", "Eve")).await.unwrap();

        let req = PageRequest {
            search: Some("carl".to_string()),
            ..Default::default()
        };
        let page = repo.list(&req, &UserFilter::default()).await.unwrap();
        assert_eq!(page.meta.pagination.total, 2);
    }

    #[tokio::test]
    async fn role_filter_matches_exactly() {
        let repo = setup().await;
        repo.create(NewUser {
            email: "mod@example.com".to_string(),
            name: "Mo".to_string(),
            role: Some(UserRole::Moderator),
        })
        .await
        .unwrap();
        repo.create(new_user("plain@example.com", "Pia")).await.unwrap();

        let filter = UserFilter {
            role: Some(UserRole::Moderator),
            ..Default::default()
        };
        let page = repo.list(&PageRequest::default(), &filter).await.unwrap();
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].email, "mod@example.com");
    }
}
