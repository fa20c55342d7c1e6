//! City entity

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::language::Language;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    /// Unique city ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// City name (unique across non-deleted rows)
    pub name: String,

    /// Description shown to learners
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Language of the city content
    pub language: Language,

    /// When the city was created
    pub created_at: DateTime<Utc>,

    /// When the city was last updated
    pub updated_at: DateTime<Utc>,

    /// Soft-deletion marker
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
