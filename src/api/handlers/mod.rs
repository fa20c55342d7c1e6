//! REST API handlers, one module per resource.

pub mod cities;
pub mod guides;
pub mod health;
pub mod modules;
pub mod questions;
pub mod users;

use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::infrastructure::database::repositories::{
    CityRepository, GuideRepository, ModuleRepository, QuestionRepository, UserRepository,
};

/// Shared handler state: one repository per resource, all over the same
/// connection pool.
#[derive(Clone)]
pub struct AppState {
    pub cities: Arc<CityRepository>,
    pub guides: Arc<GuideRepository>,
    pub modules: Arc<ModuleRepository>,
    pub questions: Arc<QuestionRepository>,
    pub users: Arc<UserRepository>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cities: Arc::new(CityRepository::new(db.clone())),
            guides: Arc::new(GuideRepository::new(db.clone())),
            modules: Arc::new(ModuleRepository::new(db.clone())),
            questions: Arc::new(QuestionRepository::new(db.clone())),
            users: Arc::new(UserRepository::new(db)),
            started_at: Instant::now(),
        }
    }
}
