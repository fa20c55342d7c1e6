//! SeaORM repositories, one per entity, plus the shared pagination engine.
//!
//! Repositories are stateless: each holds only a database connection handle
//! and is injected where needed (no process-wide singletons).

pub mod city_repository;
pub mod guide_repository;
pub mod module_repository;
pub mod paginator;
pub mod question_repository;
pub mod user_repository;

pub use city_repository::{CityFilter, CityRepository, NewCity, UpdateCity};
pub use guide_repository::{GuideFilter, GuideRepository, NewGuide, UpdateGuide};
pub use module_repository::{ModuleFilter, ModuleRepository, NewModule, UpdateModule};
pub use paginator::{contains_ci, paginate, ListSpec};
pub use question_repository::{NewQuestion, QuestionFilter, QuestionRepository, UpdateQuestion};
pub use user_repository::{NewUser, UpdateUser, UserFilter, UserRepository};
