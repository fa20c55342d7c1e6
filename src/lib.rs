//! # EduGuides Content Service
//!
//! CRUD backend for an educational platform: cities, users and the
//! Guide → Module → Question content hierarchy, with a shared
//! pagination/filtering/sorting engine behind every list endpoint.
//!
//! ## Architecture
//!
//! - **api**: REST API (Axum) with Swagger documentation
//! - **infrastructure**: SeaORM entities, migrations and repositories
//! - **shared**: Pagination types, domain errors and small utilities
//! - **config**: TOML file configuration

pub mod api;
pub mod config;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig};

// Re-export API router
pub use api::create_api_router;
