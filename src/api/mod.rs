//! REST API: router, handlers and DTOs.

pub mod common;
pub mod dto;
pub mod handlers;
pub mod router;

pub use router::{create_api_router, ApiDoc};
