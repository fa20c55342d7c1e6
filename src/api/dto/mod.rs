//! Request/response DTOs for the REST API.

pub mod city;
pub mod common;
pub mod guide;
pub mod module;
pub mod question;
pub mod user;

pub use common::{ApiError, ErrorResponse, ErrorsResponse, MessageResponse, QueryParser};
