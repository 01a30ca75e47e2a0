//! HTTP REST API interfaces
//!
//! - `common`: envelope responses, `ApiError`, extractors
//! - `middleware`: JWT authentication and admin gate
//! - `modules`: request handlers and DTOs per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiContext, ApiDoc};
