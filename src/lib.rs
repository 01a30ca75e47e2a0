//! # ERP Service
//!
//! Backend for ERP master data: users, roles, locations, units of measure
//! and materials, served as a JSON REST API where every response shares one
//! envelope shape and every list is paginated the same way.
//!
//! ## Architecture
//!
//! - **shared**: response envelope, pagination, domain errors, shutdown
//! - **domain**: entities, list queries and repository traits
//! - **application**: authentication and user-management use cases
//! - **infrastructure**: SeaORM persistence, JWT and password hashing
//! - **interfaces**: axum REST API with Swagger documentation
//! - **config** / **server**: TOML configuration and process lifecycle

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiContext};
