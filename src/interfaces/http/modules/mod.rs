//! Per-resource handler modules

use std::sync::Arc;

use crate::domain::RepositoryProvider;

pub mod auth;
pub mod health;
pub mod locations;
pub mod materials;
pub mod metrics;
pub mod request_id;
pub mod roles;
pub mod units;
pub mod users;

/// State for handlers that talk to repositories directly
#[derive(Clone)]
pub struct RepoState {
    pub repos: Arc<dyn RepositoryProvider>,
}
