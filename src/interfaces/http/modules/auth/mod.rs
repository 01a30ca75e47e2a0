//! Auth module — login, logout, current user, password change

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
