//! Materials module — material master data

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
