//! Locations module — warehouses, plants and other sites

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
