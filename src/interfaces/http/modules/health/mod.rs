//! Health module — liveness plus a database ping

pub mod handlers;

pub use handlers::*;
