//! Identity module — user management & authentication
//!
//! Contains the `UserService` which orchestrates all user-related
//! use-cases: login, logout, password changes, user administration and
//! the startup admin bootstrap.

pub mod service;

pub use service::{AuthResult, NewAccount, UserService};
