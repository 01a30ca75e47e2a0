//! User aggregate
//!
//! Contains the User entity, write DTOs, and repository interface.

pub mod model;
pub mod repository;

pub use model::{NewUser, RoleRef, User, UserChanges, ADMIN_ROLE};
pub use repository::UserRepository;
