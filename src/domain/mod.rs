//! Domain layer
//!
//! Entities, the list-query contract shared by every collection, and the
//! repository traits the infrastructure layer implements.

pub mod list_query;
pub mod location;
pub mod material;
pub mod repositories;
pub mod role;
pub mod unit_of_measure;
pub mod user;

pub use list_query::{ListQuery, SortOrder};
pub use location::{Location, LocationChanges, LocationRepository, NewLocation};
pub use material::{Material, MaterialChanges, MaterialRepository, NewMaterial, UnitRef};
pub use repositories::RepositoryProvider;
pub use role::{NewRole, Role, RoleChanges, RoleRepository};
pub use unit_of_measure::{
    NewUnitOfMeasure, UnitOfMeasure, UnitOfMeasureChanges, UnitOfMeasureRepository,
};
pub use user::{NewUser, RoleRef, User, UserChanges, UserRepository, ADMIN_ROLE};

pub use crate::shared::{DomainError, DomainResult, Page};
