//! Database entities module

pub mod location;
pub mod material;
pub mod role;
pub mod unit_of_measure;
pub mod user;

pub use location::Entity as Location;
pub use material::Entity as Material;
pub use role::Entity as Role;
pub use unit_of_measure::Entity as UnitOfMeasure;
pub use user::Entity as User;
