//! Repository provider
//!
//! One accessor per aggregate so services and handlers depend on a single
//! `Arc<dyn RepositoryProvider>` instead of five repository handles.

use super::location::LocationRepository;
use super::material::MaterialRepository;
use super::role::RoleRepository;
use super::unit_of_measure::UnitOfMeasureRepository;
use super::user::UserRepository;

pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn roles(&self) -> &dyn RoleRepository;
    fn locations(&self) -> &dyn LocationRepository;
    fn materials(&self) -> &dyn MaterialRepository;
    fn units(&self) -> &dyn UnitOfMeasureRepository;
}
