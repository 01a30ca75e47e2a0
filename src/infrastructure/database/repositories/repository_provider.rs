//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    LocationRepository, MaterialRepository, RepositoryProvider, RoleRepository,
    UnitOfMeasureRepository, UserRepository,
};

use super::location_repository::SeaOrmLocationRepository;
use super::material_repository::SeaOrmMaterialRepository;
use super::role_repository::SeaOrmRoleRepository;
use super::unit_of_measure_repository::SeaOrmUnitOfMeasureRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let page = repos.materials().list(&ListQuery::default()).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    roles: SeaOrmRoleRepository,
    locations: SeaOrmLocationRepository,
    materials: SeaOrmMaterialRepository,
    units: SeaOrmUnitOfMeasureRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            roles: SeaOrmRoleRepository::new(db.clone()),
            locations: SeaOrmLocationRepository::new(db.clone()),
            materials: SeaOrmMaterialRepository::new(db.clone()),
            units: SeaOrmUnitOfMeasureRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn roles(&self) -> &dyn RoleRepository {
        &self.roles
    }

    fn locations(&self) -> &dyn LocationRepository {
        &self.locations
    }

    fn materials(&self) -> &dyn MaterialRepository {
        &self.materials
    }

    fn units(&self) -> &dyn UnitOfMeasureRepository {
        &self.units
    }
}
