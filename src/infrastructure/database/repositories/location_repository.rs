use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{contains_term, db_err, order_by, write_err};
use crate::domain::{
    DomainError, DomainResult, ListQuery, Location, LocationChanges, LocationRepository,
    NewLocation, Page,
};
use crate::infrastructure::database::entities::location;

pub struct SeaOrmLocationRepository {
    db: DatabaseConnection,
}

impl SeaOrmLocationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn location_model_to_domain(model: location::Model) -> Location {
    Location {
        id: model.id,
        code: model.code,
        name: model.name,
        address: model.address,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl LocationRepository for SeaOrmLocationRepository {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<Location>> {
        let mut select = location::Entity::find();

        if let Some(term) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(contains_term(location::Column::Code, term))
                    .add(contains_term(location::Column::Name, term))
                    .add(contains_term(location::Column::Address, term)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let dir = query.direction();
        select = match query.sort_field() {
            Some("code") => order_by(select, location::Column::Code, dir),
            Some("name") => order_by(select, location::Column::Name, dir),
            Some("isActive" | "is_active") => order_by(select, location::Column::IsActive, dir),
            Some("createdAt" | "created_at") => {
                order_by(select, location::Column::CreatedAt, dir)
            }
            _ => select.order_by_desc(location::Column::CreatedAt),
        };

        let models = select
            .order_by_asc(location::Column::Id)
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(
            models.into_iter().map(location_model_to_domain).collect(),
            total,
        ))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Location>> {
        let model = location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(location_model_to_domain))
    }

    async fn create(&self, dto: NewLocation) -> DomainResult<Location> {
        let now = Utc::now();
        let model = location::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            code: Set(dto.code),
            name: Set(dto.name),
            address: Set(dto.address),
            is_active: Set(dto.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_err("Location", e))?;

        Ok(location_model_to_domain(model))
    }

    async fn update(&self, id: &str, changes: LocationChanges) -> DomainResult<Option<Location>> {
        let existing = location::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: location::ActiveModel = existing.into();
        if let Some(code) = changes.code {
            active.code = Set(code);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(address) = changes.address {
            active.address = Set(Some(address));
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_err("Location", e))?;
        Ok(Some(location_model_to_domain(model)))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = location::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Location", id));
        }
        Ok(())
    }
}
