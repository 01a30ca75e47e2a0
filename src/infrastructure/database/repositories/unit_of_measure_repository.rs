use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{contains_term, db_err, order_by, write_err};
use crate::domain::{
    DomainError, DomainResult, ListQuery, NewUnitOfMeasure, Page, UnitOfMeasure,
    UnitOfMeasureChanges, UnitOfMeasureRepository,
};
use crate::infrastructure::database::entities::{material, unit_of_measure};

pub struct SeaOrmUnitOfMeasureRepository {
    db: DatabaseConnection,
}

impl SeaOrmUnitOfMeasureRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn unit_model_to_domain(model: unit_of_measure::Model) -> UnitOfMeasure {
    UnitOfMeasure {
        id: model.id,
        code: model.code,
        name: model.name,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl UnitOfMeasureRepository for SeaOrmUnitOfMeasureRepository {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<UnitOfMeasure>> {
        let mut select = unit_of_measure::Entity::find();

        if let Some(term) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(contains_term(unit_of_measure::Column::Code, term))
                    .add(contains_term(unit_of_measure::Column::Name, term)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let dir = query.direction();
        select = match query.sort_field() {
            Some("code") => order_by(select, unit_of_measure::Column::Code, dir),
            Some("name") => order_by(select, unit_of_measure::Column::Name, dir),
            Some("createdAt" | "created_at") => {
                order_by(select, unit_of_measure::Column::CreatedAt, dir)
            }
            _ => select.order_by_desc(unit_of_measure::Column::CreatedAt),
        };

        let models = select
            .order_by_asc(unit_of_measure::Column::Id)
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(
            models.into_iter().map(unit_model_to_domain).collect(),
            total,
        ))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<UnitOfMeasure>> {
        let model = unit_of_measure::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(unit_model_to_domain))
    }

    async fn create(&self, dto: NewUnitOfMeasure) -> DomainResult<UnitOfMeasure> {
        let now = Utc::now();
        let model = unit_of_measure::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            code: Set(dto.code),
            name: Set(dto.name),
            description: Set(dto.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_err("Unit of measure", e))?;

        Ok(unit_model_to_domain(model))
    }

    async fn update(
        &self,
        id: &str,
        changes: UnitOfMeasureChanges,
    ) -> DomainResult<Option<UnitOfMeasure>> {
        let existing = unit_of_measure::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: unit_of_measure::ActiveModel = existing.into();
        if let Some(code) = changes.code {
            active.code = Set(code);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now());

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| write_err("Unit of measure", e))?;
        Ok(Some(unit_model_to_domain(model)))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let in_use = material::Entity::find()
            .filter(material::Column::UnitOfMeasureId.eq(id))
            .count(&self.db)
            .await
            .map_err(db_err)?;

        if in_use > 0 {
            return Err(DomainError::Conflict(format!(
                "Unit of measure '{}' is used by {} material(s)",
                id, in_use
            )));
        }

        let result = unit_of_measure::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Unit of measure", id));
        }
        Ok(())
    }
}
