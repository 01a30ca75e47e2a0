use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{contains_term, db_err, order_by, write_err};
use crate::domain::{
    DomainError, DomainResult, ListQuery, Material, MaterialChanges, MaterialRepository,
    NewMaterial, Page, UnitRef,
};
use crate::infrastructure::database::entities::{material, unit_of_measure};

pub struct SeaOrmMaterialRepository {
    db: DatabaseConnection,
}

impl SeaOrmMaterialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_unit_exists(&self, unit_id: &str) -> DomainResult<()> {
        let found = unit_of_measure::Entity::find_by_id(unit_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!(
                "Unit of measure '{}' does not exist",
                unit_id
            ))),
        }
    }
}

fn material_model_to_domain(
    model: material::Model,
    unit: Option<unit_of_measure::Model>,
) -> DomainResult<Material> {
    // unit_of_measure_id is NOT NULL with a restricting FK
    let unit = unit.ok_or_else(|| {
        DomainError::Internal(format!(
            "Material '{}' references missing unit '{}'",
            model.id, model.unit_of_measure_id
        ))
    })?;

    Ok(Material {
        id: model.id,
        code: model.code,
        name: model.name,
        description: model.description,
        unit: UnitRef {
            id: unit.id,
            code: unit.code,
            name: unit.name,
        },
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

#[async_trait]
impl MaterialRepository for SeaOrmMaterialRepository {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<Material>> {
        let mut select = material::Entity::find();

        if let Some(term) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(contains_term(material::Column::Code, term))
                    .add(contains_term(material::Column::Name, term))
                    .add(contains_term(material::Column::Description, term)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let dir = query.direction();
        select = match query.sort_field() {
            Some("code") => order_by(select, material::Column::Code, dir),
            Some("name") => order_by(select, material::Column::Name, dir),
            Some("isActive" | "is_active") => order_by(select, material::Column::IsActive, dir),
            Some("createdAt" | "created_at") => {
                order_by(select, material::Column::CreatedAt, dir)
            }
            _ => select.order_by_desc(material::Column::CreatedAt),
        };

        let rows = select
            .order_by_asc(material::Column::Id)
            .find_also_related(unit_of_measure::Entity)
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = rows
            .into_iter()
            .map(|(m, u)| material_model_to_domain(m, u))
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Page::new(items, total))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Material>> {
        let row = material::Entity::find_by_id(id)
            .find_also_related(unit_of_measure::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        row.map(|(m, u)| material_model_to_domain(m, u)).transpose()
    }

    async fn create(&self, dto: NewMaterial) -> DomainResult<Material> {
        self.ensure_unit_exists(&dto.unit_of_measure_id).await?;

        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        material::ActiveModel {
            id: Set(id.clone()),
            code: Set(dto.code),
            name: Set(dto.name),
            description: Set(dto.description),
            unit_of_measure_id: Set(dto.unit_of_measure_id),
            is_active: Set(dto.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_err("Material", e))?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("Material '{}' vanished after write", id)))
    }

    async fn update(&self, id: &str, changes: MaterialChanges) -> DomainResult<Option<Material>> {
        let existing = material::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: material::ActiveModel = existing.into();
        if let Some(code) = changes.code {
            active.code = Set(code);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }
        if let Some(unit_id) = changes.unit_of_measure_id {
            self.ensure_unit_exists(&unit_id).await?;
            active.unit_of_measure_id = Set(unit_id);
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(&self.db)
            .await
            .map_err(|e| write_err("Material", e))?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = material::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Material", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUnitOfMeasure, SortOrder, UnitOfMeasureRepository};
    use crate::infrastructure::database::repositories::test_support::test_db;
    use crate::infrastructure::database::repositories::unit_of_measure_repository::SeaOrmUnitOfMeasureRepository;
    use crate::shared::PaginationQuery;

    async fn unit(db: &sea_orm::DatabaseConnection, code: &str) -> String {
        SeaOrmUnitOfMeasureRepository::new(db.clone())
            .create(NewUnitOfMeasure {
                code: code.into(),
                name: code.into(),
                description: None,
            })
            .await
            .unwrap()
            .id
    }

    fn new_material(code: &str, unit_id: &str) -> NewMaterial {
        NewMaterial {
            code: code.to_string(),
            name: format!("Material {}", code),
            description: None,
            unit_of_measure_id: unit_id.to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn unknown_unit_is_a_validation_error() {
        let repo = SeaOrmMaterialRepository::new(test_db().await);
        let err = repo.create(new_material("M1", "nope")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn create_embeds_unit() {
        let db = test_db().await;
        let kg = unit(&db, "kg").await;
        let repo = SeaOrmMaterialRepository::new(db);

        let created = repo.create(new_material("M1", &kg)).await.unwrap();
        assert_eq!(created.unit.code, "kg");
        assert_eq!(created.unit.id, kg);
    }

    #[tokio::test]
    async fn list_joins_units_and_paginates() {
        let db = test_db().await;
        let kg = unit(&db, "kg").await;
        let repo = SeaOrmMaterialRepository::new(db);
        for code in ["C", "A", "B"] {
            repo.create(new_material(code, &kg)).await.unwrap();
        }

        let mut query = ListQuery::new(PaginationQuery::new(1, 2));
        query.sort_by = Some("code".into());
        query.sort_order = Some(SortOrder::Asc);

        let page = repo.list(&query).await.unwrap();
        assert_eq!(page.total, 3);
        let codes: Vec<_> = page.rows.iter().map(|m| m.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert!(page.rows.iter().all(|m| m.unit.code == "kg"));
    }

    #[tokio::test]
    async fn update_switches_unit() {
        let db = test_db().await;
        let kg = unit(&db, "kg").await;
        let pcs = unit(&db, "pcs").await;
        let repo = SeaOrmMaterialRepository::new(db);
        let m = repo.create(new_material("BOLT", &kg)).await.unwrap();

        let updated = repo
            .update(
                &m.id,
                MaterialChanges {
                    unit_of_measure_id: Some(pcs.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.unit.id, pcs);

        let err = repo
            .update(
                &m.id,
                MaterialChanges {
                    unit_of_measure_id: Some("ghost".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
