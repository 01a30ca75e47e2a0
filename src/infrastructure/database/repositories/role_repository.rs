use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::{contains_term, db_err, order_by, write_err};
use crate::domain::{
    DomainError, DomainResult, ListQuery, NewRole, Page, Role, RoleChanges, RoleRepository,
};
use crate::infrastructure::database::entities::{role, user};

pub struct SeaOrmRoleRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl RoleRepository for SeaOrmRoleRepository {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<Role>> {
        let mut select = role::Entity::find();

        if let Some(term) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(contains_term(role::Column::Name, term))
                    .add(contains_term(role::Column::Description, term)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let dir = query.direction();
        select = match query.sort_field() {
            Some("name") => order_by(select, role::Column::Name, dir),
            Some("createdAt" | "created_at") => order_by(select, role::Column::CreatedAt, dir),
            _ => select.order_by_desc(role::Column::CreatedAt),
        };

        let models = select
            .order_by_asc(role::Column::Id)
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(Page::new(
            models.into_iter().map(role_model_to_domain).collect(),
            total,
        ))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(role_model_to_domain))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Role>> {
        let model = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(role_model_to_domain))
    }

    async fn create(&self, dto: NewRole) -> DomainResult<Role> {
        let now = Utc::now();
        let model = role::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(dto.name),
            description: Set(dto.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_err("Role", e))?;

        Ok(role_model_to_domain(model))
    }

    async fn update(&self, id: &str, changes: RoleChanges) -> DomainResult<Option<Role>> {
        let existing = role::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: role::ActiveModel = existing.into();
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
            .map_err(|e| write_err("Role", e))?;
        Ok(Some(role_model_to_domain(model)))
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        // Detach holders explicitly; SQLite only enforces ON DELETE with
        // foreign_keys enabled.
        user::Entity::update_many()
            .col_expr(user::Column::RoleId, Expr::value(Option::<String>::None))
            .filter(user::Column::RoleId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = role::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Role", id));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewUser, UserRepository};
    use crate::infrastructure::database::repositories::test_support::test_db;
    use crate::infrastructure::database::repositories::user_repository::SeaOrmUserRepository;

    fn new_role(name: &str) -> NewRole {
        NewRole {
            name: name.to_string(),
            description: Some(format!("{} role", name)),
        }
    }

    #[tokio::test]
    async fn duplicate_name_conflicts() {
        let roles = SeaOrmRoleRepository::new(test_db().await);
        roles.create(new_role("buyer")).await.unwrap();
        let err = roles.create(new_role("buyer")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn find_by_name_and_update() {
        let roles = SeaOrmRoleRepository::new(test_db().await);
        let created = roles.create(new_role("planner")).await.unwrap();

        let found = roles.find_by_name("planner").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        let updated = roles
            .update(
                &created.id,
                RoleChanges {
                    name: Some("scheduler".into()),
                    description: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "scheduler");
        assert_eq!(updated.description.as_deref(), Some("planner role"));
    }

    #[tokio::test]
    async fn delete_detaches_users() {
        let db = test_db().await;
        let roles = SeaOrmRoleRepository::new(db.clone());
        let users = SeaOrmUserRepository::new(db);

        let role = roles.create(new_role("temp")).await.unwrap();
        let user = users
            .create(NewUser {
                username: "frank".into(),
                email: "frank@example.com".into(),
                password_hash: "hash".into(),
                full_name: None,
                role_id: Some(role.id.clone()),
            })
            .await
            .unwrap();

        roles.delete(&role.id).await.unwrap();

        let reloaded = users.find_by_id(&user.id).await.unwrap().unwrap();
        assert!(reloaded.role.is_none());
        assert!(matches!(
            roles.delete(&role.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }
}
