use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{contains_term, db_err, order_by, write_err};
use crate::domain::{
    DomainError, DomainResult, ListQuery, NewUser, Page, RoleRef, User, UserChanges,
    UserRepository,
};
use crate::infrastructure::database::entities::{role, user};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_role_exists(&self, role_id: &str) -> DomainResult<()> {
        let found = role::Entity::find_by_id(role_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!(
                "Role '{}' does not exist",
                role_id
            ))),
        }
    }

    async fn fetch(&self, id: &str) -> DomainResult<User> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::Internal(format!("User '{}' vanished after write", id)))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model, role: Option<role::Model>) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        full_name: model.full_name,
        role: role.map(|r| RoleRef {
            id: r.id,
            name: r.name,
        }),
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
        last_login_at: model.last_login_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<User>> {
        let mut select = user::Entity::find();

        if let Some(term) = query.search_term() {
            select = select.filter(
                Condition::any()
                    .add(contains_term(user::Column::Username, term))
                    .add(contains_term(user::Column::Email, term))
                    .add(contains_term(user::Column::FullName, term)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(db_err)?;

        let dir = query.direction();
        select = match query.sort_field() {
            Some("username") => order_by(select, user::Column::Username, dir),
            Some("email") => order_by(select, user::Column::Email, dir),
            Some("fullName" | "full_name") => order_by(select, user::Column::FullName, dir),
            Some("lastLoginAt" | "last_login_at") => {
                order_by(select, user::Column::LastLoginAt, dir)
            }
            Some("createdAt" | "created_at") => order_by(select, user::Column::CreatedAt, dir),
            _ => select.order_by_desc(user::Column::CreatedAt),
        };

        let rows = select
            .order_by_asc(user::Column::Id)
            .find_also_related(role::Entity)
            .offset(query.pagination.offset())
            .limit(query.pagination.limit())
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let items = rows
            .into_iter()
            .map(|(u, r)| user_model_to_domain(u, r))
            .collect();

        Ok(Page::new(items, total))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let row = user::Entity::find_by_id(id)
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(u, r)| user_model_to_domain(u, r)))
    }

    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>> {
        let row = user::Entity::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.eq(login))
                    .add(user::Column::Email.eq(login)),
            )
            .find_also_related(role::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(u, r)| user_model_to_domain(u, r)))
    }

    async fn create(&self, dto: NewUser) -> DomainResult<User> {
        if let Some(ref role_id) = dto.role_id {
            self.ensure_role_exists(role_id).await?;
        }

        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let new_user = user::ActiveModel {
            id: Set(id.clone()),
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            full_name: Set(dto.full_name),
            role_id: Set(dto.role_id),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        new_user
            .insert(&self.db)
            .await
            .map_err(|e| write_err("User", e))?;

        self.fetch(&id).await
    }

    async fn update(&self, id: &str, changes: UserChanges) -> DomainResult<Option<User>> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(full_name) = changes.full_name {
            active.full_name = Set(Some(full_name));
        }
        // Empty string clears the role.
        if let Some(role_id) = changes.role_id {
            if role_id.is_empty() {
                active.role_id = Set(None);
            } else {
                self.ensure_role_exists(&role_id).await?;
                active.role_id = Set(Some(role_id));
            }
        }
        if let Some(is_active) = changes.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        active
            .update(&self.db)
            .await
            .map_err(|e| write_err("User", e))?;

        self.find_by_id(id).await
    }

    async fn set_password(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLoginAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewRole, RoleRepository, SortOrder};
    use crate::infrastructure::database::repositories::role_repository::SeaOrmRoleRepository;
    use crate::infrastructure::database::repositories::test_support::test_db;
    use crate::shared::PaginationQuery;

    fn new_user(name: &str, role_id: Option<String>) -> NewUser {
        NewUser {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: "hash".to_string(),
            full_name: None,
            role_id,
        }
    }

    #[tokio::test]
    async fn create_loads_role_reference() {
        let db = test_db().await;
        let roles = SeaOrmRoleRepository::new(db.clone());
        let users = SeaOrmUserRepository::new(db);

        let role = roles
            .create(NewRole {
                name: "admin".into(),
                description: None,
            })
            .await
            .unwrap();

        let user = users.create(new_user("alice", Some(role.id.clone()))).await.unwrap();
        assert!(user.is_admin());
        assert_eq!(user.role.unwrap().id, role.id);
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let users = SeaOrmUserRepository::new(test_db().await);
        let err = users
            .create(new_user("bob", Some("missing".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let users = SeaOrmUserRepository::new(test_db().await);
        users.create(new_user("carol", None)).await.unwrap();

        let mut dup = new_user("carol", None);
        dup.email = "other@example.com".into();
        let err = users.create(dup).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn login_matches_username_or_email() {
        let users = SeaOrmUserRepository::new(test_db().await);
        let created = users.create(new_user("dave", None)).await.unwrap();

        let by_name = users.find_by_login("dave").await.unwrap().unwrap();
        let by_email = users.find_by_login("dave@example.com").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
        assert_eq!(by_email.id, created.id);
        assert!(users.find_by_login("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_searches_sorts_and_counts() {
        let users = SeaOrmUserRepository::new(test_db().await);
        for name in ["zed", "amy", "mike", "other"] {
            users.create(new_user(name, None)).await.unwrap();
        }

        let mut query = ListQuery::new(PaginationQuery::new(1, 2));
        query.search = Some("e".into());
        query.sort_by = Some("username".into());
        query.sort_order = Some(SortOrder::Desc);

        // Every email contains "e", so all four match.
        let page = users.list(&query).await.unwrap();
        assert_eq!(page.total, 4);
        let names: Vec<_> = page.rows.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["zed", "other"]);
    }

    #[tokio::test]
    async fn update_can_clear_role() {
        let db = test_db().await;
        let roles = SeaOrmRoleRepository::new(db.clone());
        let users = SeaOrmUserRepository::new(db);
        let role = roles
            .create(NewRole {
                name: "clerk".into(),
                description: None,
            })
            .await
            .unwrap();
        let user = users.create(new_user("erin", Some(role.id))).await.unwrap();

        let updated = users
            .update(
                &user.id,
                UserChanges {
                    role_id: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.role.is_none());

        assert!(users
            .update("missing", UserChanges::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_missing_user_is_not_found() {
        let users = SeaOrmUserRepository::new(test_db().await);
        let err = users.delete("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }
}
