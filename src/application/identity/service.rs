//! User management service — application-layer orchestration
//!
//! All user-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::session::SharedTokenStore;
use crate::domain::{
    DomainError, DomainResult, ListQuery, NewRole, NewUser, Page, RepositoryProvider, Role, User,
    UserChanges,
};
use crate::infrastructure::crypto::jwt::{create_token, Claims, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

const MIN_PASSWORD_LEN: usize = 8;

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Account to create, with the password still in clear text
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub role_id: Option<String>,
}

/// User service — orchestrates all identity / user-management use-cases.
pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
    tokens: SharedTokenStore,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        tokens: SharedTokenStore,
        jwt_config: JwtConfig,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repos,
            tokens,
            jwt_config,
            bcrypt_cost,
        }
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate user by username/email + password and return a JWT.
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self.repos.users().find_by_login(username_or_email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let (token, _claims) =
            create_token(&user.id, &user.username, user.role_name(), &self.jwt_config)
                .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        if let Err(e) = self.repos.users().touch_last_login(&user.id).await {
            warn!(user_id = %user.id, error = %e, "Failed to record last login");
        }

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expires_in_seconds(),
            user,
        })
    }

    /// Revoke the presented token until it expires.
    pub fn logout(&self, claims: &Claims) {
        self.tokens.revoke(claims.jti.clone(), claims.expires_at());
        info!(user_id = %claims.sub, "User logged out");
    }

    /// Change a user's password. Verifies the current password first.
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if new_password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "New password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))?;

        let valid = verify_password(current_password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid current password".into()));
        }

        let new_hash = self.hash(new_password)?;
        self.repos.users().set_password(user_id, &new_hash).await?;

        info!(user_id, "Password changed");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_users(&self, query: &ListQuery) -> DomainResult<Page<User>> {
        self.repos.users().list(query).await
    }

    pub async fn get_user(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create_user(&self, account: NewAccount) -> DomainResult<User> {
        if account.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let password_hash = self.hash(&account.password)?;
        let user = self
            .repos
            .users()
            .create(NewUser {
                username: account.username,
                email: account.email,
                password_hash,
                full_name: account.full_name,
                role_id: account.role_id,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    pub async fn update_user(&self, id: &str, changes: UserChanges) -> DomainResult<User> {
        self.repos
            .users()
            .update(id, changes)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Delete a user. `actor_id` is the caller, who may not delete themselves.
    pub async fn delete_user(&self, actor_id: &str, id: &str) -> DomainResult<()> {
        if actor_id == id {
            return Err(DomainError::Conflict(
                "You cannot delete your own account".into(),
            ));
        }
        self.repos.users().delete(id).await?;
        info!(user_id = id, deleted_by = actor_id, "User deleted");
        Ok(())
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Make sure `role_name` exists and, on an empty user table, create the
    /// initial administrator. Returns the user when one was created.
    pub async fn bootstrap_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role_name: &str,
    ) -> DomainResult<Option<User>> {
        let role = self.ensure_role(role_name).await?;

        if self.repos.users().count().await? > 0 {
            return Ok(None);
        }

        let user = self
            .create_user(NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                full_name: Some("Administrator".to_string()),
                role_id: Some(role.id),
            })
            .await?;

        warn!(
            username = %user.username,
            "Default admin user created - change the password after first login"
        );
        Ok(Some(user))
    }

    async fn ensure_role(&self, name: &str) -> DomainResult<Role> {
        if let Some(role) = self.repos.roles().find_by_name(name).await? {
            return Ok(role);
        }

        let role = self
            .repos
            .roles()
            .create(NewRole {
                name: name.to_string(),
                description: Some("Full access to every resource".to_string()),
            })
            .await?;
        info!(role = %role.name, "Role created");
        Ok(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::create_token_store;
    use crate::infrastructure::crypto::jwt::verify_token;
    use crate::infrastructure::database::repositories::test_support::test_db;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            expiration_hours: 1,
            issuer: "erp-service".into(),
        }
    }

    async fn service() -> UserService {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(test_db().await));
        UserService::new(repos, create_token_store(), jwt_config(), crate::config::MIN_BCRYPT_COST)
    }

    async fn bootstrapped() -> (UserService, User) {
        let service = service().await;
        let admin = service
            .bootstrap_admin("admin", "admin@example.com", "admin-pass", "admin")
            .await
            .unwrap()
            .unwrap();
        (service, admin)
    }

    #[tokio::test]
    async fn bootstrap_runs_once() {
        let (service, admin) = bootstrapped().await;
        assert!(admin.is_admin());

        let again = service
            .bootstrap_admin("other", "other@example.com", "other-pass", "admin")
            .await
            .unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let (service, admin) = bootstrapped().await;

        let auth = service.login("admin@example.com", "admin-pass").await.unwrap();
        assert_eq!(auth.token_type, "Bearer");
        assert_eq!(auth.expires_in, 3600);

        let claims = verify_token(&auth.token, &jwt_config()).unwrap();
        assert_eq!(claims.sub, admin.id);
        assert!(claims.is_admin());

        let reloaded = service.get_user(&admin.id).await.unwrap();
        assert!(reloaded.last_login_at.is_some());
    }

    #[tokio::test]
    async fn login_rejects_bad_password_and_disabled_accounts() {
        let (service, admin) = bootstrapped().await;

        let err = service.login("admin", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        service
            .update_user(
                &admin.id,
                UserChanges {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let err = service.login("admin", "admin-pass").await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn change_password_requires_current_one() {
        let (service, admin) = bootstrapped().await;

        let err = service
            .change_password(&admin.id, "nope", "brand-new-pass")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        let err = service
            .change_password(&admin.id, "admin-pass", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        service
            .change_password(&admin.id, "admin-pass", "brand-new-pass")
            .await
            .unwrap();
        assert!(service.login("admin", "brand-new-pass").await.is_ok());
    }

    #[tokio::test]
    async fn logout_revokes_jti() {
        let (service, _) = bootstrapped().await;
        let auth = service.login("admin", "admin-pass").await.unwrap();
        let claims = verify_token(&auth.token, &jwt_config()).unwrap();

        service.logout(&claims);
        assert!(service.tokens.is_revoked(&claims.jti));
    }

    #[tokio::test]
    async fn admin_cannot_delete_self() {
        let (service, admin) = bootstrapped().await;
        let err = service.delete_user(&admin.id, &admin.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
