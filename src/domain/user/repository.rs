use async_trait::async_trait;

use super::{NewUser, User, UserChanges};
use crate::domain::ListQuery;
use crate::shared::{DomainResult, Page};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self, query: &ListQuery) -> DomainResult<Page<User>>;
    async fn count(&self) -> DomainResult<u64>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    /// Look a user up by username or email.
    async fn find_by_login(&self, login: &str) -> DomainResult<Option<User>>;

    async fn create(&self, user: NewUser) -> DomainResult<User>;
    async fn update(&self, id: &str, changes: UserChanges) -> DomainResult<Option<User>>;
    async fn set_password(&self, id: &str, password_hash: &str) -> DomainResult<()>;
    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;
    async fn delete(&self, id: &str) -> DomainResult<()>;
}
