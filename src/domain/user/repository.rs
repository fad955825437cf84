use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self) -> DomainResult<Vec<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;

    async fn update_last_login(&self, id: &str) -> DomainResult<()>;
    async fn update_user_password(&self, id: &str, new_password_hash: &str) -> DomainResult<()>;

    /// Delete a user. Fails with `NotFound` when the id does not exist.
    /// The admin-protection rule lives in the identity service, not here.
    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
