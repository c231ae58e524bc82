use async_trait::async_trait;

use super::User;
use crate::shared::{DomainError, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Insert or replace the whole user row.
    async fn save(&self, user: &User) -> Result<(), DomainError>;
}
