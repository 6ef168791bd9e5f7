use async_trait::async_trait;

use super::{Role, User};
use crate::shared::{DomainResult, PaginatedResult, PaginationParams};

/// Persistence contract for users and roles.
///
/// Lookups of a missing user return `DomainError::NotFound` rather than `None`.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn get_roles(&self) -> DomainResult<Vec<Role>>;

    async fn get_user(&self, id: i64) -> DomainResult<User>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<User>;
    async fn get_users(&self, params: &PaginationParams) -> DomainResult<PaginatedResult<User>>;

    /// Store `user` under `id` and return the stored record.
    async fn update_user(&self, id: i64, user: User) -> DomainResult<User>;
    /// Insert `user`, ignoring its id, and return it with the assigned one.
    async fn add_user(&self, user: User) -> DomainResult<User>;
    /// Delete and return the last stored state.
    async fn remove_user(&self, id: i64) -> DomainResult<User>;
    /// Mark inactive and return the new state.
    async fn invalidate_user(&self, id: i64) -> DomainResult<User>;
}
