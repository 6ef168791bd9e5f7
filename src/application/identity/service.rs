//! User management service — application-layer orchestration
//!
//! HTTP handlers are thin wrappers that delegate here. Every operation is a
//! single fetch/mutate/persist step against the repository, and every result
//! is mapped to a response shape before it leaves the service.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::dto::{RoleResponse, UserResponse};
use super::error::{ServiceError, ServiceResult};
use crate::domain::{DomainError, EditUserData, NewUserData, User, UserRepositoryInterface};
use crate::infrastructure::crypto::hash_passphrase;
use crate::shared::{PaginatedResult, PaginationParams};

/// User service — orchestrates the user-management use-cases.
///
/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer; `R` may be `dyn UserRepositoryInterface`.
pub struct UserService<R: UserRepositoryInterface + ?Sized> {
    repo: Arc<R>,
}

impl<R: UserRepositoryInterface + ?Sized> UserService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// All roles as a single page.
    pub async fn list_roles(&self) -> ServiceResult<PaginatedResult<RoleResponse>> {
        let roles = self
            .repo
            .get_roles()
            .await
            .map_err(storage_failure("list_roles"))?;

        Ok(PaginatedResult::single_page(roles).map(RoleResponse::from))
    }

    pub async fn get_user(&self, id: i64) -> ServiceResult<UserResponse> {
        debug!(user_id = id, "Fetching user");
        let user = self
            .repo
            .get_user(id)
            .await
            .map_err(storage_failure("get_user"))?;

        Ok(UserResponse::from(user))
    }

    pub async fn get_user_by_username(&self, username: &str) -> ServiceResult<UserResponse> {
        debug!(username, "Fetching user by username");
        let user = self
            .repo
            .get_user_by_username(username)
            .await
            .map_err(storage_failure("get_user_by_username"))?;

        Ok(UserResponse::from(user))
    }

    /// One page of users, in repository order.
    pub async fn list_users(
        &self,
        params: &PaginationParams,
    ) -> ServiceResult<PaginatedResult<UserResponse>> {
        let page = self
            .repo
            .get_users(params)
            .await
            .map_err(storage_failure("list_users"))?;

        Ok(page.map(UserResponse::from))
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Apply a partial update. Absent fields keep their stored value; a new
    /// passphrase is hashed before it is stored. An empty edit returns the
    /// stored record without writing.
    pub async fn update_user(&self, id: i64, edit: EditUserData) -> ServiceResult<UserResponse> {
        let mut user = self
            .repo
            .get_user(id)
            .await
            .map_err(storage_failure("update_user"))?;

        if edit.is_empty() {
            debug!(user_id = id, "Empty edit, nothing to persist");
            return Ok(UserResponse::from(user));
        }
        apply_edit(&mut user, edit);

        let updated = self
            .repo
            .update_user(id, user)
            .await
            .map_err(storage_failure("update_user"))?;

        info!(user_id = updated.id, username = %updated.username, "User updated");
        Ok(UserResponse::from(updated))
    }

    /// Hash the passphrase and hand an unsaved record to the repository.
    pub async fn create_user(&self, data: NewUserData) -> ServiceResult<UserResponse> {
        let passphrase_hash = hash_passphrase(&data.passphrase);
        let user = User::unsaved(data, passphrase_hash);

        let created = self
            .repo
            .add_user(user)
            .await
            .map_err(storage_failure("create_user"))?;

        info!(user_id = created.id, username = %created.username, "User created");
        Ok(UserResponse::from(created))
    }

    /// Delete a user and return its last stored state.
    pub async fn delete_user(&self, id: i64) -> ServiceResult<UserResponse> {
        let removed = self
            .repo
            .remove_user(id)
            .await
            .map_err(storage_failure("delete_user"))?;

        info!(user_id = id, "User deleted");
        Ok(UserResponse::from(removed))
    }

    /// Invalidate a user; what that means is up to the repository.
    pub async fn invalidate_user(&self, id: i64) -> ServiceResult<UserResponse> {
        let invalidated = self
            .repo
            .invalidate_user(id)
            .await
            .map_err(storage_failure("invalidate_user"))?;

        info!(user_id = id, "User invalidated");
        Ok(UserResponse::from(invalidated))
    }
}

// ── Helpers ─────────────────────────────────────────────────────

fn apply_edit(user: &mut User, edit: EditUserData) {
    if let Some(username) = edit.username {
        user.username = username;
    }
    if let Some(passphrase) = edit.passphrase {
        user.passphrase = hash_passphrase(&passphrase);
    }
    if let Some(first_name) = edit.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = edit.last_name {
        user.last_name = last_name;
    }
    if let Some(email) = edit.email {
        user.email = email;
    }
    if let Some(role) = edit.role {
        user.role = role;
    }
}

fn storage_failure(operation: &'static str) -> impl FnOnce(DomainError) -> ServiceError {
    move |e| {
        warn!(operation, error = %e, "Repository call failed");
        ServiceError::from(e)
    }
}
