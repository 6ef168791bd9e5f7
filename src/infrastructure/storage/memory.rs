//! In-memory user repository

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{
    DomainError, DomainResult, Role, User, UserRepositoryInterface, DEFAULT_ROLES,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// In-memory storage for development and testing
pub struct InMemoryUserRepository {
    users: DashMap<i64, User>,
    /// username -> id; a name is claimed here before the record is written
    usernames: DashMap<String, i64>,
    roles: Vec<Role>,
    user_counter: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        let roles = DEFAULT_ROLES
            .iter()
            .zip(1..)
            .map(|((name, description), id)| Role {
                id,
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect();

        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            roles,
            user_counter: AtomicI64::new(1),
        }
    }

    /// Atomically reserve `username` for `id`. Re-claiming a name the same
    /// id already holds succeeds.
    fn claim_username(&self, username: &str, id: i64) -> DomainResult<()> {
        match self.usernames.entry(username.to_string()) {
            Entry::Occupied(owner) if *owner.get() != id => Err(DomainError::Conflict(format!(
                "Username '{}' already exists",
                username
            ))),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    fn release_username(&self, username: &str, id: i64) {
        self.usernames.remove_if(username, |_, owner| *owner == id);
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn get_roles(&self) -> DomainResult<Vec<Role>> {
        Ok(self.roles.clone())
    }

    async fn get_user(&self, id: i64) -> DomainResult<User> {
        self.users
            .get(&id)
            .map(|u| u.clone())
            .ok_or_else(|| DomainError::user_not_found("id", id))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<User> {
        let id = self
            .usernames
            .get(username)
            .map(|owner| *owner)
            .ok_or_else(|| DomainError::user_not_found("username", username))?;

        self.users
            .get(&id)
            .map(|u| u.clone())
            .ok_or_else(|| DomainError::user_not_found("username", username))
    }

    async fn get_users(&self, params: &PaginationParams) -> DomainResult<PaginatedResult<User>> {
        let params = params.normalized();

        let mut all: Vec<User> = self.users.iter().map(|u| u.clone()).collect();
        all.sort_by_key(|u| u.id);

        let total = all.len() as u64;
        let items = all
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit as usize)
            .collect();

        Ok(PaginatedResult::new(items, total, params.page, params.limit))
    }

    async fn update_user(&self, id: i64, user: User) -> DomainResult<User> {
        // Lock order: users shard, then usernames shard. No other path nests.
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::user_not_found("id", id))?;

        if entry.same_content(&user) {
            return Ok(entry.clone());
        }

        if entry.username != user.username {
            self.claim_username(&user.username, id)?;
            self.release_username(&entry.username, id);
        }

        let updated = User {
            id,
            created_at: entry.created_at,
            updated_at: Utc::now(),
            ..user
        };
        *entry = updated.clone();
        Ok(updated)
    }

    async fn add_user(&self, user: User) -> DomainResult<User> {
        let id = self.user_counter.fetch_add(1, Ordering::SeqCst);
        self.claim_username(&user.username, id)?;

        let stored = User { id, ..user };
        self.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn remove_user(&self, id: i64) -> DomainResult<User> {
        let (_, user) = self
            .users
            .remove(&id)
            .ok_or_else(|| DomainError::user_not_found("id", id))?;

        self.release_username(&user.username, id);
        Ok(user)
    }

    async fn invalidate_user(&self, id: i64) -> DomainResult<User> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| DomainError::user_not_found("id", id))?;

        entry.is_active = false;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }
}
