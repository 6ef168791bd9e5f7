use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{DomainError, DomainResult, Role, User, UserRepositoryInterface};
use crate::infrastructure::database::entities::{role, user};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i64) -> DomainResult<user::Model> {
        user::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::user_not_found("id", id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        passphrase: model.passphrase,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        role: model.role,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

fn write_err(e: DbErr) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        DomainError::Conflict("Username already exists".to_string())
    } else {
        DomainError::from(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn get_roles(&self) -> DomainResult<Vec<Role>> {
        let models = role::Entity::find()
            .order_by_asc(role::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(role_model_to_domain).collect())
    }

    async fn get_user(&self, id: i64) -> DomainResult<User> {
        self.find_model(id).await.map(user_model_to_domain)
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<User> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .map(user_model_to_domain)
            .ok_or_else(|| DomainError::user_not_found("username", username))
    }

    async fn get_users(&self, params: &PaginationParams) -> DomainResult<PaginatedResult<User>> {
        let params = params.normalized();
        let query = user::Entity::find().order_by_asc(user::Column::Id);

        let total = query.clone().count(&self.db).await?;

        let models = query
            .offset(params.offset())
            .limit(params.limit as u64)
            .all(&self.db)
            .await?;

        let items: Vec<User> = models.into_iter().map(user_model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, params.page, params.limit))
    }

    async fn update_user(&self, id: i64, user: User) -> DomainResult<User> {
        let existing = self.find_model(id).await?;
        let current = user_model_to_domain(existing.clone());
        if current.same_content(&user) {
            return Ok(current);
        }

        let mut active: user::ActiveModel = existing.into();
        active.username = Set(user.username);
        active.passphrase = Set(user.passphrase);
        active.first_name = Set(user.first_name);
        active.last_name = Set(user.last_name);
        active.email = Set(user.email);
        active.role = Set(user.role);
        active.is_active = Set(user.is_active);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await.map_err(write_err)?;
        Ok(user_model_to_domain(updated))
    }

    async fn add_user(&self, user: User) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(user.username),
            passphrase: Set(user.passphrase),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            email: Set(user.email),
            role: Set(user.role),
            is_active: Set(user.is_active),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };

        let inserted = new_user.insert(&self.db).await.map_err(write_err)?;
        Ok(user_model_to_domain(inserted))
    }

    async fn remove_user(&self, id: i64) -> DomainResult<User> {
        let existing = self.find_model(id).await?;

        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::user_not_found("id", id));
        }

        Ok(user_model_to_domain(existing))
    }

    async fn invalidate_user(&self, id: i64) -> DomainResult<User> {
        let existing = self.find_model(id).await?;

        let mut active: user::ActiveModel = existing.into();
        active.is_active = Set(false);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(user_model_to_domain(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUserData;
    use crate::infrastructure::database::{init_and_migrate, DatabaseConfig};

    async fn repo() -> UserRepository {
        let db = init_and_migrate(&DatabaseConfig::in_memory())
            .await
            .expect("in-memory database");
        UserRepository::new(db)
    }

    fn record(username: &str) -> User {
        User::unsaved(
            NewUserData {
                username: username.to_string(),
                passphrase: String::new(),
                first_name: "First".into(),
                last_name: "Last".into(),
                email: format!("{}@example.com", username),
                role: "viewer".into(),
            },
            "hash".into(),
        )
    }

    #[tokio::test]
    async fn migrations_seed_roles() {
        let repo = repo().await;
        let roles = repo.get_roles().await.unwrap();

        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["admin", "operator", "viewer"]);
    }

    #[tokio::test]
    async fn add_then_fetch_by_id_and_username() {
        let repo = repo().await;
        let stored = repo.add_user(record("alice")).await.unwrap();

        assert!(stored.id > 0);
        assert_eq!(repo.get_user(stored.id).await.unwrap().username, "alice");
        assert_eq!(repo.get_user_by_username("alice").await.unwrap().id, stored.id);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let repo = repo().await;

        assert!(matches!(
            repo.get_user(42).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            repo.get_user_by_username("nobody").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let repo = repo().await;
        repo.add_user(record("alice")).await.unwrap();

        let err = repo.add_user(record("alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_overwrites_fields() {
        let repo = repo().await;
        let stored = repo.add_user(record("alice")).await.unwrap();

        let mut changed = stored.clone();
        changed.email = String::new();
        changed.role = "admin".into();
        let updated = repo.update_user(stored.id, changed).await.unwrap();

        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.email, "");
        assert_eq!(updated.role, "admin");
    }

    #[tokio::test]
    async fn get_users_pages_in_id_order() {
        let repo = repo().await;
        for name in ["a", "b", "c"] {
            repo.add_user(record(name)).await.unwrap();
        }

        let page = repo.get_users(&PaginationParams::new(1, 2)).await.unwrap();
        let names: Vec<&str> = page.items.iter().map(|u| u.username.as_str()).collect();

        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn remove_returns_last_state() {
        let repo = repo().await;
        let stored = repo.add_user(record("alice")).await.unwrap();

        let removed = repo.remove_user(stored.id).await.unwrap();
        assert_eq!(removed.username, "alice");
        assert!(repo.get_user(stored.id).await.is_err());
    }

    #[tokio::test]
    async fn invalidate_deactivates() {
        let repo = repo().await;
        let stored = repo.add_user(record("alice")).await.unwrap();

        let invalidated = repo.invalidate_user(stored.id).await.unwrap();
        assert!(!invalidated.is_active);
        assert!(!repo.get_user(stored.id).await.unwrap().is_active);
    }

    #[tokio::test]
    async fn update_to_taken_username_is_conflict() {
        let repo = repo().await;
        repo.add_user(record("alice")).await.unwrap();
        let bob = repo.add_user(record("bob")).await.unwrap();

        let mut renamed = bob.clone();
        renamed.username = "alice".into();
        let err = repo.update_user(bob.id, renamed).await.unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.get_user(bob.id).await.unwrap().username, "bob");
    }

    #[tokio::test]
    async fn unchanged_update_skips_the_write() {
        let repo = repo().await;
        let stored = repo.add_user(record("alice")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = repo.update_user(stored.id, stored.clone()).await.unwrap();
        assert_eq!(updated, stored);
        assert_eq!(repo.get_user(stored.id).await.unwrap(), stored);
    }
}
