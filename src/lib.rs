//! # User Service
//!
//! Service layer translating HTTP requests into calls against a user
//! repository, with partial updates and passphrase hashing.
//!
//! ## Architecture
//!
//! - **domain**: user and role records, edit/create DTOs, repository trait
//! - **application**: `UserService` and the response shapes it returns
//! - **infrastructure**: passphrase hashing, in-memory and SQLite repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: pagination envelope, domain errors, shutdown signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export the service and its repository seam
pub use application::identity::{ServiceError, UserService};
pub use domain::UserRepositoryInterface;

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryUserRepository, UserRepository};

// Re-export API router
pub use interfaces::http::create_api_router;
