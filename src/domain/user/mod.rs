//! User aggregate
//!
//! Contains the User entity, DTOs, and repository interface.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

// Re-export model types
pub use model::{Role, User, DEFAULT_ROLES};

// Re-export DTOs
pub use dto_create::NewUserData;
pub use dto_update::EditUserData;

// Re-export repository trait
pub use repository::UserRepositoryInterface;
