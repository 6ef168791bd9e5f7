//! Identity module — user management
//!
//! `UserService` sits between the HTTP handlers and the user repository.

pub mod dto;
pub mod error;
pub mod service;

pub use dto::{RoleResponse, UserResponse};
pub use error::{ServiceError, ServiceResult};
pub use service::UserService;
