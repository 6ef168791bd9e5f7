pub mod identity;

// Re-export key types for convenience
pub use identity::{RoleResponse, ServiceError, ServiceResult, UserResponse, UserService};
