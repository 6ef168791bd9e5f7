pub mod user;

pub use user::{
    EditUserData, NewUserData, Role, User, UserRepositoryInterface, DEFAULT_ROLES,
};

pub use crate::shared::{DomainError, DomainResult};
