//! User request DTOs

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{EditUserData, NewUserData};
use crate::shared::{PaginationParams, DEFAULT_PAGE_SIZE};

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub passphrase: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_role")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub role: String,
}

fn default_role() -> String {
    "viewer".to_string()
}

impl From<CreateUserRequest> for NewUserData {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            username: r.username,
            passphrase: r.passphrase,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            role: r.role,
        }
    }
}

/// Update user request. Omitted or `null` fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub username: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub passphrase: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub role: Option<String>,
}

impl From<UpdateUserRequest> for EditUserData {
    fn from(r: UpdateUserRequest) -> Self {
        Self {
            username: r.username,
            passphrase: r.passphrase,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            role: r.role,
        }
    }
}

/// List users query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u32,
    /// Page size (1-100)
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}
fn default_limit() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl From<ListUsersParams> for PaginationParams {
    fn from(p: ListUsersParams) -> Self {
        PaginationParams::new(p.page, p.limit)
    }
}
