use thiserror::Error;

/// Repository-level failures.
///
/// Repositories distinguish these cases; the service layer collapses all of
/// them into a single storage failure.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn user_not_found(field: &'static str, value: impl ToString) -> Self {
        DomainError::NotFound {
            entity: "User",
            field,
            value: value.to_string(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
