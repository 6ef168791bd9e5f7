use thiserror::Error;

use crate::domain::DomainError;

/// Failure surfaced by `UserService`.
///
/// Every repository error collapses into `Storage`, carrying the original
/// message. Callers cannot tell a missing record from an I/O failure.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Storage(String),
}

impl ServiceError {
    /// Transport-agnostic status indicator.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Storage(_) => "storage_failure",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::Storage(msg) => msg,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        ServiceError::Storage(e.to_string())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_domain_error_becomes_storage() {
        let errors = [
            DomainError::user_not_found("id", 7),
            DomainError::Conflict("Username already exists".into()),
            DomainError::Storage("disk full".into()),
        ];

        for e in errors {
            let expected = e.to_string();
            let wrapped = ServiceError::from(e);
            assert_eq!(wrapped.code(), "storage_failure");
            assert_eq!(wrapped.message(), expected);
            assert_eq!(wrapped.to_string(), expected);
        }
    }
}
