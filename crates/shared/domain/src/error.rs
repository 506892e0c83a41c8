//! Business rule violations raised by the domain types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Bad field value; the message is shown to the client as-is
    #[error("{0}")]
    Validation(String),

    /// Password policy rejection
    #[error("{0}")]
    Password(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0} already exists")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Resource belongs to another domain
    #[error("Forbidden")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Failure outside the caller's control, such as the hashing backend
    #[error("{0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        DomainError::Conflict(entity.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_client_ready() {
        assert_eq!(
            DomainError::validation("Invalid email address").to_string(),
            "Invalid email address"
        );
        assert_eq!(DomainError::not_found("Candidate").to_string(), "Candidate not found");
        assert_eq!(DomainError::conflict("Email").to_string(), "Email already exists");
    }
}
