//! Domain-level error types.

use thiserror::Error;

use crate::ports::MailError;

/// Domain errors - business rule violations and collaborator failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid trip start date")]
    InvalidStartDate,

    #[error("Invalid trip end date")]
    InvalidEndDate,

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

/// Coarse classification callers branch on instead of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A business rule rejected the request.
    Domain,
    /// Storage or mail collaborator failed.
    Dependency,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidStartDate | DomainError::InvalidEndDate => ErrorKind::Domain,
            DomainError::Repository(_) | DomainError::Mail(_) => ErrorKind::Dependency,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
