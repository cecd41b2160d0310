//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A session was not found.
    #[error("session not found: {0}")]
    SessionNotFound(Uuid),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A persistence/storage error.
    #[error("storage error: {0}")]
    Storage(String),
}
