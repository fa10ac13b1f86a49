//! ============================================================================
//! Error Types - Failure taxonomy for the memory service
//! ============================================================================
//! Three kinds of failure leave this crate: a missing caller identifier,
//! a delete target that does not exist (or is not owned by the caller),
//! and everything else that goes wrong talking to the store.
//! ============================================================================

use thiserror::Error;

/// Errors surfaced by the memory backend
#[derive(Debug, Clone, Error)]
pub enum MemoryError {
    #[error("User ID is required")]
    MissingUserId,

    #[error("Memory not found or couldn't be deleted: {0}")]
    NotFound(String),

    #[error("Memory store error: {0}")]
    Store(String),
}

impl MemoryError {
    /// True if this error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, MemoryError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, MemoryError>;
