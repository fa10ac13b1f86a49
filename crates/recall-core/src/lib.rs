//! ============================================================================
//! RECALL-CORE: Memory retrieval backend
//! ============================================================================
//! This crate handles all backend logic for the Recall memory service:
//! - Qdrant-backed storage of question/answer memories
//! - Owner-scoped enumeration and point deletion
//! - Payload normalization into the stable MemoryResponse schema
//! ============================================================================

pub mod config;
pub mod error;
pub mod memory;

// Re-export main types for convenience
pub use config::AppConfig;
pub use error::MemoryError;
pub use memory::{Memory, MemoryBackend, MemoryResponse, MemoryStore, MAX_MEMORIES};
