//! ============================================================================
//! Memory Module - Owner-scoped question/answer memory over Qdrant
//! ============================================================================
//! Provides enumeration and deletion of stored memories in a single shared
//! collection, scoped by a `metadata.userID` equality filter.
//!
//! ## Architecture
//! ```text
//! GET /memories/{user}        → scroll(filter: metadata.userID == user, cap 100)
//!                                    ↓
//!                              payload → Memory → MemoryResponse
//!
//! DELETE /memories/{user}/{id} → fetch point → ownership check → delete(wait)
//! ```
//!
//! Records are created and embedded by an external ingestion process; this
//! module only reads and deletes, it never writes or updates a point.
//! ============================================================================

mod backend;
mod store;
mod types;

// Re-export public types
pub use backend::MemoryBackend;
pub use store::{MemoryStore, EMBEDDING_DIM, MAX_MEMORIES};
pub use types::{split_combined_content, Memory, MemoryResponse};
