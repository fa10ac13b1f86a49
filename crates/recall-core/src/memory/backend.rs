//! ============================================================================
//! Memory Backend - Trait seam over the store
//! ============================================================================
//! The HTTP handlers and CLI depend on this trait rather than on the concrete
//! Qdrant store, so tests can substitute an in-memory double.
//! ============================================================================

use async_trait::async_trait;

use super::store::MemoryStore;
use super::types::Memory;
use crate::error::Result;

/// Read/delete operations the service needs from a memory store
#[async_trait]
pub trait MemoryBackend: Send + Sync {
    /// Enumerate memories owned by a user, up to the store's hard cap
    async fn list_memories(&self, user_id: &str) -> Result<Vec<Memory>>;

    /// Permanently delete a memory the user owns
    async fn delete_memory(&self, user_id: &str, memory_id: &str) -> Result<()>;

    /// Probe store connectivity
    async fn health_check(&self) -> Result<bool>;
}

#[async_trait]
impl MemoryBackend for MemoryStore {
    async fn list_memories(&self, user_id: &str) -> Result<Vec<Memory>> {
        MemoryStore::list_memories(self, user_id).await
    }

    async fn delete_memory(&self, user_id: &str, memory_id: &str) -> Result<()> {
        MemoryStore::delete_memory(self, user_id, memory_id).await
    }

    async fn health_check(&self) -> Result<bool> {
        MemoryStore::health_check(self).await
    }
}
