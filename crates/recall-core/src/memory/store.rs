//! ============================================================================
//! Memory Store - Qdrant vector database operations
//! ============================================================================
//! Enumerates and deletes question/answer memories in a single shared
//! collection, scoped to their owner via a metadata filter.
//! ============================================================================

use std::collections::HashMap;
use std::time::Duration;

use qdrant_client::qdrant::{
    point_id::PointIdOptions, value::Kind, Condition, CreateCollectionBuilder,
    DeletePointsBuilder, Distance, Filter, GetPointsBuilder, PointId, ScrollPointsBuilder, Value,
    VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::{split_combined_content, Memory};
use crate::config::AppConfig;
use crate::error::{MemoryError, Result};

/// Hard cap on memories returned per enumeration. No pagination beyond this.
pub const MAX_MEMORIES: u32 = 100;

/// Vector dimension used when bootstrapping the collection. Matches the
/// 768-dim embedding model used by the ingestion pipeline that writes
/// memories; this service itself never computes vectors.
pub const EMBEDDING_DIM: u64 = 768;

/// Memory store backed by the shared Qdrant collection
pub struct MemoryStore {
    client: Qdrant,
    collection: String,
}

impl MemoryStore {
    /// Create a new memory store, connecting to Qdrant
    pub async fn new(config: &AppConfig) -> Result<Self> {
        debug!("Connecting to Qdrant at {}", config.qdrant_url);

        let mut builder = Qdrant::from_url(&config.qdrant_url)
            .timeout(Duration::from_secs(config.request_timeout_secs));
        if let Some(key) = &config.qdrant_api_key {
            builder = builder.api_key(key.clone());
        }

        let client = builder
            .build()
            .map_err(|e| MemoryError::Store(format!("Failed to create Qdrant client: {}", e)))?;

        let store = Self {
            client,
            collection: config.collection.clone(),
        };

        // Ensure collection exists
        store.ensure_collection().await?;

        Ok(store)
    }

    /// Ensure the shared memory collection exists
    async fn ensure_collection(&self) -> Result<()> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .map_err(|e| {
                MemoryError::Store(format!("Failed to check collection existence: {}", e))
            })?;

        if !exists {
            info!("Creating collection: {}", self.collection);

            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(VectorParamsBuilder::new(EMBEDDING_DIM, Distance::Cosine)),
                )
                .await
                .map_err(|e| MemoryError::Store(format!("Failed to create collection: {}", e)))?;

            info!("Collection {} created successfully", self.collection);
        } else {
            debug!("Collection {} already exists", self.collection);
        }

        Ok(())
    }

    /// Enumerate up to [`MAX_MEMORIES`] memories owned by a user.
    ///
    /// This is a metadata-filtered scroll in the store's native order, not a
    /// similarity search. A user with no matching points gets an empty list.
    pub async fn list_memories(&self, user_id: &str) -> Result<Vec<Memory>> {
        let user_id = require_user_id(user_id)?;

        debug!("Listing memories for user {} (cap: {})", user_id, MAX_MEMORIES);

        let filter = Filter::must([Condition::matches("metadata.userID", user_id.to_string())]);

        let scroll_result = self
            .client
            .scroll(
                ScrollPointsBuilder::new(&self.collection)
                    .filter(filter)
                    .limit(MAX_MEMORIES)
                    .with_payload(true),
            )
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to scroll memories: {}", e)))?;

        let memories: Vec<Memory> = scroll_result
            .result
            .into_iter()
            .filter_map(|point| {
                let id = point_id_to_string(point.id?)?;
                Some(memory_from_payload(id, user_id, &point.payload))
            })
            .collect();

        debug!("Retrieved {} memories for user {}", memories.len(), user_id);
        Ok(memories)
    }

    /// Delete a memory by id, verifying ownership first.
    ///
    /// The point is fetched before deletion; a point that does not exist or
    /// belongs to a different user fails with the same NotFound error, so a
    /// caller cannot probe for other users' memory ids. Deletion waits for
    /// the store's acknowledgment before returning.
    pub async fn delete_memory(&self, user_id: &str, memory_id: &str) -> Result<()> {
        let user_id = require_user_id(user_id)?;

        debug!("Deleting memory {} for user {}", memory_id, user_id);

        let point_id = parse_point_id(memory_id)
            .ok_or_else(|| MemoryError::NotFound(format!("invalid memory id '{}'", memory_id)))?;

        let fetched = self
            .client
            .get_points(
                GetPointsBuilder::new(&self.collection, vec![point_id.clone()]).with_payload(true),
            )
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to fetch memory: {}", e)))?;

        let owned = fetched
            .result
            .into_iter()
            .next()
            .map(|point| get_metadata_string(&point.payload, "userID").as_deref() == Some(user_id))
            .unwrap_or(false);

        if !owned {
            return Err(MemoryError::NotFound(format!(
                "no memory {} for user {}",
                memory_id, user_id
            )));
        }

        self.client
            .delete_points(
                DeletePointsBuilder::new(&self.collection)
                    .points(vec![point_id])
                    .wait(true),
            )
            .await
            .map_err(|e| MemoryError::Store(format!("Failed to delete memory: {}", e)))?;

        info!("Deleted memory {} for user {}", memory_id, user_id);
        Ok(())
    }

    /// Check if the store is healthy/connected
    pub async fn health_check(&self) -> Result<bool> {
        match self.client.health_check().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Qdrant health check failed: {}", e);
                Ok(false)
            }
        }
    }
}

fn require_user_id(user_id: &str) -> Result<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(MemoryError::MissingUserId);
    }
    Ok(trimmed)
}

/// Map a raw Qdrant payload into a [`Memory`].
///
/// Pre-split `question`/`answer` payload fields win; records written by the
/// legacy ingestion pipeline carry a combined `page_content` blob instead.
/// `company` and `date` live at the payload top level or inside the nested
/// `metadata` struct depending on schema generation. Anything missing
/// degrades to an empty string.
fn memory_from_payload(id: String, user_id: &str, payload: &HashMap<String, Value>) -> Memory {
    let (question, answer) = match (get_string(payload, "question"), get_string(payload, "answer"))
    {
        (Some(question), answer) => (question, answer.unwrap_or_default()),
        (None, Some(answer)) => (
            get_string(payload, "page_content")
                .map(|content| split_combined_content(&content).0)
                .unwrap_or_default(),
            answer,
        ),
        (None, None) => get_string(payload, "page_content")
            .map(|content| split_combined_content(&content))
            .unwrap_or_default(),
    };

    Memory {
        id,
        user_id: user_id.to_string(),
        question,
        answer,
        company: get_string(payload, "company")
            .or_else(|| get_metadata_string(payload, "company"))
            .unwrap_or_default(),
        date: get_string(payload, "date")
            .or_else(|| get_metadata_string(payload, "date"))
            .unwrap_or_default(),
    }
}

/// Parse a caller-supplied memory id into a Qdrant point id.
/// Qdrant accepts UUIDs and unsigned integers; anything else is rejected
/// before we ever talk to the store.
fn parse_point_id(memory_id: &str) -> Option<PointId> {
    if let Ok(uuid) = Uuid::parse_str(memory_id) {
        return Some(PointId::from(uuid.to_string()));
    }
    memory_id.parse::<u64>().ok().map(PointId::from)
}

// Helper to stringify a PointId in either of its two forms
fn point_id_to_string(point_id: PointId) -> Option<String> {
    match point_id.point_id_options? {
        PointIdOptions::Uuid(uuid_str) => Some(uuid_str),
        PointIdOptions::Num(num) => Some(num.to_string()),
    }
}

// Helper functions to extract values from payload
fn get_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    payload.get(key).and_then(|v| v.as_str()).map(String::from)
}

fn get_metadata_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
    let metadata = payload.get("metadata")?;
    match metadata.kind.as_ref()? {
        Kind::StructValue(nested) => nested
            .fields
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qdrant_client::qdrant::Struct;

    fn metadata_value(fields: &[(&str, &str)]) -> Value {
        let fields: HashMap<String, Value> = fields
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect();
        Value {
            kind: Some(Kind::StructValue(Struct { fields })),
        }
    }

    #[test]
    fn test_pre_split_payload_round_trips() {
        let payload: HashMap<String, Value> = [
            ("question".to_string(), Value::from("Why us?")),
            ("answer".to_string(), Value::from("Growth")),
            ("company".to_string(), Value::from("Acme")),
            ("date".to_string(), Value::from("2024-01-01")),
            (
                "metadata".to_string(),
                metadata_value(&[("userID", "u1")]),
            ),
        ]
        .into_iter()
        .collect();

        let memory = memory_from_payload("m1".to_string(), "u1", &payload);
        assert_eq!(memory.id, "m1");
        assert_eq!(memory.question, "Why us?");
        assert_eq!(memory.answer, "Growth");
        assert_eq!(memory.company, "Acme");
        assert_eq!(memory.date, "2024-01-01");
    }

    #[test]
    fn test_legacy_combined_payload() {
        let payload: HashMap<String, Value> = [(
            "page_content".to_string(),
            Value::from("Question: Why us?\nAnswer: Growth"),
        )]
        .into_iter()
        .collect();

        let memory = memory_from_payload("m1".to_string(), "u1", &payload);
        assert_eq!(memory.question, "Why us?");
        assert_eq!(memory.answer, "Growth");
        assert_eq!(memory.company, "");
        assert_eq!(memory.date, "");
    }

    #[test]
    fn test_company_and_date_from_nested_metadata() {
        let payload: HashMap<String, Value> = [
            ("question".to_string(), Value::from("Why us?")),
            ("answer".to_string(), Value::from("Growth")),
            (
                "metadata".to_string(),
                metadata_value(&[("userID", "u1"), ("company", "Acme"), ("date", "2024-01-01")]),
            ),
        ]
        .into_iter()
        .collect();

        let memory = memory_from_payload("m1".to_string(), "u1", &payload);
        assert_eq!(memory.company, "Acme");
        assert_eq!(memory.date, "2024-01-01");
    }

    #[test]
    fn test_empty_payload_degrades_to_empty_strings() {
        let payload = HashMap::new();

        let memory = memory_from_payload("m1".to_string(), "u1", &payload);
        assert_eq!(memory.question, "");
        assert_eq!(memory.answer, "");
        assert_eq!(memory.company, "");
        assert_eq!(memory.date, "");
    }

    #[test]
    fn test_parse_point_id_forms() {
        assert!(parse_point_id("4a2b7f0e-3c1d-4f5a-9b8c-2d1e0f3a4b5c").is_some());
        assert!(parse_point_id("42").is_some());
        assert!(parse_point_id("nonexistent-id").is_none());
        assert!(parse_point_id("").is_none());
    }

    #[test]
    fn test_point_id_to_string_forms() {
        assert_eq!(
            point_id_to_string(PointId::from(7u64)).as_deref(),
            Some("7")
        );
        assert_eq!(
            point_id_to_string(PointId::from("abc".to_string())).as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn test_require_user_id() {
        assert!(require_user_id("  ").is_err());
        assert_eq!(require_user_id(" u1 ").unwrap(), "u1");
    }

    // Integration tests require a running Qdrant instance
    // These are marked as ignored by default

    #[tokio::test]
    #[ignore]
    async fn test_list_and_delete_against_live_store() {
        let config = AppConfig {
            qdrant_url: "http://localhost:6334".to_string(),
            qdrant_api_key: None,
            collection: "recall_test_memories".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            request_timeout_secs: 5,
        };
        let store = MemoryStore::new(&config).await.unwrap();

        let memories = store.list_memories("test_user").await.unwrap();
        assert!(memories.len() <= MAX_MEMORIES as usize);

        let err = store
            .delete_memory("test_user", &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
