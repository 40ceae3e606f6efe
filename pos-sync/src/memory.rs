//! In-memory document store
//!
//! Backend used by tests and the demo binary. Mirrors the managed
//! store's semantics: store-assigned ids, shallow patch merges,
//! last-write-wins, and a full snapshot republished after every
//! mutation.

use crate::store::{DocumentStore, EntityKind, SnapshotRx};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use shared::{AppError, AppResult};
use tokio::sync::watch;

/// One user-scoped collection: documents plus its snapshot channel
struct Collection {
    docs: Vec<Value>,
    tx: watch::Sender<Vec<Value>>,
}

impl Collection {
    fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            docs: Vec::new(),
            tx,
        }
    }

    fn publish(&self) {
        // Receivers may all be gone; that only means nobody is watching.
        let _ = self.tx.send(self.docs.clone());
    }
}

/// In-memory [`DocumentStore`]
#[derive(Default)]
pub struct MemoryStore {
    collections: DashMap<(String, EntityKind), Collection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn doc_id(doc: &Value) -> Option<&str> {
        doc.get("id").and_then(Value::as_str)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, user_id: &str, kind: EntityKind, doc: Value) -> AppResult<String> {
        let Value::Object(mut fields) = doc else {
            return Err(AppError::invalid_request("document must be a JSON object"));
        };
        let id = uuid::Uuid::new_v4().to_string();
        fields.insert("id".into(), Value::String(id.clone()));

        let mut entry = self
            .collections
            .entry((user_id.to_string(), kind))
            .or_insert_with(Collection::new);
        entry.docs.push(Value::Object(fields));
        entry.publish();
        tracing::debug!(user = %user_id, kind = %kind, id = %id, "document created");
        Ok(id)
    }

    async fn update(
        &self,
        user_id: &str,
        kind: EntityKind,
        id: &str,
        patch: Value,
    ) -> AppResult<()> {
        let Value::Object(patch) = patch else {
            return Err(AppError::invalid_request("patch must be a JSON object"));
        };

        let mut entry = self
            .collections
            .get_mut(&(user_id.to_string(), kind))
            .ok_or_else(|| AppError::not_found(kind.as_str()))?;

        let doc = entry
            .docs
            .iter_mut()
            .find(|d| Self::doc_id(d) == Some(id))
            .ok_or_else(|| AppError::not_found(format!("{} document {}", kind, id)))?;

        let fields = doc
            .as_object_mut()
            .ok_or_else(|| AppError::store("stored document is not an object"))?;
        merge_shallow(fields, patch);
        entry.publish();
        tracing::debug!(user = %user_id, kind = %kind, id = %id, "document updated");
        Ok(())
    }

    async fn delete(&self, user_id: &str, kind: EntityKind, id: &str) -> AppResult<()> {
        let mut entry = self
            .collections
            .get_mut(&(user_id.to_string(), kind))
            .ok_or_else(|| AppError::not_found(kind.as_str()))?;

        let before = entry.docs.len();
        entry.docs.retain(|d| Self::doc_id(d) != Some(id));
        if entry.docs.len() == before {
            return Err(AppError::not_found(format!("{} document {}", kind, id)));
        }
        entry.publish();
        tracing::debug!(user = %user_id, kind = %kind, id = %id, "document deleted");
        Ok(())
    }

    fn subscribe(&self, user_id: &str, kind: EntityKind) -> SnapshotRx {
        let entry = self
            .collections
            .entry((user_id.to_string(), kind))
            .or_insert_with(Collection::new);
        let rx = entry.tx.subscribe();
        // Ensure a fresh subscriber observes the current contents, not
        // the channel's initial empty value.
        entry.publish();
        rx
    }
}

/// Last-write-wins merge of top-level fields; `id` is never overwritten.
fn merge_shallow(fields: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if key == "id" {
            continue;
        }
        fields.insert(key, value);
    }
}
