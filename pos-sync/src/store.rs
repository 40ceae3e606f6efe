//! Document store contract
//!
//! One generic capability parameterized by entity kind, rather than a
//! parallel implementation per collection.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::AppResult;
use shared::models::{Category, MenuItem, Order};
use std::fmt;
use tokio::sync::watch;

/// The three synced collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    MenuItems,
    Categories,
    Orders,
}

impl EntityKind {
    /// Collection name in the backing store
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MenuItems => "menu_items",
            Self::Categories => "categories",
            Self::Orders => "orders",
        }
    }

    pub const ALL: [EntityKind; 3] = [Self::MenuItems, Self::Categories, Self::Orders];
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synced domain type: knows its collection and its document id
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Document id, `None` until the store has assigned one
    fn id(&self) -> Option<&str>;
}

impl Entity for MenuItem {
    const KIND: EntityKind = EntityKind::MenuItems;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Entity for Category {
    const KIND: EntityKind = EntityKind::Categories;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Entity for Order {
    const KIND: EntityKind = EntityKind::Orders;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Receiver of full collection snapshots
///
/// Every mutation republishes the whole collection; consumers replace
/// their state wholesale (last-snapshot-wins).
pub type SnapshotRx = watch::Receiver<Vec<Value>>;

/// Contract of the external realtime document store
///
/// All calls are scoped by `user_id`; collections of different users are
/// fully isolated. Mutations are independent per call: a failure must not
/// corrupt any other collection or any local state.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document; the store assigns and returns its id.
    async fn create(&self, user_id: &str, kind: EntityKind, doc: Value) -> AppResult<String>;

    /// Shallow-merge `patch`'s top-level fields into an existing document.
    async fn update(&self, user_id: &str, kind: EntityKind, id: &str, patch: Value)
    -> AppResult<()>;

    /// Remove a document. Removal never cascades to referencing documents.
    async fn delete(&self, user_id: &str, kind: EntityKind, id: &str) -> AppResult<()>;

    /// Subscribe to full-collection snapshots for one user and kind.
    /// Dropping the receiver ends delivery for this subscriber.
    fn subscribe(&self, user_id: &str, kind: EntityKind) -> SnapshotRx;
}
