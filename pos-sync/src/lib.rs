//! Realtime data sync layer
//!
//! The managed document store is an external collaborator; this crate
//! models its contract: user-scoped collections of JSON documents with
//! fire-and-forget mutations and full-snapshot subscriptions
//! (last-snapshot-wins, no client-side merging).
//!
//! - [`store`]: the [`DocumentStore`] contract and entity kinds
//! - [`memory`]: in-memory backend (tests, demos, offline)
//! - [`collection`]: typed subscription over raw snapshots
//! - [`session`]: authenticated session record + disk cache
//! - [`service`]: per-user subscription lifecycle

pub mod collection;
pub mod memory;
pub mod service;
pub mod session;
pub mod store;

pub use collection::CollectionSync;
pub use memory::MemoryStore;
pub use service::SyncService;
pub use session::{Session, SessionCache};
pub use store::{DocumentStore, Entity, EntityKind, SnapshotRx};
