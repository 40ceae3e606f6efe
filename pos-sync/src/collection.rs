//! Typed collection subscription
//!
//! Wraps a raw snapshot subscription in a background decode task that
//! republishes `Vec<T>` on a typed watch channel. Malformed documents
//! are logged and skipped; a bad document must never poison the feed.

use crate::store::{DocumentStore, Entity, SnapshotRx};
use serde_json::Value;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// A live, typed view of one user's collection
pub struct CollectionSync<T: Entity> {
    rx: watch::Receiver<Vec<T>>,
    cancel: CancellationToken,
}

impl<T: Entity> CollectionSync<T> {
    /// Subscribe to `T`'s collection for `user_id` and start decoding
    pub fn start(store: &dyn DocumentStore, user_id: &str) -> Self {
        let raw = store.subscribe(user_id, T::KIND);
        Self::from_raw(raw)
    }

    fn from_raw(mut raw: SnapshotRx) -> Self {
        let (tx, rx) = watch::channel(decode_snapshot::<T>(&raw.borrow()));
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => break,
                    changed = raw.changed() => {
                        if changed.is_err() {
                            // Store side dropped; no more snapshots.
                            break;
                        }
                        let decoded = decode_snapshot::<T>(&raw.borrow_and_update());
                        if tx.send(decoded).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!(kind = %T::KIND, "collection sync task stopped");
        });

        Self { rx, cancel }
    }

    /// Latest decoded snapshot
    pub fn current(&self) -> Vec<T> {
        self.rx.borrow().clone()
    }

    /// Typed watch receiver for reactive consumers
    pub fn receiver(&self) -> watch::Receiver<Vec<T>> {
        self.rx.clone()
    }

    /// Stop snapshot delivery; idempotent
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl<T: Entity> Drop for CollectionSync<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn decode_snapshot<T: Entity>(docs: &[Value]) -> Vec<T> {
    docs.iter()
        .filter_map(|doc| match serde_json::from_value::<T>(doc.clone()) {
            Ok(entity) => Some(entity),
            Err(err) => {
                tracing::warn!(kind = %T::KIND, error = %err, "skipping malformed document");
                None
            }
        })
        .collect()
}
