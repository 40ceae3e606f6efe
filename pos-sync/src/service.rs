//! Per-user subscription lifecycle
//!
//! Owns the three typed subscriptions for the signed-in user. Switching
//! users tears everything down before resubscribing, so one account's
//! data can never bleed into another's views.

use crate::collection::CollectionSync;
use crate::session::Session;
use crate::store::DocumentStore;
use parking_lot::Mutex;
use shared::models::{Category, MenuItem, Order};
use std::sync::Arc;
use tokio::sync::watch;

struct ActiveSync {
    session: Session,
    menu_items: CollectionSync<MenuItem>,
    categories: CollectionSync<Category>,
    orders: CollectionSync<Order>,
}

/// Subscription manager for the signed-in user
pub struct SyncService {
    store: Arc<dyn DocumentStore>,
    active: Mutex<Option<ActiveSync>>,
}

impl SyncService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            active: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Establish all three subscriptions for `session`'s user, replacing
    /// any previous user's subscriptions.
    pub fn start(&self, session: Session) {
        let mut active = self.active.lock();
        if let Some(previous) = active.take() {
            tracing::info!(
                from = %previous.session.id,
                to = %session.id,
                "switching user, resubscribing"
            );
            previous.menu_items.cancel();
            previous.categories.cancel();
            previous.orders.cancel();
        }

        let user_id = session.id.clone();
        *active = Some(ActiveSync {
            session,
            menu_items: CollectionSync::start(self.store.as_ref(), &user_id),
            categories: CollectionSync::start(self.store.as_ref(), &user_id),
            orders: CollectionSync::start(self.store.as_ref(), &user_id),
        });
        tracing::info!(user = %user_id, "sync started");
    }

    /// Tear down all subscriptions (sign-out)
    pub fn stop(&self) {
        if let Some(active) = self.active.lock().take() {
            active.menu_items.cancel();
            active.categories.cancel();
            active.orders.cancel();
            tracing::info!(user = %active.session.id, "sync stopped");
        }
    }

    /// Currently signed-in session, if any
    pub fn session(&self) -> Option<Session> {
        self.active.lock().as_ref().map(|a| a.session.clone())
    }

    /// Typed menu item feed; `None` when no user is signed in
    pub fn menu_items(&self) -> Option<watch::Receiver<Vec<MenuItem>>> {
        self.active.lock().as_ref().map(|a| a.menu_items.receiver())
    }

    pub fn categories(&self) -> Option<watch::Receiver<Vec<Category>>> {
        self.active.lock().as_ref().map(|a| a.categories.receiver())
    }

    pub fn orders(&self) -> Option<watch::Receiver<Vec<Order>>> {
        self.active.lock().as_ref().map(|a| a.orders.receiver())
    }
}
