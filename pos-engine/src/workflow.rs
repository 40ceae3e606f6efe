//! Kitchen order workflow
//!
//! Advances orders through PENDING → PREPARING → READY → COMPLETED one
//! stage at a time. Every transition is a single-field status patch;
//! items, totals, and payment state are never touched here.

use chrono::Utc;
use pos_sync::{DocumentStore, EntityKind};
use serde_json::json;
use shared::models::{Order, OrderStatus};
use shared::{AppError, AppResult};
use std::sync::Arc;

/// Status transition service for the kitchen display
pub struct KitchenWorkflow {
    store: Arc<dyn DocumentStore>,
}

impl KitchenWorkflow {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Advance one forward stage ("Start", "Mark Ready", "Serve").
    /// Returns the new status.
    pub async fn advance(&self, user_id: &str, order: &Order) -> AppResult<OrderStatus> {
        let next = order
            .status
            .next()
            .ok_or_else(|| AppError::invalid_transition(order.status.as_str(), "next stage"))?;
        self.apply(user_id, order, next).await?;
        Ok(next)
    }

    /// Transition to an explicit target status; stage skipping and
    /// backward moves are rejected.
    pub async fn transition(&self, user_id: &str, order: &Order, to: OrderStatus) -> AppResult<()> {
        if !order.status.can_transition_to(to) {
            return Err(AppError::invalid_transition(
                order.status.as_str(),
                to.as_str(),
            ));
        }
        self.apply(user_id, order, to).await
    }

    /// Cancel from any non-terminal state. Not wired into the default
    /// screens, but part of the workflow surface.
    pub async fn cancel(&self, user_id: &str, order: &Order) -> AppResult<()> {
        self.transition(user_id, order, OrderStatus::Cancelled).await
    }

    async fn apply(&self, user_id: &str, order: &Order, to: OrderStatus) -> AppResult<()> {
        let id = order
            .id
            .as_deref()
            .ok_or_else(|| AppError::new(shared::ErrorCode::OrderNotFound))?;

        let patch = if to == OrderStatus::Completed {
            // Serving stamps the completion time used by analytics.
            json!({ "status": to, "completed_at": Utc::now() })
        } else {
            json!({ "status": to })
        };

        self.store
            .update(user_id, EntityKind::Orders, id, patch)
            .await?;
        tracing::info!(order = %id, from = %order.status.as_str(), to = %to.as_str(), "order status updated");
        Ok(())
    }
}
