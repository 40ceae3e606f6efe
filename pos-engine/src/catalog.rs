//! Catalog operations (menu management)
//!
//! Thin command layer over the document store for categories and menu
//! items. Validation happens here, before any mutation is issued; the
//! synced collections pick the results up through their snapshots.

use pos_sync::{DocumentStore, EntityKind};
use shared::models::{Category, MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::slugify;
use shared::{AppError, AppResult};
use std::sync::Arc;

pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    // ==================== Categories ====================

    /// Create a category; the slug is derived from the name.
    pub async fn add_category(&self, user_id: &str, name: &str) -> AppResult<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("category name is required"));
        }
        let category = Category::new(name);
        let doc = serde_json::to_value(&category)?;
        self.store
            .create(user_id, EntityKind::Categories, doc)
            .await
    }

    /// Rename a category, re-deriving its slug
    pub async fn rename_category(&self, user_id: &str, id: &str, name: &str) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("category name is required"));
        }
        let patch = serde_json::json!({ "name": name, "slug": slugify(name) });
        self.store
            .update(user_id, EntityKind::Categories, id, patch)
            .await
    }

    /// Delete a category. Deletion does not cascade: items referencing
    /// it keep their `category_id` and drop out of category-filtered
    /// views until reassigned.
    pub async fn delete_category(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.store.delete(user_id, EntityKind::Categories, id).await
    }

    // ==================== Menu items ====================

    /// Create a menu item from a payload, normalizing the legacy `egg`
    /// type at this boundary.
    pub async fn add_menu_item(&self, user_id: &str, payload: MenuItemCreate) -> AppResult<String> {
        if payload.name.trim().is_empty() {
            return Err(AppError::validation("item name is required"));
        }
        if payload.category_id.trim().is_empty() {
            return Err(AppError::validation("item must belong to a category"));
        }
        validate_amount(payload.price, "price")?;
        if let Some(cost) = payload.cost {
            validate_amount(cost, "cost")?;
        }

        let item = MenuItem {
            id: None,
            name: payload.name.trim().to_string(),
            description: payload.description,
            price: payload.price,
            cost: payload.cost,
            category_id: payload.category_id,
            is_available: payload.is_available.unwrap_or(true),
            item_type: payload.item_type.unwrap_or_default().normalized(),
        };
        let doc = serde_json::to_value(&item)?;
        self.store.create(user_id, EntityKind::MenuItems, doc).await
    }

    /// Partially update a menu item; only the given fields change.
    pub async fn update_menu_item(
        &self,
        user_id: &str,
        id: &str,
        update: MenuItemUpdate,
    ) -> AppResult<()> {
        if let Some(price) = update.price {
            validate_amount(price, "price")?;
        }
        if let Some(cost) = update.cost {
            validate_amount(cost, "cost")?;
        }

        let mut patch = serde_json::Map::new();
        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("item name is required"));
            }
            patch.insert("name".into(), name.into());
        }
        if let Some(description) = update.description {
            patch.insert("description".into(), description.into());
        }
        if let Some(price) = update.price {
            patch.insert("price".into(), price.into());
        }
        if let Some(cost) = update.cost {
            patch.insert("cost".into(), cost.into());
        }
        if let Some(category_id) = update.category_id {
            patch.insert("category_id".into(), category_id.into());
        }
        if let Some(is_available) = update.is_available {
            patch.insert("is_available".into(), is_available.into());
        }
        if let Some(item_type) = update.item_type {
            patch.insert(
                "item_type".into(),
                serde_json::to_value(item_type.normalized())?,
            );
        }
        if patch.is_empty() {
            return Ok(());
        }

        self.store
            .update(user_id, EntityKind::MenuItems, id, patch.into())
            .await
    }

    /// Toggle an item on/off the menu without editing anything else
    pub async fn set_availability(&self, user_id: &str, id: &str, available: bool) -> AppResult<()> {
        self.store
            .update(
                user_id,
                EntityKind::MenuItems,
                id,
                serde_json::json!({ "is_available": available }),
            )
            .await
    }

    pub async fn delete_menu_item(&self, user_id: &str, id: &str) -> AppResult<()> {
        self.store.delete(user_id, EntityKind::MenuItems, id).await
    }
}

fn validate_amount(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(
            AppError::validation(format!("{field} must be a non-negative number"))
                .with_detail("field", field)
                .with_detail("value", value),
        );
    }
    Ok(())
}
