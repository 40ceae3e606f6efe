//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Dietary type of a menu item
///
/// `Egg` is a legacy value still present in stored documents; it folds
/// into `Veg` via [`ItemType::normalized`] at the catalog boundary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    #[default]
    Veg,
    NonVeg,
    Egg,
}

impl ItemType {
    /// Map legacy values onto the canonical set (`Egg` → `Veg`)
    pub fn normalized(self) -> Self {
        match self {
            Self::Egg => Self::Veg,
            other => other,
        }
    }
}

/// Menu item entity
///
/// Weakly references its category via `category_id`; category deletion
/// leaves the reference dangling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// Selling price in currency unit
    pub price: f64,
    /// Unit cost, used only for profit calculation (absent = 0)
    pub cost: Option<f64>,
    /// Category reference (String ID)
    pub category_id: String,
    pub is_available: bool,
    pub item_type: ItemType,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub category_id: String,
    pub is_available: Option<bool>,
    pub item_type: Option<ItemType>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub cost: Option<f64>,
    pub category_id: Option<String>,
    pub is_available: Option<bool>,
    pub item_type: Option<ItemType>,
}
