//! Category Model

use crate::util::slugify;
use serde::{Deserialize, Serialize};

/// Menu category entity
///
/// Deleting a category does not cascade: menu items keep their
/// `category_id` and simply drop out of category-filtered views until
/// reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<String>,
    pub name: String,
    /// Derived from `name` (lowercase, spaces → hyphens), not unique
    pub slug: String,
}

impl Category {
    /// Build a category with its slug derived from the name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            id: None,
            name,
            slug,
        }
    }
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
}
