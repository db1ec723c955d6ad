//! # Core Type Definitions
//!
//! This module contains all domain types for the menu board:
//! - Identifiers and enumerations (`MenuItemId`, `Category`, `StockDirection`)
//! - The persisted record (`MenuItem`)
//! - Write inputs (`NewMenuItem`, `MenuItemUpdate`)
//! - Error types (`MenuError`)
//!
//! ## Stock Invariant
//!
//! Stock is stored as `u32` and every write path goes through [`clamp_stock`],
//! so a negative request becomes zero instead of an error.

use crate::primitives::PLACEHOLDER_IMAGE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier of a menu item.
///
/// Allocated monotonically by the store and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MenuItemId(pub u64);

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MenuItemId {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| MenuError::InvalidInput(format!("invalid item id '{}'", s)))
    }
}

// =============================================================================
// CATEGORY
// =============================================================================

/// Top-level menu grouping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Drink,
    Food,
}

impl Category {
    /// Every category, in tab order.
    pub const ALL: [Self; 2] = [Self::Drink, Self::Food];

    /// Wire name used in forms and query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drink => "drink",
            Self::Food => "food",
        }
    }

    /// Display label used on tabs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Drink => "Drink",
            Self::Food => "Food",
        }
    }

    /// Parse a wire name. Matching is case-sensitive.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "drink" => Some(Self::Drink),
            "food" => Some(Self::Food),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| MenuError::InvalidInput(format!("unknown category '{}'", s)))
    }
}

// =============================================================================
// STOCK
// =============================================================================

/// Direction of a single-step stock adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockDirection {
    Up,
    Down,
}

impl StockDirection {
    /// Parse a form value. Only `"down"` decrements; anything else increments.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s == "down" { Self::Down } else { Self::Up }
    }

    /// Signed step applied to the current stock.
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

/// Clamp a requested stock value into the stored range.
#[must_use]
pub fn clamp_stock(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

// =============================================================================
// MENU ITEM
// =============================================================================

/// A persisted menu record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    /// Short meta line shown under the name (e.g. "ABV 5%").
    pub meta_info_description: Option<String>,
    pub category: Category,
    pub sub_category: Option<String>,
    /// Public URL or `data:` URL.
    pub image_url: String,
    pub stock: u32,
    /// Suppresses the item from the public listing.
    pub hide: bool,
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    /// An item with no stock is shown with a sold-out overlay.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.stock == 0
    }

    /// Whether the item appears on the public menu.
    #[must_use]
    pub fn is_public(&self) -> bool {
        !self.hide
    }
}

/// Input for creating a menu item.
///
/// `stock` is signed so that callers can pass raw form values; it is
/// clamped when the item is materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub meta_info_description: Option<String>,
    pub category: Category,
    pub sub_category: Option<String>,
    pub image_url: String,
    pub stock: i64,
}

impl NewMenuItem {
    /// Create an input with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            description: None,
            meta_info_description: None,
            category,
            sub_category: None,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            stock: 0,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_meta_info(mut self, meta: impl Into<String>) -> Self {
        self.meta_info_description = Some(meta.into());
        self
    }

    #[must_use]
    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    #[must_use]
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    /// Materialize the record. New items are never hidden.
    #[must_use]
    pub fn into_item(self, id: MenuItemId, created_at: DateTime<Utc>) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            description: self.description,
            meta_info_description: self.meta_info_description,
            category: self.category,
            sub_category: self.sub_category,
            image_url: self.image_url,
            stock: clamp_stock(self.stock),
            hide: false,
            created_at,
        }
    }
}

/// Partial update of a menu item.
///
/// `None` leaves a field untouched. For nullable fields the inner `Option`
/// carries the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub meta_info_description: Option<Option<String>>,
    pub category: Option<Category>,
    pub sub_category: Option<Option<String>>,
    pub image_url: Option<String>,
    pub stock: Option<i64>,
    pub hide: Option<bool>,
}

impl MenuItemUpdate {
    /// Update that only sets the hide flag.
    #[must_use]
    pub fn hide(hide: bool) -> Self {
        Self {
            hide: Some(hide),
            ..Self::default()
        }
    }

    /// True when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every provided field to `item`. Stock is clamped.
    pub fn apply_to(&self, item: &mut MenuItem) {
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            item.description.clone_from(description);
        }
        if let Some(meta) = &self.meta_info_description {
            item.meta_info_description.clone_from(meta);
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(sub_category) = &self.sub_category {
            item.sub_category.clone_from(sub_category);
        }
        if let Some(image_url) = &self.image_url {
            item.image_url.clone_from(image_url);
        }
        if let Some(stock) = self.stock {
            item.stock = clamp_stock(stock);
        }
        if let Some(hide) = self.hide {
            item.hide = hide;
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the menu board.
///
/// The core never panics; every fallible operation returns
/// `Result<T, MenuError>`.
#[derive(Debug, Error)]
pub enum MenuError {
    /// No item with this id exists.
    #[error("Menu item not found: {0}")]
    ItemNotFound(MenuItemId),

    /// Caller-supplied data could not be used.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O or database error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

// =============================================================================
// TESTS
// =============================================================================
