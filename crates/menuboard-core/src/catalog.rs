//! # Catalog
//!
//! The catalog is the single entry point for every menu item operation. It
//! owns a storage backend and applies the domain rules on top of it:
//! stock clamping, hide semantics, public/admin listings.
//!
//! ## Storage Backends
//!
//! - `InMemory`: volatile [`InMemoryStore`] (tests, demos)
//! - `Persistent`: [`RedbMenuStore`] for disk-backed ACID storage

use crate::listing::{MenuListing, SubCategoryFilter, derive_listing};
use crate::storage::RedbMenuStore;
use crate::store::{InMemoryStore, MenuStore};
use crate::{
    Category, MenuError, MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem, StockDirection,
    clamp_stock,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Storage backend for a Catalog.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory store (fast, volatile).
    InMemory(InMemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbMenuStore),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::InMemory(InMemoryStore::new())
    }
}

/// Dispatch a `MenuStore` call to whichever backend is active.
macro_rules! with_store {
    ($backend:expr, $store:ident => $body:expr) => {
        match $backend {
            StorageBackend::InMemory($store) => $body,
            StorageBackend::Persistent($store) => $body,
        }
    };
}

/// Per-category counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: usize,
    pub hidden: usize,
    pub sold_out: usize,
}

/// Item counts across the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total: usize,
    pub by_category: BTreeMap<Category, CategoryStats>,
}

/// Menu item operations over a storage backend.
#[derive(Debug, Default)]
pub struct Catalog {
    backend: StorageBackend,
}

impl Catalog {
    /// Create an empty catalog with in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with persistent redb storage.
    ///
    /// Opens or creates a redb database at the given path.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        Ok(Self {
            backend: StorageBackend::Persistent(RedbMenuStore::open(path)?),
        })
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Create a new, visible item. Stock is clamped at zero.
    pub fn create_item(&mut self, input: NewMenuItem) -> Result<MenuItem, MenuError> {
        let item = with_store!(&mut self.backend, s => s.insert(input, Utc::now()))?;
        tracing::info!(id = %item.id, name = %item.name, category = %item.category, "Created menu item");
        Ok(item)
    }

    /// Move stock one step up or down, never below zero.
    ///
    /// Returns `None` for an unknown id. The read and the write happen in one
    /// store call, so concurrent adjustments do not lose updates.
    pub fn adjust_stock(
        &mut self,
        id: MenuItemId,
        direction: StockDirection,
    ) -> Result<Option<MenuItem>, MenuError> {
        let delta = direction.delta();
        let updated = with_store!(&mut self.backend, s => s.modify(id, |item| {
            item.stock = clamp_stock(i64::from(item.stock) + delta);
        }))?;
        match &updated {
            Some(item) => tracing::debug!(id = %id, stock = item.stock, "Adjusted stock"),
            None => tracing::warn!(id = %id, "Stock adjustment for unknown item"),
        }
        Ok(updated)
    }

    /// Flip the hide flag.
    pub fn toggle_hide(&mut self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError> {
        with_store!(&mut self.backend, s => s.modify(id, |item| item.hide = !item.hide))
    }

    /// Set the hide flag explicitly.
    pub fn set_hide(&mut self, id: MenuItemId, hide: bool) -> Result<Option<MenuItem>, MenuError> {
        self.update_item(id, &MenuItemUpdate::hide(hide))
    }

    /// Apply a partial update. Returns `None` for an unknown id.
    pub fn update_item(
        &mut self,
        id: MenuItemId,
        update: &MenuItemUpdate,
    ) -> Result<Option<MenuItem>, MenuError> {
        let updated = with_store!(&mut self.backend, s => s.modify(id, |item| update.apply_to(item)))?;
        if updated.is_some() {
            tracing::info!(id = %id, "Updated menu item");
        }
        Ok(updated)
    }

    /// Permanently delete an item.
    pub fn delete_item(&mut self, id: MenuItemId) -> Result<MenuItem, MenuError> {
        let removed = with_store!(&mut self.backend, s => s.remove(id))?;
        let item = removed.ok_or(MenuError::ItemNotFound(id))?;
        tracing::info!(id = %id, name = %item.name, "Deleted menu item");
        Ok(item)
    }

    /// Replace every item with `items`.
    ///
    /// The replacement is atomic: on error the previous items are kept.
    pub fn seed(&mut self, items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>, MenuError> {
        let now = Utc::now();
        // Distinct timestamps keep seed order as creation order.
        let batch: Vec<_> = items
            .into_iter()
            .enumerate()
            .map(|(offset, input)| (input, now + chrono::Duration::milliseconds(offset as i64)))
            .collect();
        let created = with_store!(&mut self.backend, s => s.replace_all(batch))?;
        tracing::info!(count = created.len(), "Seeded menu");
        Ok(created)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Fetch one item.
    pub fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError> {
        with_store!(&self.backend, s => s.get(id))
    }

    /// Every item, oldest first (the admin listing).
    pub fn list_all(&self) -> Result<Vec<MenuItem>, MenuError> {
        with_store!(&self.backend, s => s.list_all())
    }

    /// Visible items of one category, oldest first.
    pub fn list_public(&self, category: Category) -> Result<Vec<MenuItem>, MenuError> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|i| i.category == category && i.is_public())
            .collect())
    }

    /// Visible, in-stock items of one category, oldest first.
    pub fn list_public_available(&self, category: Category) -> Result<Vec<MenuItem>, MenuError> {
        Ok(self
            .list_public(category)?
            .into_iter()
            .filter(|i| !i.is_sold_out())
            .collect())
    }

    /// The public menu for one category: tabs, filter and display order.
    pub fn public_listing(
        &self,
        category: Category,
        filter: SubCategoryFilter,
    ) -> Result<MenuListing, MenuError> {
        Ok(derive_listing(self.list_public(category)?, category, filter))
    }

    /// Item counts.
    pub fn stats(&self) -> Result<CatalogStats, MenuError> {
        let items = self.list_all()?;
        let mut stats = CatalogStats {
            total: items.len(),
            by_category: Category::ALL
                .into_iter()
                .map(|c| (c, CategoryStats::default()))
                .collect(),
        };
        for item in &items {
            let entry = stats.by_category.entry(item.category).or_default();
            entry.total += 1;
            if item.hide {
                entry.hidden += 1;
            }
            if item.is_sold_out() {
                entry.sold_out += 1;
            }
        }
        Ok(stats)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog_with(items: Vec<NewMenuItem>) -> (Catalog, Vec<MenuItem>) {
        let mut catalog = Catalog::new();
        let created = items
            .into_iter()
            .map(|i| catalog.create_item(i).unwrap())
            .collect();
        (catalog, created)
    }

    #[test]
    fn stock_down_at_zero_stays_zero() {
        let (mut catalog, items) = catalog_with(vec![NewMenuItem::new("a", Category::Drink)]);
        let item = catalog
            .adjust_stock(items[0].id, StockDirection::Down)
            .unwrap()
            .unwrap();
        assert_eq!(item.stock, 0);
    }

    #[test]
    fn stock_up_increments() {
        let (mut catalog, items) =
            catalog_with(vec![NewMenuItem::new("a", Category::Drink).with_stock(2)]);
        let item = catalog
            .adjust_stock(items[0].id, StockDirection::Up)
            .unwrap()
            .unwrap();
        assert_eq!(item.stock, 3);
    }

    #[test]
    fn adjust_unknown_item_is_noop() {
        let mut catalog = Catalog::new();
        assert!(catalog.adjust_stock(MenuItemId(9), StockDirection::Up).unwrap().is_none());
    }

    #[test]
    fn hidden_items_leave_public_listing_only() {
        let (mut catalog, items) = catalog_with(vec![
            NewMenuItem::new("a", Category::Drink).with_stock(1),
            NewMenuItem::new("b", Category::Drink).with_stock(1),
        ]);
        let toggled = catalog.toggle_hide(items[0].id).unwrap().unwrap();
        assert!(toggled.hide);

        let public: Vec<_> = catalog
            .list_public(Category::Drink)
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(public, vec!["b"]);
        assert_eq!(catalog.list_all().unwrap().len(), 2);
    }

    #[test]
    fn sold_out_items_stay_listed() {
        let (catalog, _) = catalog_with(vec![NewMenuItem::new("a", Category::Food)]);
        assert_eq!(catalog.list_public(Category::Food).unwrap().len(), 1);
        assert!(catalog.list_public_available(Category::Food).unwrap().is_empty());
    }

    #[test]
    fn delete_unknown_item_errors() {
        let mut catalog = Catalog::new();
        assert!(matches!(
            catalog.delete_item(MenuItemId(3)),
            Err(MenuError::ItemNotFound(MenuItemId(3)))
        ));
    }

    #[test]
    fn seed_replaces_everything() {
        let (mut catalog, _) = catalog_with(vec![NewMenuItem::new("old", Category::Drink)]);
        let created = catalog
            .seed(vec![
                NewMenuItem::new("first", Category::Drink),
                NewMenuItem::new("second", Category::Food),
            ])
            .unwrap();
        assert_eq!(created.len(), 2);
        let names: Vec<_> = catalog.list_all().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn stats_count_hidden_and_sold_out() {
        let (mut catalog, items) = catalog_with(vec![
            NewMenuItem::new("a", Category::Drink),
            NewMenuItem::new("b", Category::Drink).with_stock(3),
            NewMenuItem::new("c", Category::Food).with_stock(1),
        ]);
        catalog.set_hide(items[1].id, true).unwrap();

        let stats = catalog.stats().unwrap();
        assert_eq!(stats.total, 3);
        let drink = stats.by_category[&Category::Drink];
        assert_eq!((drink.total, drink.hidden, drink.sold_out), (2, 1, 1));
        assert_eq!(stats.by_category[&Category::Food].total, 1);
    }
}
