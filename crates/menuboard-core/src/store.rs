//! # Menu Store
//!
//! The storage seam of the core. `MenuStore` is implemented by the
//! in-memory [`InMemoryStore`] and the disk-backed
//! [`RedbMenuStore`](crate::storage::RedbMenuStore).

use crate::{MenuError, MenuItem, MenuItemId, NewMenuItem};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Storage operations over menu items.
///
/// Every method is a single unit of work: a store that supports
/// transactions runs each call in its own transaction.
pub trait MenuStore {
    /// Allocate an id and persist a new item.
    fn insert(&mut self, item: NewMenuItem, created_at: DateTime<Utc>)
    -> Result<MenuItem, MenuError>;

    /// Fetch one item.
    fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError>;

    /// All items, oldest first.
    fn list_all(&self) -> Result<Vec<MenuItem>, MenuError>;

    /// Read-modify-write one item atomically.
    ///
    /// Returns the stored result, or `None` if the item does not exist.
    fn modify<F>(&mut self, id: MenuItemId, f: F) -> Result<Option<MenuItem>, MenuError>
    where
        F: FnOnce(&mut MenuItem);

    /// Permanently remove one item, returning it if it existed.
    fn remove(&mut self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError>;

    /// Remove every item. Ids are not reused afterwards.
    fn clear(&mut self) -> Result<(), MenuError>;

    /// Remove every item and insert `items` in order, as one unit of work.
    ///
    /// Either the whole batch is stored or the previous contents remain.
    fn replace_all(
        &mut self,
        items: Vec<(NewMenuItem, DateTime<Utc>)>,
    ) -> Result<Vec<MenuItem>, MenuError>;

    /// Number of stored items.
    fn count(&self) -> Result<usize, MenuError>;
}

/// Sort into default list order: creation time, then id.
pub(crate) fn sort_by_creation(items: &mut [MenuItem]) {
    items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Volatile store backed by a `BTreeMap`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: BTreeMap<MenuItemId, MenuItem>,
    next_id: u64,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MenuStore for InMemoryStore {
    fn insert(
        &mut self,
        item: NewMenuItem,
        created_at: DateTime<Utc>,
    ) -> Result<MenuItem, MenuError> {
        let id = MenuItemId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let item = item.into_item(id, created_at);
        self.items.insert(id, item.clone());
        Ok(item)
    }

    fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError> {
        Ok(self.items.get(&id).cloned())
    }

    fn list_all(&self) -> Result<Vec<MenuItem>, MenuError> {
        let mut items: Vec<MenuItem> = self.items.values().cloned().collect();
        sort_by_creation(&mut items);
        Ok(items)
    }

    fn modify<F>(&mut self, id: MenuItemId, f: F) -> Result<Option<MenuItem>, MenuError>
    where
        F: FnOnce(&mut MenuItem),
    {
        Ok(self.items.get_mut(&id).map(|item| {
            f(item);
            item.id = id;
            item.clone()
        }))
    }

    fn remove(&mut self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError> {
        Ok(self.items.remove(&id))
    }

    fn clear(&mut self) -> Result<(), MenuError> {
        self.items.clear();
        Ok(())
    }

    fn replace_all(
        &mut self,
        items: Vec<(NewMenuItem, DateTime<Utc>)>,
    ) -> Result<Vec<MenuItem>, MenuError> {
        self.items.clear();
        items
            .into_iter()
            .map(|(item, created_at)| self.insert(item, created_at))
            .collect()
    }

    fn count(&self) -> Result<usize, MenuError> {
        Ok(self.items.len())
    }
}

// =============================================================================
// TESTS
// =============================================================================
