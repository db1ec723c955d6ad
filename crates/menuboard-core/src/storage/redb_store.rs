//! # redb-backed Menu Storage
//!
//! A disk-backed menu store using the redb embedded database, providing:
//! - ACID transactions (one per store call, including batch replacement)
//! - Crash safety (copy-on-write B-trees)
//! - MVCC (concurrent readers, single writer)
//! - Zero configuration
//!
//! Items are stored as postcard bytes keyed by id. The next id lives in the
//! metadata table so ids survive restarts and are never reused.

use crate::store::{MenuStore, sort_by_creation};
use crate::{MenuError, MenuItem, MenuItemId, NewMenuItem};
use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::Path;

/// Table for items: MenuItemId(u64) -> serialized MenuItem bytes
const ITEMS: TableDefinition<u64, &[u8]> = TableDefinition::new("items");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

const NEXT_ITEM_ID: &str = "next_item_id";

fn io_err(e: impl std::fmt::Display) -> MenuError {
    MenuError::IoError(e.to_string())
}

fn encode(item: &MenuItem) -> Result<Vec<u8>, MenuError> {
    postcard::to_allocvec(item).map_err(|e| MenuError::SerializationError(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<MenuItem, MenuError> {
    postcard::from_bytes(bytes).map_err(|e| MenuError::DeserializationError(e.to_string()))
}

/// A disk-backed menu store using redb.
pub struct RedbMenuStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbMenuStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbMenuStore").finish_non_exhaustive()
    }
}

impl RedbMenuStore {
    /// Open or create a menu database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MenuError> {
        let db = Database::create(path.as_ref()).map_err(io_err)?;

        // Initialize tables if they don't exist
        {
            let write_txn = db.begin_write().map_err(io_err)?;
            let _ = write_txn.open_table(ITEMS).map_err(io_err)?;
            let _ = write_txn.open_table(METADATA).map_err(io_err)?;
            write_txn.commit().map_err(io_err)?;
        }

        tracing::debug!(path = %path.as_ref().display(), "Opened menu database");
        Ok(Self { db })
    }

    /// Compact the database (optional optimization).
    pub fn compact(&mut self) -> Result<(), MenuError> {
        self.db.compact().map_err(io_err)?;
        Ok(())
    }
}

// =============================================================================
// MENUSTORE TRAIT IMPLEMENTATION
// =============================================================================

impl MenuStore for RedbMenuStore {
    fn insert(
        &mut self,
        item: NewMenuItem,
        created_at: DateTime<Utc>,
    ) -> Result<MenuItem, MenuError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        let stored = {
            let mut meta_table = write_txn.open_table(METADATA).map_err(io_err)?;
            let next_id = meta_table
                .get(NEXT_ITEM_ID)
                .map_err(io_err)?
                .map(|v| v.value())
                .unwrap_or(0);
            meta_table
                .insert(NEXT_ITEM_ID, next_id.saturating_add(1))
                .map_err(io_err)?;

            let stored = item.into_item(MenuItemId(next_id), created_at);
            let bytes = encode(&stored)?;
            let mut items_table = write_txn.open_table(ITEMS).map_err(io_err)?;
            items_table.insert(next_id, bytes.as_slice()).map_err(io_err)?;
            stored
        };
        write_txn.commit().map_err(io_err)?;
        Ok(stored)
    }

    fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let items_table = read_txn.open_table(ITEMS).map_err(io_err)?;

        match items_table.get(id.0).map_err(io_err)? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    fn list_all(&self) -> Result<Vec<MenuItem>, MenuError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let items_table = read_txn.open_table(ITEMS).map_err(io_err)?;

        let mut items = Vec::new();
        for entry in items_table.iter().map_err(io_err)? {
            let (_, value) = entry.map_err(io_err)?;
            items.push(decode(value.value())?);
        }
        sort_by_creation(&mut items);
        Ok(items)
    }

    fn modify<F>(&mut self, id: MenuItemId, f: F) -> Result<Option<MenuItem>, MenuError>
    where
        F: FnOnce(&mut MenuItem),
    {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        let updated = {
            let mut items_table = write_txn.open_table(ITEMS).map_err(io_err)?;
            let current = match items_table.get(id.0).map_err(io_err)? {
                Some(data) => Some(decode(data.value())?),
                None => None,
            };

            match current {
                Some(mut item) => {
                    f(&mut item);
                    item.id = id;
                    let bytes = encode(&item)?;
                    items_table.insert(id.0, bytes.as_slice()).map_err(io_err)?;
                    Some(item)
                }
                None => None,
            }
        };

        if updated.is_some() {
            write_txn.commit().map_err(io_err)?;
        } else {
            write_txn.abort().map_err(io_err)?;
        }
        Ok(updated)
    }

    fn remove(&mut self, id: MenuItemId) -> Result<Option<MenuItem>, MenuError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        let removed = {
            let mut items_table = write_txn.open_table(ITEMS).map_err(io_err)?;
            match items_table.remove(id.0).map_err(io_err)? {
                Some(data) => Some(decode(data.value())?),
                None => None,
            }
        };
        write_txn.commit().map_err(io_err)?;
        Ok(removed)
    }

    fn clear(&mut self) -> Result<(), MenuError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        {
            let mut items_table = write_txn.open_table(ITEMS).map_err(io_err)?;
            let mut keys = Vec::new();
            for entry in items_table.iter().map_err(io_err)? {
                let (key, _) = entry.map_err(io_err)?;
                keys.push(key.value());
            }
            for key in keys {
                items_table.remove(key).map_err(io_err)?;
            }
        }
        write_txn.commit().map_err(io_err)?;
        Ok(())
    }

    fn replace_all(
        &mut self,
        items: Vec<(NewMenuItem, DateTime<Utc>)>,
    ) -> Result<Vec<MenuItem>, MenuError> {
        let write_txn = self.db.begin_write().map_err(io_err)?;
        let stored = {
            let mut items_table = write_txn.open_table(ITEMS).map_err(io_err)?;
            let mut keys = Vec::new();
            for entry in items_table.iter().map_err(io_err)? {
                let (key, _) = entry.map_err(io_err)?;
                keys.push(key.value());
            }
            for key in keys {
                items_table.remove(key).map_err(io_err)?;
            }

            let mut meta_table = write_txn.open_table(METADATA).map_err(io_err)?;
            let mut next_id = meta_table
                .get(NEXT_ITEM_ID)
                .map_err(io_err)?
                .map(|v| v.value())
                .unwrap_or(0);

            let mut stored = Vec::with_capacity(items.len());
            for (item, created_at) in items {
                let item = item.into_item(MenuItemId(next_id), created_at);
                let bytes = encode(&item)?;
                items_table.insert(next_id, bytes.as_slice()).map_err(io_err)?;
                next_id = next_id.saturating_add(1);
                stored.push(item);
            }
            meta_table.insert(NEXT_ITEM_ID, next_id).map_err(io_err)?;
            stored
        };
        // Dropping the transaction on an early return aborts it.
        write_txn.commit().map_err(io_err)?;
        Ok(stored)
    }

    fn count(&self) -> Result<usize, MenuError> {
        let read_txn = self.db.begin_read().map_err(io_err)?;
        let items_table = read_txn.open_table(ITEMS).map_err(io_err)?;
        let count = items_table.len().map_err(io_err)?;
        Ok(count as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
