//! # Persistent Storage
//!
//! Disk-backed implementations of [`MenuStore`](crate::store::MenuStore).

mod redb_store;

pub use redb_store::RedbMenuStore;
