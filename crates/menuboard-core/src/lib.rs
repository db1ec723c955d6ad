//! # menuboard-core
//!
//! The menu engine for menuboard - THE LOGIC.
//!
//! This crate holds everything the menu board knows independent of HTTP:
//! - the item model and its write rules (`types`)
//! - the public listing derivation: sub-category tabs, filter, display order (`listing`)
//! - hero image ordering reconciled against the image directory (`hero`)
//! - storage behind the `MenuStore` trait, in memory or in redb (`store`, `storage`)
//! - the `Catalog`, which every app-layer operation goes through (`catalog`)
//!
//! ## Architectural Constraints
//!
//! - NO async, NO network dependencies (pure Rust)
//! - Never panics; every fallible call returns `Result<T, MenuError>`
//! - Listing and reconciliation are pure functions over their inputs

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod collation;
pub mod hero;
pub mod listing;
pub mod primitives;
pub mod seed;
pub mod storage;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Category, MenuError, MenuItem, MenuItemId, MenuItemUpdate, NewMenuItem, StockDirection,
    clamp_stock,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::{Catalog, CatalogStats, CategoryStats, StorageBackend};
pub use collation::compare_names;
pub use hero::{HeroGallery, reconcile};
pub use listing::{
    MenuListing, SubCategoryFilter, derive_listing, distinct_sub_categories, sort_for_display,
    sub_category_options,
};
pub use storage::RedbMenuStore;
pub use store::{InMemoryStore, MenuStore};
