//! # Property-Based Tests
//!
//! Invariants of the listing derivation and the hero order reconciler,
//! checked with proptest.

use chrono::Utc;
use menuboard_core::{
    Category, MenuItem, MenuItemId, NewMenuItem, SubCategoryFilter, compare_names,
    derive_listing, distinct_sub_categories, reconcile,
};
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeSet;

// =============================================================================
// STRATEGIES
// =============================================================================

fn arb_item() -> impl Strategy<Value = (String, Option<String>, i64)> {
    (
        "[가-힣a-zA-Z ]{0,8}",
        proptest::option::of("(beer|wine|coffee|Beer)"),
        -2i64..4,
    )
}

fn build(rows: Vec<(String, Option<String>, i64)>) -> Vec<MenuItem> {
    rows.into_iter()
        .enumerate()
        .map(|(id, (name, sub, stock))| {
            let mut input = NewMenuItem::new(name, Category::Drink).with_stock(stock);
            input.sub_category = sub;
            input.into_item(MenuItemId(id as u64), Utc::now())
        })
        .collect()
}

fn arb_paths() -> impl Strategy<Value = Vec<String>> {
    btree_set("[a-e]{1,2}\\.jpg", 0..8).prop_map(|set| set.into_iter().collect())
}

// =============================================================================
// LISTING PROPERTIES
// =============================================================================

proptest! {
    /// Filtering with "all" drops nothing.
    #[test]
    fn filter_all_keeps_every_item(rows in vec(arb_item(), 0..30)) {
        let items = build(rows);
        let len = items.len();
        let listing = derive_listing(items, Category::Drink, SubCategoryFilter::All);
        prop_assert_eq!(listing.items.len(), len);
    }

    /// No sold-out item precedes an in-stock item.
    #[test]
    fn sold_out_never_precedes_in_stock(rows in vec(arb_item(), 0..30)) {
        let listing = derive_listing(build(rows), Category::Drink, SubCategoryFilter::All);
        let first_sold_out = listing.items.iter().position(MenuItem::is_sold_out);
        if let Some(idx) = first_sold_out {
            prop_assert!(listing.items[idx..].iter().all(MenuItem::is_sold_out));
        }
    }

    /// Within one stock group, names are in collation order.
    #[test]
    fn names_ordered_within_stock_group(rows in vec(arb_item(), 0..30)) {
        let listing = derive_listing(build(rows), Category::Drink, SubCategoryFilter::All);
        for pair in listing.items.windows(2) {
            if pair[0].is_sold_out() == pair[1].is_sold_out() {
                prop_assert_ne!(compare_names(&pair[0].name, &pair[1].name), Ordering::Greater);
            }
        }
    }

    /// A specific filter keeps exactly the matching items.
    #[test]
    fn filter_keeps_exact_matches(rows in vec(arb_item(), 0..30)) {
        let items = build(rows);
        let expected = items.iter().filter(|i| i.sub_category.as_deref() == Some("beer")).count();
        let listing = derive_listing(items, Category::Drink, SubCategoryFilter::Only("beer".into()));
        prop_assert_eq!(listing.items.len(), expected);
        prop_assert!(listing.items.iter().all(|i| i.sub_category.as_deref() == Some("beer")));
    }

    /// Sub-category tabs are distinct.
    #[test]
    fn sub_categories_are_distinct(rows in vec(arb_item(), 0..30)) {
        let subs = distinct_sub_categories(&build(rows));
        let unique: BTreeSet<_> = subs.iter().collect();
        prop_assert_eq!(unique.len(), subs.len());
    }
}

// =============================================================================
// RECONCILER PROPERTIES
// =============================================================================

proptest! {
    /// Reconciling an already reconciled order changes nothing.
    #[test]
    fn reconcile_is_idempotent(files in arb_paths(), saved in vec("[a-e]{1,2}\\.jpg", 0..8)) {
        let once = reconcile(&files, &saved);
        let twice = reconcile(&files, &once);
        prop_assert_eq!(once, twice);
    }

    /// The result is exactly the current file set.
    #[test]
    fn reconcile_is_a_permutation_of_files(files in arb_paths(), saved in arb_paths()) {
        let result = reconcile(&files, &saved);
        let got: BTreeSet<_> = result.iter().collect();
        let want: BTreeSet<_> = files.iter().collect();
        prop_assert_eq!(result.len(), files.len());
        prop_assert_eq!(got, want);
    }

    /// Saved entries that survive keep their relative order.
    #[test]
    fn reconcile_preserves_saved_order(files in arb_paths(), saved in arb_paths()) {
        let result = reconcile(&files, &saved);
        let kept: Vec<_> = saved.iter().filter(|s| files.contains(*s)).collect();
        let prefix: Vec<_> = result.iter().take(kept.len()).collect();
        prop_assert_eq!(prefix, kept);
    }
}

#[test]
fn reconcile_example() {
    let saved = vec!["a.jpg".to_string(), "b.jpg".to_string()];
    let files = vec!["b.jpg".to_string(), "c.jpg".to_string()];
    assert_eq!(reconcile(&files, &saved), vec!["b.jpg", "c.jpg"]);
}
