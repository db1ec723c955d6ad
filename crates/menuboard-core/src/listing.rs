//! # Menu Listing Deriver
//!
//! Turns the raw records of one category into what the public menu shows:
//! the sub-category tabs, the filtered item set, and its display order.
//!
//! Display order is a stable two-key sort:
//! 1. in-stock items before sold-out items
//! 2. name under Korean collation
//!
//! Every function here is pure; empty input yields empty output.

use crate::collation::compare_names;
use crate::primitives::SUB_FILTER_ALL;
use crate::{Category, MenuItem};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

// =============================================================================
// SUB-CATEGORY FILTER
// =============================================================================

/// Active sub-category selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SubCategoryFilter {
    /// No filtering (the `"all"` sentinel).
    #[default]
    All,
    /// Keep only items with exactly this sub-category (case-sensitive).
    Only(String),
}

impl SubCategoryFilter {
    /// Parse a query/form value. Missing, empty and `"all"` mean [`Self::All`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None | Some("") | Some(SUB_FILTER_ALL) => Self::All,
            Some(sub) => Self::Only(sub.to_string()),
        }
    }

    /// Wire value, the inverse of [`Self::parse`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => SUB_FILTER_ALL,
            Self::Only(sub) => sub,
        }
    }

    /// Whether `item` passes this filter.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(sub) => item.sub_category.as_deref() == Some(sub.as_str()),
        }
    }
}

impl From<SubCategoryFilter> for String {
    fn from(filter: SubCategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl From<String> for SubCategoryFilter {
    fn from(value: String) -> Self {
        Self::parse(Some(value.as_str()))
    }
}

// =============================================================================
// DERIVATION STEPS
// =============================================================================

/// Distinct non-empty sub-categories, in order of first encounter.
pub fn distinct_sub_categories<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    let mut seen = HashSet::new();
    let mut subs = Vec::new();
    for sub in items
        .into_iter()
        .filter_map(|i| i.sub_category.as_deref())
        .filter(|s| !s.is_empty())
    {
        if seen.insert(sub) {
            subs.push(sub.to_string());
        }
    }
    subs
}

/// Per-category sub-category options across a mixed collection.
///
/// Every category has an entry, possibly empty.
pub fn sub_category_options(items: &[MenuItem]) -> BTreeMap<Category, Vec<String>> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let subs = distinct_sub_categories(items.iter().filter(|i| i.category == category));
            (category, subs)
        })
        .collect()
}

/// Keep items matching `filter`, preserving input order.
pub fn filter_by_sub_category(items: Vec<MenuItem>, filter: &SubCategoryFilter) -> Vec<MenuItem> {
    match filter {
        SubCategoryFilter::All => items,
        SubCategoryFilter::Only(_) => items.into_iter().filter(|i| filter.matches(i)).collect(),
    }
}

/// Display comparator: in-stock first, then name.
pub fn display_order(a: &MenuItem, b: &MenuItem) -> Ordering {
    a.is_sold_out()
        .cmp(&b.is_sold_out())
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Stable sort into display order.
pub fn sort_for_display(items: &mut [MenuItem]) {
    items.sort_by(display_order);
}

// =============================================================================
// LISTING
// =============================================================================

/// Everything the public menu needs for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuListing {
    pub category: Category,
    /// Sub-category tabs, computed before filtering.
    pub sub_categories: Vec<String>,
    pub active: SubCategoryFilter,
    /// Filtered items in display order.
    pub items: Vec<MenuItem>,
}

/// Derive the listing for one category.
///
/// `items` is expected to hold only records of `category`; order is
/// irrelevant.
pub fn derive_listing(
    items: Vec<MenuItem>,
    category: Category,
    active: SubCategoryFilter,
) -> MenuListing {
    let sub_categories = distinct_sub_categories(&items);
    let mut filtered = filter_by_sub_category(items, &active);
    sort_for_display(&mut filtered);

    MenuListing {
        category,
        sub_categories,
        active,
        items: filtered,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MenuItemId, NewMenuItem};
    use chrono::Utc;

    fn item(id: u64, name: &str, sub: Option<&str>, stock: i64) -> MenuItem {
        let mut input = NewMenuItem::new(name, Category::Drink).with_stock(stock);
        if let Some(sub) = sub {
            input = input.with_sub_category(sub);
        }
        input.into_item(MenuItemId(id), Utc::now())
    }

    fn names(items: &[MenuItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn sub_categories_in_first_encounter_order() {
        let items = vec![
            item(1, "a", Some("wine"), 1),
            item(2, "b", None, 1),
            item(3, "c", Some("beer"), 1),
            item(4, "d", Some("wine"), 1),
        ];
        assert_eq!(distinct_sub_categories(&items), vec!["wine", "beer"]);
    }

    #[test]
    fn empty_sub_category_makes_no_tab() {
        let items = vec![item(1, "a", Some(""), 1), item(2, "b", Some("tea"), 1)];
        assert_eq!(distinct_sub_categories(&items), vec!["tea"]);
    }

    #[test]
    fn filter_is_exact_and_case_sensitive() {
        let items = vec![
            item(1, "a", Some("Beer"), 1),
            item(2, "b", Some("beer"), 1),
            item(3, "c", None, 1),
        ];
        let kept = filter_by_sub_category(items, &SubCategoryFilter::Only("beer".into()));
        assert_eq!(names(&kept), vec!["b"]);
    }

    #[test]
    fn sold_out_items_sink_to_the_end() {
        let items = vec![
            item(1, "바나나 스무디", None, 0),
            item(2, "망고 스무디", None, 4),
            item(3, "라임 소다", None, 0),
            item(4, "레몬 아이스티", None, 11),
        ];
        let listing = derive_listing(items, Category::Drink, SubCategoryFilter::All);
        assert_eq!(
            names(&listing.items),
            vec!["레몬 아이스티", "망고 스무디", "라임 소다", "바나나 스무디"]
        );
    }

    #[test]
    fn tabs_are_computed_before_filtering() {
        let items = vec![
            item(1, "a", Some("beer"), 1),
            item(2, "b", Some("wine"), 1),
        ];
        let listing = derive_listing(items, Category::Drink, SubCategoryFilter::Only("wine".into()));
        assert_eq!(listing.sub_categories, vec!["beer", "wine"]);
        assert_eq!(names(&listing.items), vec!["b"]);
    }

    #[test]
    fn empty_input_yields_empty_listing() {
        let listing = derive_listing(Vec::new(), Category::Food, SubCategoryFilter::All);
        assert!(listing.items.is_empty());
        assert!(listing.sub_categories.is_empty());
    }

    #[test]
    fn filter_parse_sentinels() {
        assert_eq!(SubCategoryFilter::parse(None), SubCategoryFilter::All);
        assert_eq!(SubCategoryFilter::parse(Some("")), SubCategoryFilter::All);
        assert_eq!(SubCategoryFilter::parse(Some("all")), SubCategoryFilter::All);
        assert_eq!(
            SubCategoryFilter::parse(Some("coffee")),
            SubCategoryFilter::Only("coffee".into())
        );
    }

    #[test]
    fn options_cover_every_category() {
        let mut food = item(2, "Phở bò", Some("noodle"), 9);
        food.category = Category::Food;
        let items = vec![item(1, "a", Some("coffee"), 1), food];

        let options = sub_category_options(&items);
        assert_eq!(options[&Category::Drink], vec!["coffee"]);
        assert_eq!(options[&Category::Food], vec!["noodle"]);
    }
}
