//! # Catalog Integration Tests
//!
//! Exercises the catalog against the persistent redb backend, the way the
//! server uses it.

use menuboard_core::{
    Catalog, Category, MenuError, MenuItemUpdate, NewMenuItem, StockDirection, SubCategoryFilter,
    seed::starter_menu,
};
use tempfile::tempdir;

fn redb_catalog() -> (tempfile::TempDir, Catalog) {
    let temp = tempdir().expect("temp dir");
    let catalog = Catalog::with_redb(temp.path().join("menu.redb")).expect("open catalog");
    (temp, catalog)
}

mod stock {
    use super::*;

    #[test]
    fn down_at_zero_yields_zero() {
        let (_temp, mut catalog) = redb_catalog();
        let item = catalog
            .create_item(NewMenuItem::new("라임 소다", Category::Drink))
            .expect("create");

        let adjusted = catalog
            .adjust_stock(item.id, StockDirection::Down)
            .expect("adjust")
            .expect("present");
        assert_eq!(adjusted.stock, 0);
    }

    #[test]
    fn repeated_adjustments_accumulate() {
        let (_temp, mut catalog) = redb_catalog();
        let item = catalog
            .create_item(NewMenuItem::new("망고 스무디", Category::Drink).with_stock(1))
            .expect("create");

        for _ in 0..3 {
            catalog.adjust_stock(item.id, StockDirection::Up).expect("adjust");
        }
        catalog.adjust_stock(item.id, StockDirection::Down).expect("adjust");

        assert_eq!(catalog.get(item.id).expect("get").expect("present").stock, 3);
    }

    #[test]
    fn negative_stock_is_clamped_on_update() {
        let (_temp, mut catalog) = redb_catalog();
        let item = catalog
            .create_item(NewMenuItem::new("a", Category::Food).with_stock(-5))
            .expect("create");
        assert_eq!(item.stock, 0);

        let update = MenuItemUpdate {
            stock: Some(-1),
            ..MenuItemUpdate::default()
        };
        let updated = catalog.update_item(item.id, &update).expect("update").expect("present");
        assert_eq!(updated.stock, 0);
    }
}

mod visibility {
    use super::*;

    #[test]
    fn toggled_item_leaves_public_listing_but_stays_in_admin() {
        let (_temp, mut catalog) = redb_catalog();
        let item = catalog
            .create_item(NewMenuItem::new("레몬 아이스티", Category::Drink).with_stock(2))
            .expect("create");
        assert!(!item.hide);

        let toggled = catalog.toggle_hide(item.id).expect("toggle").expect("present");
        assert!(toggled.hide);

        let listing = catalog
            .public_listing(Category::Drink, SubCategoryFilter::All)
            .expect("listing");
        assert!(listing.items.is_empty());
        assert_eq!(catalog.list_all().expect("list").len(), 1);

        let restored = catalog.toggle_hide(item.id).expect("toggle").expect("present");
        assert!(!restored.hide);
    }

    #[test]
    fn sold_out_items_are_listed_last() {
        let (_temp, mut catalog) = redb_catalog();
        catalog.seed(starter_menu()).expect("seed");

        let bun = catalog
            .list_all()
            .expect("list")
            .into_iter()
            .find(|i| i.name == "Bún bò Huế")
            .expect("seeded");
        catalog.adjust_stock(bun.id, StockDirection::Down).expect("adjust");

        let listing = catalog
            .public_listing(Category::Food, SubCategoryFilter::All)
            .expect("listing");
        let names: Vec<_> = listing.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Phở bò", "Bún bò Huế"]);
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn update_then_delete() {
        let (_temp, mut catalog) = redb_catalog();
        let item = catalog
            .create_item(
                NewMenuItem::new("복숭아 아이스티", Category::Drink)
                    .with_sub_category("tea")
                    .with_meta_info("ICE"),
            )
            .expect("create");

        let update = MenuItemUpdate {
            name: Some("복숭아 티".to_string()),
            category: Some(Category::Food),
            meta_info_description: Some(None),
            ..MenuItemUpdate::default()
        };
        let updated = catalog.update_item(item.id, &update).expect("update").expect("present");
        assert_eq!(updated.name, "복숭아 티");
        assert_eq!(updated.category, Category::Food);
        assert_eq!(updated.meta_info_description, None);
        assert_eq!(updated.sub_category.as_deref(), Some("tea"));
        assert_eq!(updated.created_at, item.created_at);

        catalog.delete_item(item.id).expect("delete");
        assert!(catalog.get(item.id).expect("get").is_none());
        assert!(matches!(
            catalog.delete_item(item.id),
            Err(MenuError::ItemNotFound(_))
        ));
    }

    #[test]
    fn admin_listing_is_creation_order() {
        let (_temp, mut catalog) = redb_catalog();
        catalog.seed(starter_menu()).expect("seed");

        let all = catalog.list_all().expect("list");
        assert_eq!(all.len(), 12);
        assert_eq!(all[0].name, "베트남 연유 커피");
        assert_eq!(all[11].name, "Bún bò Huế");
    }

    #[test]
    fn catalog_survives_reopen() {
        let temp = tempdir().expect("temp dir");
        let path = temp.path().join("menu.redb");
        {
            let mut catalog = Catalog::with_redb(&path).expect("open");
            catalog.seed(starter_menu()).expect("seed");
        }
        let catalog = Catalog::with_redb(&path).expect("reopen");
        assert!(catalog.is_persistent());
        assert_eq!(catalog.stats().expect("stats").total, 12);
    }
}
