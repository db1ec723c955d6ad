//! # CLI Command Implementations
//!
//! Each command resolves what it needs from [`Settings`], does its work
//! synchronously against the core, and prints either text or, with
//! `--json-mode`, pretty JSON.

use crate::api::{self, AppState};
use crate::config::Settings;
use menuboard_core::{
    Catalog, Category, HeroGallery, MenuError, MenuItem, SubCategoryFilter, seed::starter_menu,
};
use serde::Serialize;
use std::fs;

/// Open the redb catalog named by the settings.
pub fn open_catalog(settings: &Settings) -> Result<Catalog, MenuError> {
    Catalog::with_redb(settings.database()?)
}

fn print_json(value: &impl Serialize) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

fn item_line(item: &MenuItem) -> String {
    let mut line = format!("[{}] {} ({}", item.id, item.name, item.category);
    if let Some(sub) = &item.sub_category {
        line.push_str(&format!("/{}", sub));
    }
    line.push_str(&format!(") stock={}", item.stock));
    if item.is_sold_out() {
        line.push_str(" sold-out");
    }
    if item.hide {
        line.push_str(" hidden");
    }
    line
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server. The catalog is opened on the first request.
pub async fn cmd_server(settings: &Settings) -> Result<(), MenuError> {
    let database = settings.database()?;

    println!("menuboard server starting...");
    println!();
    println!("Configuration:");
    println!("  Address:    {}", settings.bind_addr());
    println!("  Database:   {}", database.display());
    println!("  Public dir: {}", settings.public_dir.display());
    println!();
    println!("Pages:");
    println!("  GET  /menu          - Public menu");
    println!("  GET  /admin         - Menu management");
    println!("  GET  /admin/system  - Hero images");
    println!("  GET  /health        - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let state = AppState::lazy(database, &settings.public_dir);
    api::run_server(&settings.bind_addr(), state).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show item counts.
pub fn cmd_status(settings: &Settings, json_mode: bool) -> Result<(), MenuError> {
    let catalog = open_catalog(settings)?;
    let stats = catalog.stats()?;
    let hero_count = HeroGallery::new(&settings.public_dir).list_files()?.len();

    if json_mode {
        print_json(&serde_json::json!({
            "database": settings.database()?.to_string_lossy(),
            "items": stats,
            "hero_images": hero_count,
        }));
        return Ok(());
    }

    println!("Menu Status");
    println!("===========");
    println!("Database: {}", settings.database()?.display());
    println!();
    println!("Items: {}", stats.total);
    for (category, counts) in &stats.by_category {
        println!(
            "  {:<6} {:>3} total, {:>3} hidden, {:>3} sold out",
            category.label(),
            counts.total,
            counts.hidden,
            counts.sold_out
        );
    }
    println!("Hero images: {}", hero_count);

    Ok(())
}

// =============================================================================
// LIST COMMAND
// =============================================================================

/// List items: the public listing of one category, or everything with `all`.
pub fn cmd_list(
    settings: &Settings,
    json_mode: bool,
    category: &str,
    sub: Option<&str>,
    all: bool,
) -> Result<(), MenuError> {
    let catalog = open_catalog(settings)?;

    let items = if all {
        catalog.list_all()?
    } else {
        let category: Category = category.parse()?;
        catalog
            .public_listing(category, SubCategoryFilter::parse(sub))?
            .items
    };

    if json_mode {
        print_json(&items);
        return Ok(());
    }

    if items.is_empty() {
        println!("No items.");
    }
    for item in &items {
        println!("{}", item_line(item));
    }
    Ok(())
}

// =============================================================================
// SEED COMMAND
// =============================================================================

/// Replace the catalog with the starter menu.
pub fn cmd_seed(settings: &Settings, json_mode: bool, force: bool) -> Result<(), MenuError> {
    let mut catalog = open_catalog(settings)?;

    let existing = catalog.stats()?.total;
    if existing > 0 && !force {
        return Err(MenuError::InvalidInput(format!(
            "catalog already holds {} items (use --force to replace them)",
            existing
        )));
    }

    let created = catalog.seed(starter_menu())?;

    if json_mode {
        print_json(&serde_json::json!({ "seeded": created.len() }));
    } else {
        println!("Seeded {} items.", created.len());
    }
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create the database file and the hero image directory.
pub fn cmd_init(settings: &Settings) -> Result<(), MenuError> {
    let database = settings.database()?;
    if let Some(parent) = database.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| MenuError::IoError(e.to_string()))?;
    }
    open_catalog(settings)?;

    let gallery = HeroGallery::new(&settings.public_dir);
    fs::create_dir_all(gallery.dir()).map_err(|e| MenuError::IoError(e.to_string()))?;

    println!("Initialized database: {}", database.display());
    println!("Hero directory:       {}", gallery.dir().display());
    Ok(())
}

// =============================================================================
// HERO COMMANDS
// =============================================================================

/// Print hero images in display order.
pub fn cmd_hero_list(settings: &Settings, json_mode: bool) -> Result<(), MenuError> {
    let images = HeroGallery::new(&settings.public_dir).ordered_images()?;

    if json_mode {
        print_json(&images);
        return Ok(());
    }
    if images.is_empty() {
        println!("No hero images.");
    }
    for (position, path) in images.iter().enumerate() {
        println!("{:>2}. {}", position + 1, path);
    }
    Ok(())
}

/// Save `paths` as the hero order and print the effective order.
pub fn cmd_hero_reorder(
    settings: &Settings,
    json_mode: bool,
    paths: &[String],
) -> Result<(), MenuError> {
    let gallery = HeroGallery::new(&settings.public_dir);
    gallery.save_order(paths)?;
    tracing::info!(count = paths.len(), "Saved hero order");
    cmd_hero_list(settings, json_mode)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn settings_in(dir: &std::path::Path) -> Settings {
        Settings {
            host: "127.0.0.1".to_string(),
            port: 0,
            database: Some(dir.join("menu.redb")),
            public_dir: dir.join("public"),
        }
    }

    #[test]
    fn seed_refuses_to_overwrite_without_force() {
        let temp = tempdir().expect("temp dir");
        let settings = settings_in(temp.path());

        cmd_seed(&settings, true, false).expect("first seed");
        assert!(matches!(
            cmd_seed(&settings, true, false),
            Err(MenuError::InvalidInput(_))
        ));
        cmd_seed(&settings, true, true).expect("forced seed");

        let catalog = open_catalog(&settings).expect("open");
        assert_eq!(catalog.stats().expect("stats").total, 12);
    }

    #[test]
    fn init_creates_database_and_hero_dir() {
        let temp = tempdir().expect("temp dir");
        let mut settings = settings_in(temp.path());
        settings.database = Some(temp.path().join("data").join("menu.redb"));

        cmd_init(&settings).expect("init");
        assert!(temp.path().join("data").join("menu.redb").exists());
        assert!(temp.path().join("public").join("uploads").join("hero").is_dir());
    }

    #[test]
    fn commands_need_a_database() {
        let temp = tempdir().expect("temp dir");
        let settings = Settings {
            database: None,
            ..settings_in(temp.path())
        };
        assert!(matches!(cmd_status(&settings, true), Err(MenuError::Config(_))));
    }

    #[test]
    fn list_rejects_unknown_category() {
        let temp = tempdir().expect("temp dir");
        let settings = settings_in(temp.path());
        assert!(matches!(
            cmd_list(&settings, true, "dessert", None, false),
            Err(MenuError::InvalidInput(_))
        ));
    }

    #[test]
    fn reorder_writes_sidecar() {
        let temp = tempdir().expect("temp dir");
        let settings = settings_in(temp.path());
        let paths = vec!["/uploads/hero/b.jpg".to_string(), "/uploads/hero/a.jpg".to_string()];

        cmd_hero_reorder(&settings, true, &paths).expect("reorder");
        let sidecar: PathBuf = temp.path().join("public/uploads/hero/order.json");
        let saved: Vec<String> =
            serde_json::from_slice(&fs::read(sidecar).expect("read sidecar")).expect("parse");
        assert_eq!(saved, paths);
    }

    #[test]
    fn item_line_marks_state() {
        let item = menuboard_core::NewMenuItem::new("Phở bò", Category::Food)
            .with_sub_category("noodle")
            .into_item(menuboard_core::MenuItemId(3), chrono::Utc::now());
        assert_eq!(item_line(&item), "[3] Phở bò (food/noodle) stock=0 sold-out");
    }
}
