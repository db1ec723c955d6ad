//! # Fixed Constants
//!
//! Compiled-in values shared by the core and the app layer.

/// Image used when an item is created without an upload.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Sub-category filter sentinel meaning "no filter".
pub const SUB_FILTER_ALL: &str = "all";

/// Hero image directory, relative to the public directory.
pub const HERO_DIR: &str = "uploads/hero";

/// Public URL prefix under which hero images are served.
pub const HERO_URL_PREFIX: &str = "/uploads/hero/";

/// Sidecar file holding the persisted hero order, inside the hero directory.
pub const HERO_ORDER_FILE: &str = "order.json";

/// File extensions accepted as hero images (compared case-insensitively).
pub const HERO_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// MIME type assumed for uploads that arrive without one.
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hero_prefix_matches_directory() {
        assert_eq!(HERO_URL_PREFIX, format!("/{}/", HERO_DIR));
    }
}
