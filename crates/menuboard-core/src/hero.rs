//! # Hero Images
//!
//! Landing-page banner images live as plain files in `<public>/uploads/hero`.
//! Their display order is kept in a sidecar `order.json` (a JSON array of
//! public paths) and reconciled against the directory on every read:
//!
//! ```text
//! saved = ["/uploads/hero/a.jpg", "/uploads/hero/b.jpg"]
//! files = ["/uploads/hero/b.jpg", "/uploads/hero/c.jpg"]
//! order = ["/uploads/hero/b.jpg", "/uploads/hero/c.jpg"]
//! ```
//!
//! Saved entries whose file is gone are dropped; files missing from the
//! sidecar are appended in directory order. Writing a new order overwrites
//! the sidecar wholesale.

use crate::MenuError;
use crate::primitives::{HERO_DIR, HERO_EXTENSIONS, HERO_ORDER_FILE, HERO_URL_PREFIX};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// =============================================================================
// RECONCILER
// =============================================================================

/// Merge a saved order with the files actually present.
///
/// Result = saved entries still in `files` (saved order) followed by the
/// entries of `files` not in `saved` (files order). A path repeated in
/// `saved` is repeated in the result.
pub fn reconcile(files: &[String], saved: &[String]) -> Vec<String> {
    let present: HashSet<&str> = files.iter().map(String::as_str).collect();
    let known: HashSet<&str> = saved.iter().map(String::as_str).collect();

    saved
        .iter()
        .filter(|s| present.contains(s.as_str()))
        .chain(files.iter().filter(|f| !known.contains(f.as_str())))
        .cloned()
        .collect()
}

/// Parse sidecar contents as a list of paths.
pub fn parse_saved_order(data: &[u8]) -> Result<Vec<String>, MenuError> {
    serde_json::from_slice(data).map_err(|e| MenuError::DeserializationError(e.to_string()))
}

/// Whether `name` carries an accepted image extension.
pub fn is_hero_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| HERO_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Normalize an uploaded file name.
///
/// Keeps only the final path component, replaces each whitespace run with
/// `_` and lower-cases the extension. Returns `None` if nothing usable is
/// left.
pub fn normalize_upload_name(original: &str) -> Option<String> {
    let last = original.rsplit(['/', '\\']).next().unwrap_or(original);

    let mut collapsed = String::with_capacity(last.len());
    let mut in_space = false;
    for ch in last.chars() {
        if ch.is_whitespace() {
            if !in_space {
                collapsed.push('_');
            }
            in_space = true;
        } else {
            collapsed.push(ch);
            in_space = false;
        }
    }

    let name = match collapsed.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => format!("{}.{}", base, ext.to_lowercase()),
        _ => collapsed,
    };

    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

// =============================================================================
// GALLERY
// =============================================================================

/// The hero image directory and its order sidecar.
#[derive(Debug, Clone)]
pub struct HeroGallery {
    dir: PathBuf,
}

impl HeroGallery {
    /// Gallery rooted at `<public_dir>/uploads/hero`.
    #[must_use]
    pub fn new(public_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: public_dir.as_ref().join(HERO_DIR),
        }
    }

    /// Directory holding the images.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn order_file(&self) -> PathBuf {
        self.dir.join(HERO_ORDER_FILE)
    }

    /// Public paths of every image in the directory, in read order.
    ///
    /// A missing directory is an empty gallery.
    pub fn list_files(&self) -> Result<Vec<String>, MenuError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MenuError::IoError(e.to_string())),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| MenuError::IoError(e.to_string()))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if is_hero_image(name) && entry.path().is_file() {
                files.push(format!("{}{}", HERO_URL_PREFIX, name));
            }
        }
        Ok(files)
    }

    /// The saved order, or an empty list when there is no usable sidecar.
    ///
    /// A sidecar that exists but cannot be parsed is logged and ignored.
    pub fn saved_order(&self) -> Vec<String> {
        let data = match fs::read(self.order_file()) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, path = ?self.order_file(), "Cannot read hero order file");
                return Vec::new();
            }
        };

        parse_saved_order(&data).unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = ?self.order_file(), "Ignoring malformed hero order file");
            Vec::new()
        })
    }

    /// Images in display order.
    pub fn ordered_images(&self) -> Result<Vec<String>, MenuError> {
        let files = self.list_files()?;
        Ok(reconcile(&files, &self.saved_order()))
    }

    /// Overwrite the sidecar with `order`.
    pub fn save_order(&self, order: &[String]) -> Result<(), MenuError> {
        fs::create_dir_all(&self.dir).map_err(|e| MenuError::IoError(e.to_string()))?;
        let json = serde_json::to_string_pretty(order)
            .map_err(|e| MenuError::SerializationError(e.to_string()))?;
        fs::write(self.order_file(), json).map_err(|e| MenuError::IoError(e.to_string()))?;
        tracing::info!(count = order.len(), "Saved hero image order");
        Ok(())
    }

    /// Store an uploaded image and return its public path.
    ///
    /// Returns `Ok(None)` for empty uploads. An existing file with the same
    /// normalized name is overwritten.
    pub fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<Option<String>, MenuError> {
        if bytes.is_empty() {
            return Ok(None);
        }
        let name = normalize_upload_name(file_name)
            .ok_or_else(|| MenuError::InvalidInput(format!("unusable file name '{}'", file_name)))?;
        if !is_hero_image(&name) {
            return Err(MenuError::InvalidInput(format!(
                "'{}' is not a jpg, jpeg, png or webp image",
                name
            )));
        }

        fs::create_dir_all(&self.dir).map_err(|e| MenuError::IoError(e.to_string()))?;
        fs::write(self.dir.join(&name), bytes).map_err(|e| MenuError::IoError(e.to_string()))?;

        let public = format!("{}{}", HERO_URL_PREFIX, name);
        tracing::info!(path = %public, size = bytes.len(), "Uploaded hero image");
        Ok(Some(public))
    }

    /// Delete the image at `public_path`.
    ///
    /// Only files directly inside the hero directory can be addressed.
    /// Returns whether a file was removed.
    pub fn delete(&self, public_path: &str) -> Result<bool, MenuError> {
        let path = self.resolve(public_path)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %public_path, "Deleted hero image");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(MenuError::IoError(e.to_string())),
        }
    }

    fn resolve(&self, public_path: &str) -> Result<PathBuf, MenuError> {
        let name = public_path
            .strip_prefix(HERO_URL_PREFIX)
            .filter(|n| !n.is_empty() && !n.contains(['/', '\\']) && *n != "..")
            .ok_or_else(|| {
                MenuError::InvalidInput(format!("'{}' is not a hero image path", public_path))
            })?;
        if name == HERO_ORDER_FILE {
            return Err(MenuError::InvalidInput(
                "the order file cannot be deleted".to_string(),
            ));
        }
        Ok(self.dir.join(name))
    }
}

// =============================================================================
// TESTS
// =============================================================================
