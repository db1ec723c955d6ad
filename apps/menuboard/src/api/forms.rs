//! # Form Submissions
//!
//! Every admin write arrives as a `multipart/form-data` POST carrying an
//! `_intent` field. The body is first collected into a [`SubmittedForm`],
//! then mapped to a typed intent. Input is coerced, never rejected:
//!
//! | intent         | fields                                                     |
//! |----------------|------------------------------------------------------------|
//! | `create`       | name, description, metaInfoDescription, category, subCategory, stock, image |
//! | `adjustStock`  | id, direction (`down` or anything else for up)             |
//! | `toggle-hide`  | id, hide (optional; absent flips the flag)                 |
//! | `update-item`  | id + any create field, existingImageUrl                    |
//! | `delete-item`  | id                                                         |
//!
//! Unknown intents and missing or malformed ids map to [`AdminIntent::Ignored`].

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use menuboard_core::primitives::{DEFAULT_IMAGE_MIME, PLACEHOLDER_IMAGE};
use menuboard_core::{
    Category, MenuError, MenuItemId, MenuItemUpdate, NewMenuItem, StockDirection,
};
use std::collections::HashMap;

// =============================================================================
// RAW FORM
// =============================================================================

/// A file part of a multipart submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Browsers send an empty part for a file input left blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Inline the file as a `data:` URL.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        let mime = self
            .content_type
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);
        format!("data:{};base64,{}", mime, STANDARD.encode(&self.bytes))
    }
}

/// Text fields and files of one submission.
///
/// For repeated text fields the first value wins.
#[derive(Debug, Clone, Default)]
pub struct SubmittedForm {
    fields: HashMap<String, String>,
    files: Vec<(String, UploadedFile)>,
}

impl SubmittedForm {
    /// Drain a multipart body.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, MultipartError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await?.to_vec();
                    form.files.push((
                        name,
                        UploadedFile {
                            file_name,
                            content_type,
                            bytes,
                        },
                    ));
                }
                None => {
                    let value = field.text().await?;
                    form.fields.entry(name).or_insert(value);
                }
            }
        }
        Ok(form)
    }

    /// Add a text field.
    #[must_use]
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
        self
    }

    /// Add a file part.
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, file: UploadedFile) -> Self {
        self.files.push((name.into(), file));
        self
    }

    /// Raw text value, if the field was sent.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Trimmed text value, `None` when absent or blank.
    #[must_use]
    pub fn non_empty(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Every non-empty file sent under `name`, in submission order.
    pub fn files<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a UploadedFile> + 'a {
        self.files
            .iter()
            .filter(move |(n, f)| n == name && !f.is_empty())
            .map(|(_, f)| f)
    }

    /// First non-empty file sent under `name`.
    #[must_use]
    pub fn file<'a>(&'a self, name: &'a str) -> Option<&'a UploadedFile> {
        self.files(name).next()
    }

    fn id(&self) -> Option<MenuItemId> {
        self.text("id").and_then(|s| s.parse().ok())
    }
}

/// Parse a stock field: integers only, anything else counts as 0.
#[must_use]
pub fn parse_stock(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

// =============================================================================
// ADMIN INTENTS
// =============================================================================

/// A write requested from the admin page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminIntent {
    Create(NewMenuItem),
    AdjustStock {
        id: MenuItemId,
        direction: StockDirection,
    },
    ToggleHide {
        id: MenuItemId,
        hide: Option<bool>,
    },
    UpdateItem {
        id: MenuItemId,
        update: MenuItemUpdate,
    },
    DeleteItem {
        id: MenuItemId,
    },
    Ignored,
}

impl AdminIntent {
    /// Interpret a submission.
    #[must_use]
    pub fn from_form(form: &SubmittedForm) -> Self {
        match form.text("_intent").unwrap_or_default() {
            "create" => Self::Create(create_input(form)),
            "adjustStock" => form.id().map_or(Self::Ignored, |id| Self::AdjustStock {
                id,
                direction: StockDirection::parse(form.text("direction").unwrap_or("up")),
            }),
            "toggle-hide" => form.id().map_or(Self::Ignored, |id| Self::ToggleHide {
                id,
                hide: form.text("hide").map(|v| v == "true"),
            }),
            "update-item" => form.id().map_or(Self::Ignored, |id| Self::UpdateItem {
                id,
                update: item_update(form),
            }),
            "delete-item" => form.id().map_or(Self::Ignored, |id| Self::DeleteItem { id }),
            _ => Self::Ignored,
        }
    }
}

fn create_input(form: &SubmittedForm) -> NewMenuItem {
    let name = form.text("name").unwrap_or_default().trim();
    let category = form
        .text("category")
        .and_then(Category::parse)
        .unwrap_or_default();

    let mut input = NewMenuItem::new(name, category)
        .with_stock(form.text("stock").map(parse_stock).unwrap_or(0));
    input.description = form.non_empty("description");
    input.meta_info_description = form.non_empty("metaInfoDescription");
    input.sub_category = form.non_empty("subCategory");
    input.image_url = form
        .file("image")
        .map(UploadedFile::to_data_url)
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    input
}

fn item_update(form: &SubmittedForm) -> MenuItemUpdate {
    let present_or_cleared = |name: &str| form.text(name).map(|_| form.non_empty(name));

    MenuItemUpdate {
        name: form.text("name").map(|s| s.trim().to_string()),
        description: present_or_cleared("description"),
        meta_info_description: present_or_cleared("metaInfoDescription"),
        category: form.text("category").and_then(Category::parse),
        sub_category: present_or_cleared("subCategory"),
        image_url: form
            .file("image")
            .map(UploadedFile::to_data_url)
            .or_else(|| form.non_empty("existingImageUrl")),
        stock: form
            .text("stock")
            .filter(|s| !s.is_empty())
            .map(parse_stock),
        hide: None,
    }
}

// =============================================================================
// HERO INTENTS
// =============================================================================

/// A write requested from the hero manager page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroIntent {
    /// Remove one image, given by public path.
    Delete { path: String },
    /// Overwrite the sidecar with this order.
    SaveOrder { order: Vec<String> },
    /// Store every non-empty `heroImages` file.
    Upload { files: Vec<UploadedFile> },
}

impl HeroIntent {
    /// Interpret a submission. Anything but the two named intents is an upload.
    pub fn from_form(form: &SubmittedForm) -> Result<Self, MenuError> {
        match form.text("_intent").unwrap_or_default() {
            "delete-hero-image" => Ok(Self::Delete {
                path: form.text("filePath").unwrap_or_default().to_string(),
            }),
            "save-order" => {
                let raw = form.text("order").unwrap_or_default();
                let order = serde_json::from_str(raw).map_err(|e| {
                    MenuError::InvalidInput(format!("order must be a JSON array of paths: {}", e))
                })?;
                Ok(Self::SaveOrder { order })
            }
            _ => Ok(Self::Upload {
                files: form.files("heroImages").cloned().collect(),
            }),
        }
    }
}
