//! # API Endpoint Handlers
//!
//! Page handlers render maud markup; form handlers apply one intent and
//! redirect back to the page they came from.

use super::{
    AppState,
    forms::{AdminIntent, HeroIntent, SubmittedForm},
    pages,
    types::{ApiError, HealthResponse, HeroResponse, MenuQuery, SaveOrderResponse},
};
use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
};
use menuboard_core::{
    Category, MenuError, MenuItemId, SubCategoryFilter, sub_category_options,
};

/// Category and filter selected by a query string. Unknown categories fall
/// back to the default.
fn selection(query: &MenuQuery) -> (Category, SubCategoryFilter) {
    let category = query
        .category
        .as_deref()
        .and_then(Category::parse)
        .unwrap_or_default();
    (category, SubCategoryFilter::parse(query.sub.as_deref()))
}

/// Hero images for display. Failures are logged and leave the strip empty.
fn hero_images(state: &AppState) -> Vec<String> {
    state.hero.ordered_images().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Could not list hero images");
        Vec::new()
    })
}

async fn read_form(multipart: Multipart) -> Result<SubmittedForm, ApiError> {
    Ok(SubmittedForm::from_multipart(multipart).await?)
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// PUBLIC PAGES
// =============================================================================

/// `/` always lands on the menu.
pub async fn index_handler() -> Redirect {
    Redirect::to("/menu")
}

/// Public menu for one category.
pub async fn menu_handler(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Html<String>, ApiError> {
    let (category, filter) = selection(&query);
    let listing = state
        .catalog()
        .await?
        .read()
        .await
        .public_listing(category, filter)?;
    Ok(Html(pages::menu_page(&listing, &hero_images(&state)).into_string()))
}

/// Detail of one visible item. Hidden or unknown items go back to the menu.
pub async fn item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let Ok(id) = id.parse::<MenuItemId>() else {
        return Ok(Redirect::to("/menu").into_response());
    };
    let item = state.catalog().await?.read().await.get(id)?;
    match item {
        Some(item) if item.is_public() => Ok(Html(pages::item_page(&item).into_string()).into_response()),
        _ => Ok(Redirect::to("/menu").into_response()),
    }
}

/// JSON form of the public menu.
pub async fn api_menu_handler(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Response, ApiError> {
    let (category, filter) = selection(&query);
    let listing = state
        .catalog()
        .await?
        .read()
        .await
        .public_listing(category, filter)?;
    Ok(Json(listing).into_response())
}

/// Hero images in display order.
pub async fn api_hero_handler(State(state): State<AppState>) -> Result<Json<HeroResponse>, ApiError> {
    Ok(Json(HeroResponse {
        images: state.hero.ordered_images()?,
    }))
}

// =============================================================================
// ADMIN
// =============================================================================

/// Admin page: create form plus the items of the selected tab.
pub async fn admin_handler(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Result<Html<String>, ApiError> {
    let (category, filter) = selection(&query);
    let all = state.catalog().await?.read().await.list_all()?;
    let options = sub_category_options(&all);
    let items: Vec<_> = all
        .into_iter()
        .filter(|i| i.category == category && filter.matches(i))
        .collect();
    Ok(Html(
        pages::admin_page(&items, &options, category, &filter).into_string(),
    ))
}

/// Edit form for one item.
pub async fn edit_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let Ok(id) = id.parse::<MenuItemId>() else {
        return Ok(Redirect::to("/admin").into_response());
    };
    let catalog = state.catalog().await?.read().await;
    let Some(item) = catalog.get(id)? else {
        return Ok(Redirect::to("/admin").into_response());
    };
    let options = sub_category_options(&catalog.list_all()?);
    Ok(Html(pages::edit_page(&item, &options).into_string()).into_response())
}

/// Apply one admin form intent, then go back to `/admin`.
pub async fn admin_action_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Redirect, ApiError> {
    let form = read_form(multipart).await?;
    let intent = AdminIntent::from_form(&form);

    let mut catalog = state.catalog().await?.write().await;
    match intent {
        AdminIntent::Create(input) => {
            catalog.create_item(input)?;
        }
        AdminIntent::AdjustStock { id, direction } => {
            catalog.adjust_stock(id, direction)?;
        }
        AdminIntent::ToggleHide { id, hide } => {
            let updated = match hide {
                Some(hide) => catalog.set_hide(id, hide)?,
                None => catalog.toggle_hide(id)?,
            };
            if let Some(item) = updated {
                tracing::info!(id = %id, hide = item.hide, "Changed visibility");
            }
        }
        AdminIntent::UpdateItem { id, update } => {
            if catalog.update_item(id, &update)?.is_none() {
                tracing::warn!(id = %id, "Update for unknown item");
            }
        }
        AdminIntent::DeleteItem { id } => match catalog.delete_item(id) {
            Ok(_) => {}
            Err(MenuError::ItemNotFound(_)) => tracing::warn!(id = %id, "Delete for unknown item"),
            Err(e) => return Err(e.into()),
        },
        AdminIntent::Ignored => {
            tracing::debug!(intent = ?form.text("_intent"), "Ignored admin submission");
        }
    }

    Ok(Redirect::to("/admin"))
}

// =============================================================================
// HERO IMAGES
// =============================================================================

/// Hero image manager page.
pub async fn system_handler(State(state): State<AppState>) -> Html<String> {
    Html(pages::system_page(&hero_images(&state)).into_string())
}

/// Delete, reorder or upload hero images.
pub async fn system_action_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(multipart).await?;

    let intent = match HeroIntent::from_form(&form) {
        Ok(intent) => intent,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected hero order");
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(SaveOrderResponse::error(e.to_string())),
            )
                .into_response());
        }
    };

    match intent {
        HeroIntent::Delete { path } => {
            match state.hero.delete(&path) {
                Ok(true) => tracing::info!(path = %path, "Deleted hero image"),
                Ok(false) => tracing::debug!(path = %path, "Hero image already gone"),
                Err(e) => tracing::error!(path = %path, error = %e, "Hero image deletion failed"),
            }
            Ok(Redirect::to("/admin/system").into_response())
        }
        HeroIntent::SaveOrder { order } => {
            state.hero.save_order(&order)?;
            tracing::info!(count = order.len(), "Saved hero order");
            Ok(Json(SaveOrderResponse::ok()).into_response())
        }
        HeroIntent::Upload { files } => {
            for file in &files {
                match state.hero.upload(&file.file_name, &file.bytes) {
                    Ok(Some(path)) => tracing::info!(path = %path, "Uploaded hero image"),
                    Ok(None) => {}
                    Err(e) => tracing::warn!(file = %file.file_name, error = %e, "Skipped hero upload"),
                }
            }
            Ok(Redirect::to("/admin/system").into_response())
        }
    }
}

// =============================================================================
// FALLBACK
// =============================================================================

/// Unknown admin paths are 404; everything else goes to the menu.
pub async fn fallback_handler(uri: Uri) -> Response {
    let path = uri.path();
    if path == "/admin" || path.starts_with("/admin/") {
        (StatusCode::NOT_FOUND, "Not Found").into_response()
    } else {
        Redirect::to("/menu").into_response()
    }
}
