//! # menuboard HTTP Module
//!
//! The axum server: public menu pages, the admin back office, the hero
//! image manager and a few JSON endpoints.
//!
//! ## Endpoints
//!
//! - `GET /` - redirect to `/menu`
//! - `GET /menu?category=&sub=` - public menu page
//! - `GET /menu/items/{id}` - item detail
//! - `GET /admin`, `POST /admin` - item management (multipart `_intent` forms)
//! - `GET /admin/items/{id}/edit` - edit form
//! - `GET /admin/system`, `POST /admin/system` - hero image manager
//! - `GET /api/menu`, `GET /api/hero` - JSON views
//! - `GET /health` - health check
//! - `/uploads/*`, `/images/*` - static files from the public directory
//!
//! ## Configuration (Environment Variables)
//!
//! - `MENUBOARD_CORS_ORIGINS`: comma-separated allowed origins, or "*" (default: localhost only)
//! - `MENUBOARD_RATE_LIMIT`: requests per second (default: 100, 0 to disable)

pub mod forms;
mod handlers;
mod middleware;
pub mod pages;
mod types;

pub use middleware::{create_rate_limiter, get_rate_limit_from_env, parse_rate_limit};
pub use types::{ApiError, HealthResponse, HeroResponse, MenuQuery, SaveOrderResponse};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use menuboard_core::{Catalog, HeroGallery, MenuError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Largest accepted request body (image uploads).
pub const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
///
/// The catalog is opened on first use and kept for the life of the
/// process. Reads take the read lock, writes the write lock.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<OnceCell<RwLock<Catalog>>>,
    database: Option<PathBuf>,
    public_dir: PathBuf,
    /// Hero images under `<public_dir>/uploads/hero`.
    pub hero: HeroGallery,
}

impl AppState {
    /// State around an already opened catalog.
    #[must_use]
    pub fn new(catalog: Catalog, public_dir: impl AsRef<Path>) -> Self {
        Self {
            catalog: Arc::new(OnceCell::new_with(Some(RwLock::new(catalog)))),
            database: None,
            public_dir: public_dir.as_ref().to_path_buf(),
            hero: HeroGallery::new(public_dir),
        }
    }

    /// State that opens the redb catalog at `database` on first request.
    #[must_use]
    pub fn lazy(database: impl Into<PathBuf>, public_dir: impl AsRef<Path>) -> Self {
        Self {
            catalog: Arc::new(OnceCell::new()),
            database: Some(database.into()),
            public_dir: public_dir.as_ref().to_path_buf(),
            hero: HeroGallery::new(public_dir),
        }
    }

    /// The catalog, opening it if this is the first use.
    pub async fn catalog(&self) -> Result<&RwLock<Catalog>, MenuError> {
        self.catalog
            .get_or_try_init(|| async {
                let catalog = match &self.database {
                    Some(path) => {
                        tracing::info!(path = %path.display(), "Opening menu database");
                        Catalog::with_redb(path)?
                    }
                    None => Catalog::new(),
                };
                Ok::<_, MenuError>(RwLock::new(catalog))
            })
            .await
    }

    /// Whether the catalog has been opened yet.
    #[must_use]
    pub fn is_catalog_open(&self) -> bool {
        self.catalog.initialized()
    }

    /// Root of the static files.
    #[must_use]
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from `MENUBOARD_CORS_ORIGINS`.
///
/// - `*`: any origin
/// - unset: localhost only
/// - otherwise: the comma-separated origins that parse
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("MENUBOARD_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (MENUBOARD_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins in MENUBOARD_CORS_ORIGINS, using localhost");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => build_localhost_cors(),
    }
}

/// CORS layer admitting only localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the router with every route and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing
/// 2. CORS
/// 3. Body limit
/// 4. Rate limiting (if enabled)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = if rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
        Some(create_rate_limiter(rate_limit))
    } else {
        tracing::info!("Rate limiting disabled");
        None
    };

    let public_dir = state.public_dir().to_path_buf();

    let mut router = Router::new()
        .route("/", get(handlers::index_handler))
        .route("/menu", get(handlers::menu_handler))
        .route("/menu/items/{id}", get(handlers::item_handler))
        .route(
            "/admin",
            get(handlers::admin_handler).post(handlers::admin_action_handler),
        )
        .route("/admin/items/{id}/edit", get(handlers::edit_handler))
        .route(
            "/admin/system",
            get(handlers::system_handler).post(handlers::system_action_handler),
        )
        .route("/api/menu", get(handlers::api_menu_handler))
        .route("/api/hero", get(handlers::api_hero_handler))
        .route("/health", get(handlers::health_handler))
        .nest_service("/uploads", ServeDir::new(public_dir.join("uploads")))
        .nest_service("/images", ServeDir::new(public_dir.join("images")))
        .fallback(handlers::fallback_handler);

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Bind `addr` and serve until the process stops.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), MenuError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MenuError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("menuboard listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| MenuError::IoError(format!("Server error: {}", e)))
}
