//! # API Types
//!
//! JSON response bodies and the handler error type.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use menuboard_core::MenuError;
use serde::{Deserialize, Serialize};

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// `?category=&sub=` on the menu pages and `/api/menu`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuQuery {
    pub category: Option<String>,
    pub sub: Option<String>,
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Hero images in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroResponse {
    pub images: Vec<String>,
}

/// Reply to a `save-order` submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOrderResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveOrderResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// An error surfaced from a handler.
///
/// Logged, then answered with a plain-text status. Details stay in the log.
#[derive(Debug)]
pub enum ApiError {
    /// The core rejected or failed the operation.
    Menu(MenuError),
    /// The multipart body could not be read (malformed or over the size limit).
    Form(MultipartError),
}

impl From<MenuError> for ApiError {
    fn from(e: MenuError) -> Self {
        Self::Menu(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::Form(e)
    }
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Menu(MenuError::ItemNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Menu(MenuError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Menu(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Form(e) => e.status(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Menu(e) => write!(f, "{}", e),
            Self::Form(e) => write!(f, "malformed form: {}", e.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }
        let message = status.canonical_reason().unwrap_or("Error");
        (status, message).into_response()
    }
}
