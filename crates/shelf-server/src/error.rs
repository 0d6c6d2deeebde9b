//! Server error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shelf_store::StoreError;
use thiserror::Error;

use crate::views::ViewError;

/// Error that aborts a single request.
///
/// Resolution misses never land here; they degrade to an ancestor
/// page instead. What remains are store failures and broken view
/// templates, both of which end the request with a plain 500 while
/// the server keeps serving.
#[derive(Debug, Error)]
pub(crate) enum ServerError {
    /// A store read failed for a reason other than a vanished resource.
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
    /// A view template could not be loaded or rendered.
    #[error("view rendering failed: {0}")]
    View(#[from] ViewError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
