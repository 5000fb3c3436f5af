//! JSON endpoints over every entity collection of both templates.
//!
//! Collections live under `/api/<template>/<collection>`. Lists return a short
//! summary with a link per record, details return every field, and creates
//! validate the body against the entity's column descriptors before writing.

mod router;
mod validation;

pub use router::router;
pub use validation::FieldErrors;

use crate::store::{Store, StoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Shared state of the API handlers.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<Store>,
    /// Base URL used to build record links, without a trailing slash.
    pub root_view: String,
}

impl ApiContext {
    pub fn new(store: Arc<Store>, root_view: impl Into<String>) -> Self {
        Self {
            store,
            root_view: root_view.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found.")]
    NotFound,
    #[error("invalid request body")]
    Invalid(FieldErrors),
    #[error("{0}")]
    MalformedBody(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("store task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
            }
            ApiError::Invalid(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::MalformedBody(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::Store(err) => {
                error!(%err, "request failed in the store");
                let body = Json(json!({ "error": err.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            ApiError::Worker(err) => {
                error!(%err, "store task did not complete");
                let body = Json(json!({ "error": "internal error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
