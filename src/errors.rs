use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::services::storage_service::StorageError;

/// Usage hint returned for paths that do not name a bucket.
pub const USAGE_HINT: &str = "Bad path. Use / to list buckets, /<bucket>/ to browse a bucket, \
                              or /<bucket>/<key> to view an object.";

/// A lightweight wrapper for request errors, rendered as plain text.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: msg.into(),
        }
    }

    /// 400 with the usage hint.
    pub fn bad_path() -> Self {
        Self::new(StatusCode::BAD_REQUEST, USAGE_HINT)
    }

    /// Shortcut for 404 Not Found
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    /// Log the full backend failure and hide it behind a generic 500 message.
    pub fn backend(context: &'static str, err: StorageError) -> Self {
        tracing::error!(error = %err, "{}", context);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, context)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.message).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}
