//! Defines the browser's routes.
//!
//! - `GET /`            — index of every accessible bucket
//! - `GET /{*path}`     — bucket root, directory listing, or object bytes
//!
//! `HEAD` is answered by the same handlers with the body stripped.
//! The wildcard keeps the raw path so empty segments can be collapsed by
//! the path parser rather than by the router.

use crate::{
    handlers::browse_handlers::{browse, list_buckets},
    services::storage_service::SharedGateway,
};
use axum::{Router, routing::get};

/// Build the router. State is the shared, immutable storage gateway.
pub fn routes() -> Router<SharedGateway> {
    Router::new()
        .route("/", get(list_buckets))
        .route("/{*path}", get(browse))
}
