//! HTTP handlers for the bucket index and for everything below it.
//!
//! A non-root path resolves in this order:
//! 1. no bucket segment -> 400 with a usage hint
//! 2. empty key or trailing slash -> directory listing (always 200)
//! 3. object fetch; on not-found, retry as the directory `key/` and
//!    answer 404 only if that listing is empty
//!
//! Object bodies are streamed straight from the store to the client.

use crate::{
    errors::AppError,
    models::object::{Listing, ObjectMetadata, StoredObject},
    render::{render_buckets, render_listing},
    routes::path::{ParsedPath, parse_path},
    services::storage_service::{SharedGateway, StorageError},
};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderValue, Uri, header},
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

const LIST_BUCKETS_ERROR: &str = "Error listing buckets";
const FETCH_ERROR: &str = "Error fetching from object storage";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// `GET /` — every bucket visible to the configured credentials.
pub async fn list_buckets(
    State(gateway): State<SharedGateway>,
) -> Result<Html<String>, AppError> {
    let buckets = gateway
        .list_buckets()
        .await
        .map_err(|err| AppError::backend(LIST_BUCKETS_ERROR, err))?;
    debug!(count = buckets.len(), "listed buckets");
    Ok(Html(render_buckets(&buckets)))
}

/// `GET /{bucket}/{*key}` — directory listing or object bytes.
pub async fn browse(
    State(gateway): State<SharedGateway>,
    uri: Uri,
) -> Result<Response, AppError> {
    let parsed = parse_path(uri.path()).ok_or_else(AppError::bad_path)?;

    if parsed.is_directory() {
        let prefix = parsed.directory_prefix();
        let listing = list_directory(&gateway, &parsed, &prefix).await?;
        return Ok(listing_response(&parsed, &prefix, &listing));
    }

    match gateway.fetch_object(&parsed.bucket, &parsed.key).await {
        Ok(object) => {
            debug!(bucket = %parsed.bucket, key = %parsed.key, "streaming object");
            Ok(object_response(&parsed.key, object))
        }
        Err(StorageError::ObjectNotFound { .. }) => {
            let prefix = parsed.directory_prefix();
            debug!(bucket = %parsed.bucket, %prefix, "no such object, trying as directory");
            let listing = list_directory(&gateway, &parsed, &prefix).await?;
            if listing.is_empty() {
                return Err(AppError::not_found());
            }
            Ok(listing_response(&parsed, &prefix, &listing))
        }
        Err(err) => Err(AppError::backend(FETCH_ERROR, err)),
    }
}

async fn list_directory(
    gateway: &SharedGateway,
    parsed: &ParsedPath,
    prefix: &str,
) -> Result<Listing, AppError> {
    gateway
        .list_objects(&parsed.bucket, prefix)
        .await
        .map_err(|err| AppError::backend(FETCH_ERROR, err))
}

fn listing_response(parsed: &ParsedPath, prefix: &str, listing: &Listing) -> Response {
    let request_path = format!("/{}/{}", parsed.bucket, prefix);
    Html(render_listing(&parsed.bucket, prefix, listing, &request_path)).into_response()
}

fn object_response(key: &str, object: StoredObject) -> Response {
    let StoredObject { metadata, body } = object;
    let mut response = Response::new(Body::from_stream(body));
    set_object_headers(response.headers_mut(), key, &metadata);
    response
}

fn set_object_headers(headers: &mut HeaderMap, key: &str, meta: &ObjectMetadata) {
    let content_type = resolve_content_type(key, meta);
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(FALLBACK_CONTENT_TYPE)),
    );

    if let Some(size) = meta.size {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(size));
    }

    if let Some(value) = meta
        .cache_control
        .as_deref()
        .and_then(|v| HeaderValue::from_str(v).ok())
    {
        headers.insert(header::CACHE_CONTROL, value);
    }

    // S3 already returns the ETag quoted.
    if let Some(value) = meta.etag.as_deref().and_then(|v| HeaderValue::from_str(v).ok()) {
        headers.insert(header::ETAG, value);
    }

    if let Some(modified) = meta.last_modified {
        let http_date = modified.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        if let Ok(value) = HeaderValue::from_str(&http_date) {
            headers.insert(header::LAST_MODIFIED, value);
        }
    }
}

/// Stored content type, else a guess from the key's extension, else a
/// generic binary type.
fn resolve_content_type(key: &str, meta: &ObjectMetadata) -> String {
    meta.content_type
        .as_deref()
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .map(str::to_string)
        .or_else(|| mime_guess::from_path(key).first().map(|mime| mime.to_string()))
        .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
}
