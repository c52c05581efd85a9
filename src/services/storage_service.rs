//! src/services/storage_service.rs
//!
//! StorageGateway — the three read-only calls the browser makes against the
//! remote object store. Handlers only ever see this trait; the concrete S3
//! client lives in `s3_gateway`.

use crate::models::{
    bucket::Bucket,
    object::{Listing, StoredObject},
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Hierarchy delimiter used for every listing.
pub const DELIMITER: &str = "/";

#[derive(Debug, Error)]
pub enum StorageError {
    /// The metadata check reported that no object exists under this key.
    /// Callers treat this as a signal to try directory resolution instead.
    #[error("object `{key}` not found in bucket `{bucket}`")]
    ObjectNotFound { bucket: String, key: String },
    #[error("{operation} failed: {message}")]
    Backend {
        operation: &'static str,
        message: String,
    },
}

impl StorageError {
    pub fn backend(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Backend {
            operation,
            message: message.into(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Shared handle injected into the router as state.
pub type SharedGateway = Arc<dyn StorageGateway>;

/// Read-only access to a remote object store.
///
/// Every method is a single, idempotent remote call sequence with no retry.
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// List every bucket visible to the configured credentials, in the
    /// order the service returns them.
    async fn list_buckets(&self) -> StorageResult<Vec<Bucket>>;

    /// List the entries directly under `prefix` using [`DELIMITER`]. Deeper
    /// keys collapse into `folders`. An empty prefix lists the bucket root.
    /// Only the first page is returned.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Listing>;

    /// Check the object's metadata and, if it exists, open its body.
    ///
    /// Returns [`StorageError::ObjectNotFound`] when the key is absent.
    async fn fetch_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject>;
}
