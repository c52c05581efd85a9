//! A top-level container in the remote object store.

use chrono::{DateTime, Utc};

/// A bucket visible to the configured credentials.
///
/// Only the name is needed for routing; the creation date is display-only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    /// Bucket name as returned by the service.
    pub name: String,

    /// When this bucket was created, if the service reported it.
    pub created_at: Option<DateTime<Utc>>,
}
