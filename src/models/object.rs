//! Objects, their metadata, and one page of a delimited listing.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures::Stream;
use std::{fmt, io, pin::Pin};

/// A lazily produced object body. Chunks are pulled only as fast as the
/// client connection drains them.
pub type ByteStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send>>;

/// One entry in a listing: an object directly under the listed prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectSummary {
    /// Full object key (path-like identifier within the bucket).
    pub key: String,

    /// Size in bytes.
    pub size: u64,

    pub last_modified: Option<DateTime<Utc>>,
}

/// Entries directly under a prefix, split by the `/` delimiter.
///
/// Both vectors keep the order the service returned them in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Listing {
    /// Common prefixes (virtual folders), each ending in `/`.
    pub folders: Vec<String>,

    pub files: Vec<ObjectSummary>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}

/// Headers reported by the metadata check for a single object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub etag: Option<String>,
    pub size: Option<u64>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// An object ready to be streamed to the client.
pub struct StoredObject {
    pub metadata: ObjectMetadata,
    pub body: ByteStream,
}

impl fmt::Debug for StoredObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredObject")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
