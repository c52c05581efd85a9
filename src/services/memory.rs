//! In-memory `StorageGateway` used by the router tests.
//!
//! Listing follows S3's delimiter rules: keys are returned in lexicographic
//! order and anything below the next `/` after the prefix collapses into a
//! common prefix.

use crate::{
    models::{
        bucket::Bucket,
        object::{Listing, ObjectMetadata, ObjectSummary, StoredObject},
    },
    services::storage_service::{DELIMITER, StorageError, StorageGateway, StorageResult},
};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Clone, Debug)]
pub struct MemoryObject {
    pub data: Bytes,
    pub content_type: Option<String>,
    pub cache_control: Option<String>,
    pub etag: Option<String>,
}

#[derive(Default)]
pub struct MemoryGateway {
    buckets: BTreeMap<String, BTreeMap<String, MemoryObject>>,
    /// When set, every call fails with this message.
    failure: Option<String>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_bucket(mut self, name: &str) -> Self {
        self.buckets.entry(name.to_string()).or_default();
        self
    }

    pub fn with_object(self, bucket: &str, key: &str, data: &'static [u8]) -> Self {
        self.with_typed_object(bucket, key, data, None)
    }

    pub fn with_typed_object(
        mut self,
        bucket: &str,
        key: &str,
        data: &'static [u8],
        content_type: Option<&str>,
    ) -> Self {
        self.buckets.entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            MemoryObject {
                data: Bytes::from_static(data),
                content_type: content_type.map(str::to_string),
                cache_control: None,
                etag: None,
            },
        );
        self
    }

    pub fn with_cached_object(
        mut self,
        bucket: &str,
        key: &str,
        data: &'static [u8],
        cache_control: &str,
        etag: &str,
    ) -> Self {
        self.buckets.entry(bucket.to_string()).or_default().insert(
            key.to_string(),
            MemoryObject {
                data: Bytes::from_static(data),
                content_type: Some("application/json".into()),
                cache_control: Some(cache_control.to_string()),
                etag: Some(etag.to_string()),
            },
        );
        self
    }

    fn check(&self, operation: &'static str) -> StorageResult<()> {
        match &self.failure {
            Some(message) => Err(StorageError::backend(operation, message.clone())),
            None => Ok(()),
        }
    }

    fn bucket(
        &self,
        operation: &'static str,
        name: &str,
    ) -> StorageResult<&BTreeMap<String, MemoryObject>> {
        self.buckets
            .get(name)
            .ok_or_else(|| StorageError::backend(operation, format!("NoSuchBucket: {}", name)))
    }
}

#[async_trait]
impl StorageGateway for MemoryGateway {
    async fn list_buckets(&self) -> StorageResult<Vec<Bucket>> {
        self.check("ListBuckets")?;
        Ok(self
            .buckets
            .keys()
            .map(|name| Bucket {
                name: name.clone(),
                created_at: None,
            })
            .collect())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Listing> {
        self.check("ListObjectsV2")?;
        let objects = self.bucket("ListObjectsV2", bucket)?;

        let mut folders = BTreeSet::new();
        let mut files = Vec::new();
        for (key, object) in objects.range(prefix.to_string()..) {
            let Some(rest) = key.strip_prefix(prefix) else {
                break;
            };
            match rest.find(DELIMITER) {
                Some(pos) => {
                    folders.insert(format!("{}{}", prefix, &rest[..pos + DELIMITER.len()]));
                }
                None => files.push(ObjectSummary {
                    key: key.clone(),
                    size: object.data.len() as u64,
                    last_modified: None,
                }),
            }
        }

        Ok(Listing {
            folders: folders.into_iter().collect(),
            files,
        })
    }

    async fn fetch_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        self.check("HeadObject")?;
        // HeadObject on a missing bucket is a plain 404 as well.
        let object = self
            .buckets
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;

        let metadata = ObjectMetadata {
            content_type: object.content_type.clone(),
            cache_control: object.cache_control.clone(),
            etag: object.etag.clone(),
            size: Some(object.data.len() as u64),
            last_modified: None,
        };
        let chunks: Vec<std::io::Result<Bytes>> = object
            .data
            .chunks(4)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();

        Ok(StoredObject {
            metadata,
            body: Box::pin(futures::stream::iter(chunks)),
        })
    }
}
