//! `StorageGateway` backed by `aws-sdk-s3`.
//!
//! Credentials come from the standard AWS provider chain (env keys, shared
//! profiles, SSO, instance/container roles); this module never touches them.

use crate::{
    config::AppConfig,
    models::{
        bucket::Bucket,
        object::{Listing, ObjectMetadata, ObjectSummary, StoredObject},
    },
    services::storage_service::{DELIMITER, StorageError, StorageGateway, StorageResult},
};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, meta::region::RegionProviderChain, retry::RetryConfig};
use aws_sdk_s3::{
    Client,
    config::Region,
    error::{DisplayErrorContext, SdkError},
    operation::{get_object::GetObjectError, head_object::HeadObjectError},
    primitives::DateTime as AwsDateTime,
};
use chrono::{DateTime, Utc};
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

/// Region used when neither the CLI, the environment, nor a profile names one.
const DEFAULT_REGION: &str = "us-east-1";

/// Process-wide S3 client. Cloning is cheap; the SDK client is reference
/// counted internally and safe for concurrent use.
#[derive(Clone, Debug)]
pub struct S3Gateway {
    client: Client,
}

impl S3Gateway {
    /// Build a client from the default AWS configuration chain, applying
    /// the region/profile/endpoint overrides from `cfg`.
    pub async fn from_config(cfg: &AppConfig) -> Self {
        let region = RegionProviderChain::first_try(cfg.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        // Single attempt: a failed call surfaces immediately as a 500.
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .retry_config(RetryConfig::disabled());
        if let Some(profile) = &cfg.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &cfg.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        info!(
            region = ?sdk_config.region(),
            endpoint = ?cfg.endpoint_url,
            force_path_style = cfg.force_path_style,
            "S3 client configured"
        );

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(cfg.force_path_style)
            .build();
        Self::new(Client::from_conf(s3_config))
    }

    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageGateway for S3Gateway {
    async fn list_buckets(&self) -> StorageResult<Vec<Bucket>> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|err| sdk_failure("ListBuckets", err))?;

        let buckets = output
            .buckets()
            .iter()
            .filter_map(|b| {
                Some(Bucket {
                    name: b.name()?.to_string(),
                    created_at: b.creation_date().and_then(to_chrono),
                })
            })
            .collect();
        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> StorageResult<Listing> {
        debug!(bucket, prefix, "listing objects");
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .delimiter(DELIMITER)
            .send()
            .await
            .map_err(|err| sdk_failure("ListObjectsV2", err))?;

        let folders = output
            .common_prefixes()
            .iter()
            .filter_map(|p| p.prefix().map(str::to_string))
            .collect();
        let files = output
            .contents()
            .iter()
            .filter_map(|obj| {
                Some(ObjectSummary {
                    key: obj.key()?.to_string(),
                    size: obj.size().unwrap_or(0).max(0) as u64,
                    last_modified: obj.last_modified().and_then(to_chrono),
                })
            })
            .collect();

        Ok(Listing { folders, files })
    }

    async fn fetch_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        let head = self
            .client
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                object_failure("HeadObject", bucket, key, err, HeadObjectError::is_not_found)
            })?;

        let mut metadata = ObjectMetadata {
            content_type: head.content_type().map(str::to_string),
            cache_control: head.cache_control().map(str::to_string),
            etag: head.e_tag().map(str::to_string),
            size: head.content_length().and_then(|len| u64::try_from(len).ok()),
            last_modified: head.last_modified().and_then(to_chrono),
        };

        // The object may vanish between the two calls.
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                object_failure("GetObject", bucket, key, err, GetObjectError::is_no_such_key)
            })?;
        if let Some(len) = object.content_length().and_then(|len| u64::try_from(len).ok()) {
            metadata.size = Some(len);
        }

        let body = ReaderStream::new(object.body.into_async_read());
        Ok(StoredObject {
            metadata,
            body: Box::pin(body),
        })
    }
}

/// Flatten an SDK error, including its source chain, into a backend failure.
fn sdk_failure<E, R>(operation: &'static str, err: SdkError<E, R>) -> StorageError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    StorageError::backend(operation, DisplayErrorContext(err).to_string())
}

/// Classify a failed HeadObject/GetObject call. Service errors accepted by
/// `is_missing` mean the key is absent; anything else is a backend failure.
fn object_failure<E, R>(
    operation: &'static str,
    bucket: &str,
    key: &str,
    err: SdkError<E, R>,
    is_missing: fn(&E) -> bool,
) -> StorageError
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    if err.as_service_error().is_some_and(is_missing) {
        return StorageError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        };
    }
    sdk_failure(operation, err)
}

fn to_chrono(value: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}
