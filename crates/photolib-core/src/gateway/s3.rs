//! S3 catalog backend
//!
//! Backed by `aws-sdk-s3`. Credentials come from the standard SDK chain
//! (environment variables, shared profile); bucket, region, prefix, and
//! an optional custom endpoint come from [`Config`].

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{is_placeholder, CatalogGateway};
use crate::config::Config;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogEntry, Receipt};

/// Catalog gateway over an S3 bucket
pub struct S3Gateway {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Gateway {
    /// Build a gateway from the application configuration
    pub async fn connect(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));
        if let Some(url) = &config.endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
            prefix: config.prefix.clone(),
        }
    }

    /// Wrap an existing SDK client (shared credentials, custom middleware)
    pub fn with_client(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl CatalogGateway for S3Gateway {
    async fn list(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(&self.prefix)
            .send()
            .await
            .map_err(CatalogError::unavailable)?;

        let mut entries = Vec::new();
        for object in resp.contents() {
            let key = match object.key() {
                Some(k) => k.to_string(),
                None => continue,
            };
            let size = object.size().unwrap_or(0);
            if is_placeholder(&key, size, &self.prefix) {
                debug!(key = %key, "skipping placeholder object");
                continue;
            }

            let last_modified = object
                .last_modified()
                .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

            entries.push(CatalogEntry::new(key, last_modified));
        }

        debug!(count = entries.len(), "listed catalog entries");
        Ok(entries)
    }

    async fn fetch_content(&self, key: &str) -> CatalogResult<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error()
                    .map(|svc| svc.is_no_such_key())
                    .unwrap_or(false)
                {
                    CatalogError::ObjectNotFound {
                        key: key.to_string(),
                    }
                } else {
                    CatalogError::unavailable(e)
                }
            })?;

        let body = resp
            .body
            .collect()
            .await
            .map_err(CatalogError::unavailable)?;
        Ok(body.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> CatalogResult<Receipt> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(CatalogError::unavailable)?;

        debug!(key, size = bytes.len(), "uploaded object");
        Ok(Receipt {
            key: key.to_string(),
        })
    }

    async fn delete(&self, key: &str) -> CatalogResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(CatalogError::unavailable)?;

        debug!(key, "deleted object");
        Ok(())
    }
}
