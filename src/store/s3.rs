use anyhow::{Context, Result};
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

use super::ObjectStore;

/// [`ObjectStore`] backed by a single S3 bucket.
#[derive(Clone)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Creates a store using the ambient AWS configuration (env vars,
    /// instance profile, Lambda execution role).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn content_type_for(key: &str) -> &'static str {
    if key.ends_with(".json") {
        "application/json"
    } else {
        "application/octet-stream"
    }
}

#[async_trait::async_trait]
impl ObjectStore for S3Store {
    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.with_context(|| {
                format!("ListObjectsV2 failed for s3://{}/{}", self.bucket, prefix)
            })?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(str::to_string)),
            );
        }

        keys.sort();
        debug!(bucket = %self.bucket, prefix, count = keys.len(), "Listed objects");
        Ok(keys)
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("GetObject failed for s3://{}/{}", self.bucket, key))?;

        let data = resp
            .body
            .collect()
            .await
            .with_context(|| format!("reading body of s3://{}/{}", self.bucket, key))?;
        Ok(data.into_bytes().to_vec())
    }

    async fn put(&self, key: &str, body: Vec<u8>) -> Result<()> {
        let len = body.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type_for(key))
            .send()
            .await
            .with_context(|| format!("PutObject failed for s3://{}/{}", self.bucket, key))?;

        debug!(bucket = %self.bucket, key, bytes = len, "Uploaded object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("DeleteObject failed for s3://{}/{}", self.bucket, key))?;

        debug!(bucket = %self.bucket, key, "Deleted object");
        Ok(())
    }
}
