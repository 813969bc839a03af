//! S3/MinIO implementation of the [`ArtifactStore`] seam.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

use crate::storage::ArtifactStore;

#[derive(Clone)]
pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ArtifactStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| anyhow!("S3 upload of {key} failed: {e}"))?;
        debug!("Uploaded artifact to s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow!("S3 download of {key} failed: {e}"))?;
        let bytes = output
            .body
            .collect()
            .await
            .with_context(|| format!("Failed to read S3 body for {key}"))?
            .into_bytes();
        Ok(bytes)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| anyhow!("S3 delete of {key} failed: {e}"))?;
        Ok(())
    }

    async fn remove_scope(&self, scope: &str) -> Result<()> {
        // Object keys have no containing directory: once both artifacts are
        // deleted the prefix is gone. Nothing to do here.
        debug!("Scope {scope} cleared (object storage has no directories)");
        Ok(())
    }
}
