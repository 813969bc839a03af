//! Durable artifact storage, keyed by orchestrator-chosen paths.
//!
//! Each generation writes under its own unique scope
//! (`resumes/<account_id>/<generation_id>/`), so concurrent generations for
//! the same or different accounts never collide.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub mod s3;

#[cfg(test)]
pub mod memory;

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Removes one artifact. Implementations may report a missing artifact as
    /// an error; callers doing cleanup treat any failure as best-effort.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Best-effort removal of a generation's now-empty scope.
    async fn remove_scope(&self, scope: &str) -> Result<()>;
}
