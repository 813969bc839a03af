//! In-memory [`ArtifactStore`] for tests.
//!
//! `delete` on a missing key is an error here, so tests genuinely exercise
//! the orchestrator's tolerance of already-gone artifacts.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use bytes::Bytes;

use crate::storage::ArtifactStore;

#[derive(Default)]
pub struct MemoryArtifactStore {
    objects: Mutex<HashMap<String, Bytes>>,
}

impl MemoryArtifactStore {
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn remove(&self, key: &str) -> bool {
        self.objects.lock().unwrap().remove(key).is_some()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn put(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<()> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes> {
        match self.objects.lock().unwrap().get(key) {
            Some(bytes) => Ok(bytes.clone()),
            None => bail!("no such artifact: {key}"),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if self.objects.lock().unwrap().remove(key).is_none() {
            bail!("no such artifact: {key}");
        }
        Ok(())
    }

    async fn remove_scope(&self, _scope: &str) -> Result<()> {
        Ok(())
    }
}
