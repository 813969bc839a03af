//! Server-side session store: opaque bearer token → account id.
//!
//! Production keeps sessions in Redis with a TTL; tests use the in-memory
//! implementation. The contract elsewhere in the crate is only that a valid
//! token resolves to exactly one account id.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Creates a session for the account and returns its opaque token.
    async fn create(&self, account_id: Uuid) -> Result<String>;

    /// Resolves a token to the account id, or `None` for unknown/expired tokens.
    async fn resolve(&self, token: &str) -> Result<Option<Uuid>>;

    /// Revokes a session. Revoking an unknown token is not an error.
    async fn revoke(&self, token: &str) -> Result<()>;
}

fn session_key(token: &str) -> String {
    format!("session:{token}")
}

pub struct RedisSessionStore {
    client: redis::Client,
    ttl: Duration,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self { client, ttl }
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, account_id: Uuid) -> Result<String> {
        let token = Uuid::new_v4().simple().to_string();
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(
                session_key(&token),
                account_id.to_string(),
                self.ttl.as_secs(),
            )
            .await
            .context("Failed to store session")?;
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<Uuid>> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(session_key(token))
            .await
            .context("Failed to read session")?;
        // A malformed stored value is treated as no session rather than a
        // request-fatal error.
        Ok(value.and_then(|v| Uuid::parse_str(&v).ok()))
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .del(session_key(token))
            .await
            .context("Failed to revoke session")?;
        Ok(())
    }
}

/// In-memory sessions for tests. No TTL; tests never sleep that long.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: std::sync::Mutex<std::collections::HashMap<String, Uuid>>,
}

#[cfg(test)]
#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, account_id: Uuid) -> Result<String> {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(token.clone(), account_id);
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> Result<Option<Uuid>> {
        Ok(self.sessions.lock().unwrap().get(token).copied())
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }
}
