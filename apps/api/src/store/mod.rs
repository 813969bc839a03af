//! Persistence seam for accounts, profiles, and generated-resume records.
//!
//! Production binds to PostgreSQL ([`postgres::PgStore`]); tests run against
//! the in-memory implementation. Every state-mutating operation is a single
//! atomic statement, so a failure partway through a request never leaves a
//! partial row.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::account::AccountRow;
use crate::models::profile::ProfileRow;
use crate::models::resume::GeneratedResumeRow;

pub mod postgres;

#[cfg(test)]
pub mod memory;

/// Normalized, validated profile fields as written by `save_profile`.
/// The single "web" input lands in `linkedin`; `github` is cleared on
/// every save until the product grows a second link field.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub full_name: String,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub about: Option<String>,
    pub gemini_api_key: Option<String>,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Upserts the account for `email` (created unverified on first contact)
    /// and stamps a fresh one-time code + expiry, overwriting any pending one.
    async fn issue_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<AccountRow>;

    /// Atomically consumes a pending code: succeeds only if the account
    /// exists, the stored code equals `code` exactly, and `now <= expiry`.
    /// On success the account is marked verified and the code is cleared
    /// (single-use). On failure nothing changes and `None` is returned —
    /// callers must not learn which precondition failed.
    async fn consume_code(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AccountRow>>;

    async fn account_by_id(&self, id: Uuid) -> Result<Option<AccountRow>>;

    async fn profile_for_account(&self, account_id: Uuid) -> Result<Option<ProfileRow>>;

    /// Creates the profile on first save, mutates it in place thereafter.
    async fn upsert_profile(&self, account_id: Uuid, fields: &ProfileFields)
        -> Result<ProfileRow>;

    async fn insert_resume(&self, row: &GeneratedResumeRow) -> Result<()>;

    /// The account's records, newest first, bounded by `limit`.
    async fn recent_resumes(&self, account_id: Uuid, limit: i64)
        -> Result<Vec<GeneratedResumeRow>>;

    /// Fetches a record only if it exists AND is owned by `account_id`.
    async fn resume_owned(&self, account_id: Uuid, id: Uuid)
        -> Result<Option<GeneratedResumeRow>>;

    /// Deletes under the same ownership rule. Returns whether a row was removed.
    async fn delete_resume(&self, account_id: Uuid, id: Uuid) -> Result<bool>;
}
