//! In-memory [`Store`] used by the test suite. Mirrors the SQL semantics of
//! `PgStore`: upsert on issue, all-or-nothing consume, ownership-scoped
//! resume lookups.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::account::AccountRow;
use crate::models::profile::ProfileRow;
use crate::models::resume::GeneratedResumeRow;
use crate::store::{ProfileFields, Store};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    accounts: Vec<AccountRow>,
    profiles: Vec<ProfileRow>,
    resumes: Vec<GeneratedResumeRow>,
}

#[async_trait]
impl Store for MemoryStore {
    async fn issue_code(
        &self,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<AccountRow> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(account) = inner.accounts.iter_mut().find(|a| a.email == email) {
            account.verify_code = Some(code.to_string());
            account.verify_expiry = Some(expires_at);
            return Ok(account.clone());
        }
        let account = AccountRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            verified: false,
            verify_code: Some(code.to_string()),
            verify_expiry: Some(expires_at),
            created_at: Utc::now(),
        };
        inner.accounts.push(account.clone());
        Ok(account)
    }

    async fn consume_code(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<AccountRow>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(account) = inner.accounts.iter_mut().find(|a| a.email == email) else {
            return Ok(None);
        };
        let matches = account.verify_code.as_deref() == Some(code)
            && account.verify_expiry.is_some_and(|expiry| expiry >= now);
        if !matches {
            return Ok(None);
        }
        account.verified = true;
        account.verify_code = None;
        account.verify_expiry = None;
        Ok(Some(account.clone()))
    }

    async fn account_by_id(&self, id: Uuid) -> Result<Option<AccountRow>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn profile_for_account(&self, account_id: Uuid) -> Result<Option<ProfileRow>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .profiles
            .iter()
            .find(|p| p.account_id == account_id)
            .cloned())
    }

    async fn upsert_profile(
        &self,
        account_id: Uuid,
        fields: &ProfileFields,
    ) -> Result<ProfileRow> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(profile) = inner
            .profiles
            .iter_mut()
            .find(|p| p.account_id == account_id)
        {
            profile.full_name = fields.full_name.clone();
            profile.city = fields.city.clone();
            profile.email = fields.email.clone();
            profile.phone = fields.phone.clone();
            profile.linkedin = fields.linkedin.clone();
            profile.github = None;
            profile.about = fields.about.clone();
            profile.gemini_api_key = fields.gemini_api_key.clone();
            return Ok(profile.clone());
        }
        let profile = ProfileRow {
            id: Uuid::new_v4(),
            account_id,
            full_name: fields.full_name.clone(),
            city: fields.city.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            linkedin: fields.linkedin.clone(),
            github: None,
            about: fields.about.clone(),
            gemini_api_key: fields.gemini_api_key.clone(),
        };
        inner.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn insert_resume(&self, row: &GeneratedResumeRow) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.resumes.push(row.clone());
        Ok(())
    }

    async fn recent_resumes(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> Result<Vec<GeneratedResumeRow>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .resumes
            .iter()
            .filter(|r| r.account_id == account_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }

    async fn resume_owned(
        &self,
        account_id: Uuid,
        id: Uuid,
    ) -> Result<Option<GeneratedResumeRow>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .resumes
            .iter()
            .find(|r| r.id == id && r.account_id == account_id)
            .cloned())
    }

    async fn delete_resume(&self, account_id: Uuid, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.resumes.len();
        inner
            .resumes
            .retain(|r| !(r.id == id && r.account_id == account_id));
        Ok(inner.resumes.len() < before)
    }
}
