//! Renderer seam — the external collaborator that turns a profile snapshot
//! and a job-posting URL into PDF + DOCX bytes plus a coverage summary.
//!
//! The orchestrator treats it as a black box that may fail opaquely. The
//! production implementation is an HTTP client ([`http::HttpRenderer`]).

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::models::account::AccountRow;
use crate::models::profile::ProfileRow;

pub mod http;

/// The profile fields handed to the Renderer, frozen at generation time.
/// `email` falls back from the profile to the account's sign-in address.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSnapshot {
    pub full_name: String,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl ProfileSnapshot {
    pub fn assemble(profile: &ProfileRow, account: &AccountRow) -> Self {
        let email = profile
            .email
            .clone()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| Some(account.email.clone()));
        Self {
            full_name: profile.full_name.clone(),
            city: profile.city.clone(),
            email,
            phone: profile.phone.clone(),
            linkedin: profile.linkedin.clone(),
            github: profile.github.clone(),
            about: profile.about.clone(),
            gemini_api_key: profile.gemini_api_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilenamePair {
    pub pdf: String,
    pub docx: String,
}

/// Opaque Renderer-produced score plus matched/missing keyword lists.
/// The core never computes or interprets these beyond storing them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coverage {
    pub score: f64,
    #[serde(default)]
    pub hits: Vec<String>,
    #[serde(default)]
    pub misses: Vec<String>,
}

/// A successful render: both document bodies, optional suggested filenames
/// (the orchestrator derives its own when absent), and the coverage summary.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub pdf: Bytes,
    pub docx: Bytes,
    pub filenames: Option<FilenamePair>,
    pub coverage: Coverage,
}

#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, profile: &ProfileSnapshot, job_url: &str) -> Result<RenderedResume>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn account(email: &str) -> AccountRow {
        AccountRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            verified: true,
            verify_code: None,
            verify_expiry: None,
            created_at: Utc::now(),
        }
    }

    fn profile(email: Option<&str>) -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            full_name: "Jane Doe".to_string(),
            city: None,
            email: email.map(String::from),
            phone: None,
            linkedin: None,
            github: None,
            about: None,
            gemini_api_key: None,
        }
    }

    #[test]
    fn test_snapshot_prefers_profile_email() {
        let snapshot =
            ProfileSnapshot::assemble(&profile(Some("work@x.com")), &account("signin@x.com"));
        assert_eq!(snapshot.email.as_deref(), Some("work@x.com"));
    }

    #[test]
    fn test_snapshot_falls_back_to_account_email() {
        let snapshot = ProfileSnapshot::assemble(&profile(None), &account("signin@x.com"));
        assert_eq!(snapshot.email.as_deref(), Some("signin@x.com"));

        let snapshot = ProfileSnapshot::assemble(&profile(Some("  ")), &account("signin@x.com"));
        assert_eq!(snapshot.email.as_deref(), Some("signin@x.com"));
    }

    #[test]
    fn test_coverage_tolerates_missing_lists() {
        let coverage: Coverage = serde_json::from_str(r#"{"score": 0.8}"#).unwrap();
        assert_eq!(coverage.score, 0.8);
        assert!(coverage.hits.is_empty());
        assert!(coverage.misses.is_empty());
    }
}
