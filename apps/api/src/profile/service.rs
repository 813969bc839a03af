//! Profile manager: validation, upsert, and the generation gate.
//!
//! The only hard requirement is a non-empty full name; everything else is
//! optional, trimmed, and length-capped.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::store::{ProfileFields, Store};

const MAX_FULL_NAME: usize = 255;
const MAX_CITY: usize = 255;
const MAX_EMAIL: usize = 255;
const MAX_PHONE: usize = 64;
const MAX_WEB: usize = 255;
const MAX_ABOUT: usize = 5000;
const MAX_API_KEY: usize = 255;

/// Incoming profile fields as submitted by the client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    pub full_name: String,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Single free-text link field (LinkedIn / GitHub / website).
    pub web: Option<String>,
    pub about: Option<String>,
    pub gemini_api_key: Option<String>,
}

#[derive(Clone)]
pub struct ProfileService {
    store: Arc<dyn Store>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get(&self, account_id: Uuid) -> Result<Option<ProfileRow>, AppError> {
        self.store
            .profile_for_account(account_id)
            .await
            .map_err(AppError::Internal)
    }

    /// Creates the profile on first save, mutates in place thereafter.
    pub async fn save(
        &self,
        account_id: Uuid,
        input: ProfileInput,
    ) -> Result<ProfileRow, AppError> {
        let fields = validate(input)?;
        let row = self
            .store
            .upsert_profile(account_id, &fields)
            .await
            .map_err(AppError::Internal)?;
        info!("Saved profile for account {account_id}");
        Ok(row)
    }

    /// The profile, but only if it passes the generation gate
    /// ([`ProfileRow::is_complete`]). The orchestrator consults this before
    /// every render.
    pub async fn complete_profile(
        &self,
        account_id: Uuid,
    ) -> Result<Option<ProfileRow>, AppError> {
        Ok(self.get(account_id).await?.filter(ProfileRow::is_complete))
    }

    /// Whether generation is currently allowed for this account.
    pub async fn is_complete(&self, account_id: Uuid) -> Result<bool, AppError> {
        Ok(self.complete_profile(account_id).await?.is_some())
    }
}

/// Trims everything, enforces the required-name rule and the length caps.
pub fn validate(input: ProfileInput) -> Result<ProfileFields, AppError> {
    let full_name = input.full_name.trim().to_string();
    if full_name.is_empty() {
        return Err(AppError::Validation("full_name is required".to_string()));
    }
    capped("full_name", &full_name, MAX_FULL_NAME)?;

    Ok(ProfileFields {
        full_name,
        city: optional("city", input.city, MAX_CITY)?,
        email: optional("email", input.email, MAX_EMAIL)?,
        phone: optional("phone", input.phone, MAX_PHONE)?,
        linkedin: optional("web", input.web, MAX_WEB)?,
        about: optional("about", input.about, MAX_ABOUT)?,
        gemini_api_key: optional("gemini_api_key", input.gemini_api_key, MAX_API_KEY)?,
    })
}

fn optional(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, AppError> {
    let Some(value) = value else { return Ok(None) };
    let value = value.trim().to_string();
    if value.is_empty() {
        return Ok(None);
    }
    capped(field, &value, max)?;
    Ok(Some(value))
}

fn capped(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
