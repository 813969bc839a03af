use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A career profile row. At most one per account (UNIQUE on account_id).
///
/// The UI collects a single free-text "web" link which is stored in
/// `linkedin`; `github` stays null until the product grows a second field.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub full_name: String,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub about: Option<String>,
    pub gemini_api_key: Option<String>,
}

impl ProfileRow {
    /// The generation gate. This is the single definition of "complete";
    /// the profile service, its handlers, and the orchestrator all go
    /// through it.
    pub fn is_complete(&self) -> bool {
        !self.full_name.trim().is_empty()
    }
}
