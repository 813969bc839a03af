use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// An account row. The identity anchor: one per normalized email address.
///
/// `verify_code` and `verify_expiry` are always set or cleared together
/// (enforced by a CHECK constraint). Deliberately not `Serialize` — the
/// pending code must never leave the process through an API response.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub verified: bool,
    pub verify_code: Option<String>,
    pub verify_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
