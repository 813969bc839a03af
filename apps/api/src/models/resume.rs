use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A generated-resume record. Append-mostly: created after a successful
/// render, destroyed only by an explicit owner delete.
///
/// `pdf_path` / `docx_path` are artifact-store keys under the record's
/// per-generation scope; both are removed together with the row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GeneratedResumeRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub job_url: String,
    pub created_at: DateTime<Utc>,
    pub pdf_path: String,
    pub docx_path: String,
    pub pdf_name: String,
    pub docx_name: String,
    /// Opaque coverage summary produced by the Renderer (score + hits + misses).
    pub coverage_json: Option<Value>,
}
