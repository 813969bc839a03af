//! Generation orchestrator — coordinates the Renderer, artifact storage, and
//! the metadata record, and owns the lifecycle of generated artifacts.
//!
//! Flow: profile gate → render → persist artifacts → insert record.
//!
//! Two tabs generating for the same account at once are NOT deduplicated:
//! each call writes under its own unique scope and inserts its own record.
//! That is accepted behavior, made safe by the per-call key prefixes.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::filename::{derive_filenames, job_host};
use crate::generation::DocumentKind;
use crate::models::resume::GeneratedResumeRow;
use crate::profile::service::ProfileService;
use crate::renderer::{Coverage, ProfileSnapshot, Renderer};
use crate::storage::ArtifactStore;
use crate::store::Store;

/// Default and hard bound for `list_recent`.
pub const DEFAULT_RECENT_LIMIT: i64 = 5;
pub const MAX_RECENT_LIMIT: i64 = 50;

/// Longest accepted job-posting URL.
pub const MAX_JOB_URL_CHARS: usize = 2000;

/// A downloadable artifact: body, suggested filename, MIME type.
#[derive(Debug)]
pub struct Download {
    pub bytes: Bytes,
    pub filename: String,
    pub content_type: &'static str,
}

/// A record expanded for display: decoded coverage plus the job-URL host.
#[derive(Debug)]
pub struct ResumeDetail {
    pub resume: GeneratedResumeRow,
    pub coverage: Option<Coverage>,
    pub host: String,
}

#[derive(Clone)]
pub struct GenerationService {
    store: Arc<dyn Store>,
    profiles: ProfileService,
    artifacts: Arc<dyn ArtifactStore>,
    renderer: Arc<dyn Renderer>,
}

impl GenerationService {
    pub fn new(
        store: Arc<dyn Store>,
        profiles: ProfileService,
        artifacts: Arc<dyn ArtifactStore>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            store,
            profiles,
            artifacts,
            renderer,
        }
    }

    /// Runs one generation to completion: no retries, no cancellation.
    ///
    /// A Renderer failure persists nothing. An insert failure after the
    /// artifacts were written triggers best-effort artifact cleanup so no
    /// orphaned files outlive the missing record.
    pub async fn generate(
        &self,
        account_id: Uuid,
        job_url: &str,
    ) -> Result<GeneratedResumeRow, AppError> {
        let profile = self
            .profiles
            .complete_profile(account_id)
            .await?
            .ok_or(AppError::ProfileIncomplete)?;

        let job_url = job_url.trim();
        if job_url.is_empty() {
            return Err(AppError::MissingUrl);
        }
        if job_url.chars().count() > MAX_JOB_URL_CHARS {
            return Err(AppError::Validation(format!(
                "job_url must be at most {MAX_JOB_URL_CHARS} characters"
            )));
        }

        let account = self
            .store
            .account_by_id(account_id)
            .await
            .map_err(AppError::Internal)?
            .ok_or_else(|| AppError::NotFound(format!("Account {account_id} not found")))?;
        let snapshot = ProfileSnapshot::assemble(&profile, &account);

        let rendered = match self.renderer.render(&snapshot, job_url).await {
            Ok(r) => r,
            Err(e) => {
                warn!("Render failed for account {account_id}: {e:#}");
                return Err(AppError::RenderFailed);
            }
        };

        let id = Uuid::new_v4();
        let now = Utc::now();
        let filenames = rendered
            .filenames
            .unwrap_or_else(|| derive_filenames(&profile.full_name, job_url, now.date_naive()));

        // Per-call unique scope; concurrent generations cannot collide.
        let scope = format!("resumes/{account_id}/{id}");
        let row = GeneratedResumeRow {
            id,
            account_id,
            job_url: job_url.to_string(),
            created_at: now,
            pdf_path: format!("{scope}/{}", filenames.pdf),
            docx_path: format!("{scope}/{}", filenames.docx),
            pdf_name: filenames.pdf,
            docx_name: filenames.docx,
            coverage_json: serde_json::to_value(&rendered.coverage).ok(),
        };

        self.artifacts
            .put(&row.pdf_path, rendered.pdf, DocumentKind::Pdf.content_type())
            .await
            .map_err(AppError::Internal)?;
        self.artifacts
            .put(
                &row.docx_path,
                rendered.docx,
                DocumentKind::Docx.content_type(),
            )
            .await
            .map_err(AppError::Internal)?;

        if let Err(e) = self.store.insert_resume(&row).await {
            // The record is the source of truth; artifacts without one are
            // orphans. Clean them up before surfacing the failure.
            self.cleanup_artifacts(&row).await;
            return Err(AppError::Internal(e));
        }

        info!(
            "Generated resume {} for account {} ({})",
            row.id, account_id, row.pdf_name
        );
        Ok(row)
    }

    pub async fn list_recent(
        &self,
        account_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<GeneratedResumeRow>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT);
        self.store
            .recent_resumes(account_id, limit)
            .await
            .map_err(AppError::Internal)
    }

    pub async fn get_resume(
        &self,
        account_id: Uuid,
        id: Uuid,
    ) -> Result<ResumeDetail, AppError> {
        let resume = self.owned(account_id, id).await?;
        let coverage = resume
            .coverage_json
            .clone()
            .and_then(|v| serde_json::from_value(v).ok());
        let host = job_host(&resume.job_url);
        Ok(ResumeDetail {
            resume,
            coverage,
            host,
        })
    }

    pub async fn get_for_download(
        &self,
        account_id: Uuid,
        id: Uuid,
        kind: DocumentKind,
    ) -> Result<Download, AppError> {
        let row = self.owned(account_id, id).await?;
        let (path, filename) = match kind {
            DocumentKind::Pdf => (&row.pdf_path, row.pdf_name.clone()),
            DocumentKind::Docx => (&row.docx_path, row.docx_name.clone()),
        };
        let bytes = self.artifacts.get(path).await.map_err(AppError::Internal)?;
        Ok(Download {
            bytes,
            filename,
            content_type: kind.content_type(),
        })
    }

    /// Deletes a record and its artifacts. Artifact cleanup is best-effort;
    /// the metadata delete happens regardless of how cleanup went.
    pub async fn delete(&self, account_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let row = self.owned(account_id, id).await?;
        self.cleanup_artifacts(&row).await;

        let removed = self
            .store
            .delete_resume(account_id, id)
            .await
            .map_err(AppError::Internal)?;
        if !removed {
            // Raced with another delete of the same record.
            return Err(AppError::NotFound(format!("Resume {id} not found")));
        }
        info!("Deleted resume {id} for account {account_id}");
        Ok(())
    }

    async fn owned(&self, account_id: Uuid, id: Uuid) -> Result<GeneratedResumeRow, AppError> {
        self.store
            .resume_owned(account_id, id)
            .await
            .map_err(AppError::Internal)?
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
    }

    /// Idempotent artifact cleanup. Failures are logged, never raised — a
    /// half-missing scope must not block record deletion.
    async fn cleanup_artifacts(&self, row: &GeneratedResumeRow) {
        for path in [&row.pdf_path, &row.docx_path] {
            if let Err(e) = self.artifacts.delete(path).await {
                warn!("Failed to remove artifact {path}: {e:#}");
            }
        }
        if let Some((scope, _)) = row.pdf_path.rsplit_once('/') {
            if let Err(e) = self.artifacts.remove_scope(scope).await {
                warn!("Failed to remove scope {scope}: {e:#}");
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
