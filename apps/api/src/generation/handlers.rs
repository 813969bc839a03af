//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extract::CurrentAccount;
use crate::errors::AppError;
use crate::generation::DocumentKind;
use crate::models::resume::GeneratedResumeRow;
use crate::renderer::Coverage;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub job_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ResumeDetailResponse {
    pub resume: GeneratedResumeRow,
    pub coverage: Option<Coverage>,
    pub host: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Runs one full generation and returns the new record.
pub async fn handle_generate(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(body): Json<GenerateBody>,
) -> Result<(StatusCode, Json<GeneratedResumeRow>), AppError> {
    let row = state.generations.generate(account_id, &body.job_url).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes?limit=
pub async fn handle_list_recent(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<GeneratedResumeRow>>, AppError> {
    let rows = state
        .generations
        .list_recent(account_id, query.limit)
        .await?;
    Ok(Json(rows))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let detail = state.generations.get_resume(account_id, id).await?;
    Ok(Json(ResumeDetailResponse {
        resume: detail.resume,
        coverage: detail.coverage,
        host: detail.host,
    }))
}

/// GET /api/v1/resumes/:id/download/:kind
///
/// Streams the artifact as an attachment. An unknown kind is a 404, same as
/// an unowned id — the route leaks nothing about what exists.
pub async fn handle_download(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path((id, kind)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let kind = DocumentKind::parse(&kind)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    let download = state
        .generations
        .get_for_download(account_id, id, kind)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, download.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.filename),
        ),
    ];
    Ok((headers, download.bytes).into_response())
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.generations.delete(account_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
