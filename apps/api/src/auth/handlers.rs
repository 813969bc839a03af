//! Axum route handlers for the Auth API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extract::{BearerToken, CurrentAccount};
use crate::auth::service::SessionHandle;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RequestCodeBody {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub account_id: Uuid,
    pub email: String,
    pub verified: bool,
}

/// POST /api/v1/auth/request-code
///
/// Always answers 202 on accepted input — the response carries no hint of
/// whether the account already existed.
pub async fn handle_request_code(
    State(state): State<AppState>,
    Json(body): Json<RequestCodeBody>,
) -> Result<StatusCode, AppError> {
    state.auth.request_code(&body.email).await?;
    Ok(StatusCode::ACCEPTED)
}

/// POST /api/v1/auth/verify
pub async fn handle_verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<SessionHandle>, AppError> {
    let session = state.auth.verify_code(&body.email, &body.code).await?;
    Ok(Json(session))
}

/// GET /api/v1/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<MeResponse>, AppError> {
    let account = state.auth.current_account(account_id).await?;
    Ok(Json(MeResponse {
        account_id: account.id,
        email: account.email,
        verified: account.verified,
    }))
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<StatusCode, AppError> {
    state.auth.sign_out(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}
