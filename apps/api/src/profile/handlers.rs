//! Axum route handlers for the Profile API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::extract::CurrentAccount;
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::profile::service::ProfileInput;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<ProfileRow>,
    /// Whether generation is currently allowed for this account.
    pub complete: bool,
}

/// GET /api/v1/profile
///
/// `profile` is null until the first save — not an error.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profiles.get(account_id).await?;
    let complete = profile.as_ref().is_some_and(ProfileRow::is_complete);
    Ok(Json(ProfileResponse { profile, complete }))
}

/// PUT /api/v1/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    CurrentAccount(account_id): CurrentAccount,
    Json(input): Json<ProfileInput>,
) -> Result<Json<ProfileRow>, AppError> {
    let row = state.profiles.save(account_id, input).await?;
    Ok(Json(row))
}
