pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::generation::handlers as generation;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API
        .route("/api/v1/auth/request-code", post(auth::handle_request_code))
        .route("/api/v1/auth/verify", post(auth::handle_verify))
        .route("/api/v1/auth/me", get(auth::handle_me))
        .route("/api/v1/auth/signout", post(auth::handle_sign_out))
        // Profile API
        .route("/api/v1/profile", get(profile::handle_get_profile))
        .route("/api/v1/profile", put(profile::handle_save_profile))
        // Generation API
        .route("/api/v1/resumes", post(generation::handle_generate))
        .route("/api/v1/resumes", get(generation::handle_list_recent))
        .route("/api/v1/resumes/:id", get(generation::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/download/:kind",
            get(generation::handle_download),
        )
        .route("/api/v1/resumes/:id", delete(generation::handle_delete))
        .with_state(state)
}
