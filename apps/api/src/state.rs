use crate::auth::service::AuthService;
use crate::generation::service::GenerationService;
use crate::profile::service::ProfileService;

/// Shared application state injected into all route handlers via Axum
/// extractors. All per-request context flows through here explicitly —
/// there is no thread-bound session or connection state anywhere.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub profiles: ProfileService,
    pub generations: GenerationService,
}
