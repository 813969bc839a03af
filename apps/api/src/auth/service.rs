//! Auth session manager — the passwordless sign-in state machine.
//!
//! Per account: UNVERIFIED → CODE_ISSUED → VERIFIED (session active).
//! `request_code` always overwrites any pending code; `verify_code` consumes
//! atomically, so a code works at most once.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::code::{code_ttl, generate_code};
use crate::auth::delivery::CodeDelivery;
use crate::auth::session::SessionStore;
use crate::errors::AppError;
use crate::models::account::AccountRow;
use crate::store::Store;

/// An established session, returned by `verify_code`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionHandle {
    pub token: String,
    pub account_id: Uuid,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn Store>,
    sessions: Arc<dyn SessionStore>,
    delivery: Arc<dyn CodeDelivery>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn Store>,
        sessions: Arc<dyn SessionStore>,
        delivery: Arc<dyn CodeDelivery>,
    ) -> Self {
        Self {
            store,
            sessions,
            delivery,
        }
    }

    /// Issues a fresh one-time code for `email`, creating the account on
    /// first contact. Returns nothing sensitive: the code only travels
    /// through the delivery channel.
    pub async fn request_code(&self, email: &str) -> Result<(), AppError> {
        let email = normalize_email(email)?;
        let code = generate_code();
        let expires_at = Utc::now() + code_ttl();

        let account = self
            .store
            .issue_code(&email, &code, expires_at)
            .await
            .map_err(AppError::Internal)?;
        info!("Issued verification code for account {}", account.id);

        self.delivery
            .deliver(&email, &code)
            .await
            .map_err(AppError::Internal)?;
        Ok(())
    }

    /// Exchanges a submitted code for a session. Every failure mode — unknown
    /// email, wrong code, expired code — collapses to `InvalidCredential`.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<SessionHandle, AppError> {
        let email = normalize_email(email)?;
        let code = code.trim();

        let account = self
            .store
            .consume_code(&email, code, Utc::now())
            .await
            .map_err(AppError::Internal)?
            .ok_or(AppError::InvalidCredential)?;

        let token = self
            .sessions
            .create(account.id)
            .await
            .map_err(AppError::Internal)?;
        info!("Account {} verified and signed in", account.id);

        Ok(SessionHandle {
            token,
            account_id: account.id,
        })
    }

    /// Resolves a bearer token to an account id.
    pub async fn resolve_session(&self, token: &str) -> Result<Uuid, AppError> {
        self.sessions
            .resolve(token)
            .await
            .map_err(AppError::Internal)?
            .ok_or(AppError::Unauthorized)
    }

    /// The account behind an active session.
    pub async fn current_account(&self, account_id: Uuid) -> Result<AccountRow, AppError> {
        self.store
            .account_by_id(account_id)
            .await
            .map_err(AppError::Internal)?
            .ok_or(AppError::Unauthorized)
    }

    /// Revokes the session. Idempotent: signing out twice is fine.
    pub async fn sign_out(&self, token: &str) -> Result<(), AppError> {
        self.sessions
            .revoke(token)
            .await
            .map_err(AppError::Internal)
    }
}

/// Trims and lowercases the email; rejects input that cannot be an address.
fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(
            "email must be a valid address".to_string(),
        ));
    }
    Ok(email)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    use crate::auth::delivery::CapturingDelivery;
    use crate::auth::session::MemorySessionStore;
    use crate::store::memory::MemoryStore;

    struct Harness {
        auth: AuthService,
        store: Arc<MemoryStore>,
        delivery: Arc<CapturingDelivery>,
    }

    fn harness() -> Harness {
        let store = Arc::new(MemoryStore::default());
        let delivery = Arc::new(CapturingDelivery::default());
        let auth = AuthService::new(
            store.clone(),
            Arc::new(MemorySessionStore::default()),
            delivery.clone(),
        );
        Harness {
            auth,
            store,
            delivery,
        }
    }

    #[tokio::test]
    async fn test_request_then_verify_establishes_session() {
        let h = harness();
        h.auth.request_code("a@x.com").await.unwrap();
        let code = h.delivery.last_code_for("a@x.com").unwrap();

        let session = h.auth.verify_code("a@x.com", &code).await.unwrap();
        let account = h.auth.current_account(session.account_id).await.unwrap();
        assert!(account.verified);
        assert!(account.verify_code.is_none());
        assert!(account.verify_expiry.is_none());

        let resolved = h.auth.resolve_session(&session.token).await.unwrap();
        assert_eq!(resolved, session.account_id);
    }

    #[tokio::test]
    async fn test_second_request_invalidates_first_code() {
        let h = harness();
        h.auth.request_code("a@x.com").await.unwrap();
        let first = h.delivery.last_code_for("a@x.com").unwrap();
        h.auth.request_code("a@x.com").await.unwrap();
        let second = h.delivery.last_code_for("a@x.com").unwrap();

        if first != second {
            let err = h.auth.verify_code("a@x.com", &first).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidCredential));
        }
        h.auth.verify_code("a@x.com", &second).await.unwrap();
    }

    #[tokio::test]
    async fn test_code_is_single_use() {
        let h = harness();
        h.auth.request_code("a@x.com").await.unwrap();
        let code = h.delivery.last_code_for("a@x.com").unwrap();

        h.auth.verify_code("a@x.com", &code).await.unwrap();
        let err = h.auth.verify_code("a@x.com", &code).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_expiry_boundary() {
        let h = harness();
        let now = Utc::now();

        // now == expiry: still valid.
        h.store
            .issue_code("on@x.com", "123456", now)
            .await
            .unwrap();
        assert!(h
            .store
            .consume_code("on@x.com", "123456", now)
            .await
            .unwrap()
            .is_some());

        // One second past expiry: rejected even with the correct code.
        h.store
            .issue_code("late@x.com", "123456", now)
            .await
            .unwrap();
        assert!(h
            .store
            .consume_code("late@x.com", "123456", now + Duration::seconds(1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_expired_code_fails_through_service() {
        let h = harness();
        h.store
            .issue_code("a@x.com", "123456", Utc::now() - Duration::minutes(1))
            .await
            .unwrap();
        let err = h.auth.verify_code("a@x.com", "123456").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_failed_verify_leaves_account_unchanged() {
        let h = harness();
        h.auth.request_code("a@x.com").await.unwrap();
        let code = h.delivery.last_code_for("a@x.com").unwrap();
        let wrong = if code == "000000" { "000001" } else { "000000" };

        let err = h.auth.verify_code("a@x.com", wrong).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredential));

        // The pending code survives a failed attempt.
        h.auth.verify_code("a@x.com", &code).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_email_fails_like_bad_code() {
        let h = harness();
        let err = h
            .auth
            .verify_code("nobody@x.com", "123456")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredential));
    }

    #[tokio::test]
    async fn test_leading_zeros_are_significant() {
        let h = harness();
        h.store
            .issue_code("a@x.com", "004217", Utc::now() + Duration::minutes(10))
            .await
            .unwrap();
        // "4217" is not "004217" — exact string compare, no numeric coercion.
        let err = h.auth.verify_code("a@x.com", "4217").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredential));
        h.auth.verify_code("a@x.com", "004217").await.unwrap();
    }

    #[tokio::test]
    async fn test_email_is_normalized() {
        let h = harness();
        h.auth.request_code("  A@X.com ").await.unwrap();
        let code = h.delivery.last_code_for("a@x.com").unwrap();
        h.auth.verify_code("a@x.COM", &code).await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_email_rejected() {
        let h = harness();
        assert!(matches!(
            h.auth.request_code("   ").await.unwrap_err(),
            AppError::Validation(_)
        ));
        assert!(matches!(
            h.auth.request_code("not-an-address").await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_sign_out_revokes_session() {
        let h = harness();
        h.auth.request_code("a@x.com").await.unwrap();
        let code = h.delivery.last_code_for("a@x.com").unwrap();
        let session = h.auth.verify_code("a@x.com", &code).await.unwrap();

        h.auth.sign_out(&session.token).await.unwrap();
        let err = h.auth.resolve_session(&session.token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        // Idempotent.
        h.auth.sign_out(&session.token).await.unwrap();
    }
}
