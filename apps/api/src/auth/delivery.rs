//! Out-of-band delivery of one-time codes.
//!
//! There is no real email channel; the production implementation surfaces the
//! code on a dedicated tracing target so an operator can read it. The code
//! must not appear in any other log line.

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

#[async_trait]
pub trait CodeDelivery: Send + Sync {
    async fn deliver(&self, email: &str, code: &str) -> Result<()>;
}

/// Writes the code to the `verification_codes` tracing target.
pub struct OperatorLogDelivery;

#[async_trait]
impl CodeDelivery for OperatorLogDelivery {
    async fn deliver(&self, email: &str, code: &str) -> Result<()> {
        info!(target: "verification_codes", "Verification code for {email}: {code}");
        Ok(())
    }
}

/// Test delivery channel that records every (email, code) pair, letting tests
/// play the role of the user reading their inbox.
#[cfg(test)]
#[derive(Default)]
pub struct CapturingDelivery {
    pub sent: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl CapturingDelivery {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == email)
            .map(|(_, c)| c.clone())
    }
}

#[cfg(test)]
#[async_trait]
impl CodeDelivery for CapturingDelivery {
    async fn deliver(&self, email: &str, code: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), code.to_string()));
        Ok(())
    }
}
