//! HTTP Renderer client — the single point of entry for render calls.
//!
//! Speaks JSON to the renderer service: document bytes come back
//! base64-encoded. One synchronous call per generation, no retry policy —
//! a failure is surfaced to the caller, not retried.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::renderer::{Coverage, FilenamePair, ProfileSnapshot, RenderedResume, Renderer};

/// Rendering both documents can take a while on the far side.
const RENDER_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    profile: &'a ProfileSnapshot,
    job_url: &'a str,
}

#[derive(Debug, Deserialize)]
struct RenderResponse {
    /// Base64-encoded document bodies.
    pdf: String,
    docx: String,
    #[serde(default)]
    filenames: Option<FilenamePair>,
    coverage: Coverage,
}

#[derive(Clone)]
pub struct HttpRenderer {
    client: Client,
    render_url: String,
}

impl HttpRenderer {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(RENDER_TIMEOUT_SECS))
            .build()
            .context("Failed to build renderer HTTP client")?;
        Ok(Self {
            client,
            render_url: format!("{}/render", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn render(&self, profile: &ProfileSnapshot, job_url: &str) -> Result<RenderedResume> {
        let response = self
            .client
            .post(&self.render_url)
            .json(&RenderRequest { profile, job_url })
            .send()
            .await
            .context("Renderer request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Renderer returned {status}: {body}"));
        }

        let body: RenderResponse = response
            .json()
            .await
            .context("Renderer returned malformed JSON")?;

        let pdf = BASE64
            .decode(&body.pdf)
            .context("Renderer PDF payload is not valid base64")?;
        let docx = BASE64
            .decode(&body.docx)
            .context("Renderer DOCX payload is not valid base64")?;

        debug!(
            "Render succeeded: pdf={} bytes, docx={} bytes, score={:.2}",
            pdf.len(),
            docx.len(),
            body.coverage.score
        );

        Ok(RenderedResume {
            pdf: Bytes::from(pdf),
            docx: Bytes::from(docx),
            filenames: body.filenames,
            coverage: body.coverage,
        })
    }
}
