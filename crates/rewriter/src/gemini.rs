//! Gemini `generateContent` backend.
//!
//! One request per call: no retry, no streaming.  Authentication is the
//! `x-goog-api-key` header.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use crate::{RewriteContext, RewriteError, TextRewriter};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Connection settings for [`GeminiRewriter`].
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// `None` disables the backend; every call then reports `Unavailable`.
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL, without the `/v1beta/...` path.
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Rewrites dispute reasons through the Gemini API.
pub struct GeminiRewriter {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiRewriter {
    pub fn new(config: GeminiConfig) -> Result<Self, RewriteError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

/// Prompt asking for a formal, polite single paragraph in standard Indonesian.
pub fn build_prompt(raw: &str, ctx: &RewriteContext) -> String {
    format!(
        "Buatkan kalimat formal dan sopan untuk pengajuan sanggah absen (koreksi presensi) pegawai.\n\
         \n\
         Data Pegawai:\n\
         Nama: {name}\n\
         Jabatan: {position}\n\
         \n\
         Alasan mentah: \"{raw}\"\n\
         \n\
         Instruksi:\n\
         - Gunakan Bahasa Indonesia baku.\n\
         - Langsung berikan isi alasannya saja (satu paragraf), tidak perlu header surat.\n\
         - Tone harus profesional dan memohon.",
        name = ctx.employee_name,
        position = ctx.employee_position,
    )
}

// ---------------------------------------------------------------------------
// Response shape (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Trimmed text of the first candidate, or `None` if it is blank.
fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

#[async_trait]
impl TextRewriter for GeminiRewriter {
    #[instrument(skip(self, raw, ctx), fields(model = %self.config.model))]
    async fn rewrite(&self, raw: &str, ctx: &RewriteContext) -> Result<String, RewriteError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| RewriteError::Unavailable("API key not configured".into()))?;

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(raw, ctx) }] }]
        });

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RewriteError::Http(format!("service answered {status}")));
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = extract_text(parsed).ok_or(RewriteError::EmptyResponse)?;
        debug!("rewrite produced {} chars", text.len());
        Ok(text)
    }
}
