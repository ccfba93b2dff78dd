//! Rewriter error type.

use thiserror::Error;

/// Errors returned by a rewriter's `rewrite` method.
///
/// None of these reach the user; they only decide what gets logged before
/// the caller falls back to the original text.
#[derive(Debug, Error, Clone)]
pub enum RewriteError {
    /// The service is not configured (e.g. no API key).
    #[error("rewriter unavailable: {0}")]
    Unavailable(String),

    /// Transport or non-success HTTP status.
    #[error("rewrite request failed: {0}")]
    Http(String),

    /// The service answered without usable text.
    #[error("rewriter returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for RewriteError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
