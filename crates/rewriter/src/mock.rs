//! `MockRewriter` — a test double for `TextRewriter`.
//!
//! Useful in unit and integration tests where calling the real service is
//! either impossible or irrelevant.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::{RewriteContext, RewriteError, TextRewriter};

/// Behaviour injected into `MockRewriter` at construction time.
pub enum MockBehaviour {
    /// Return a fixed text.
    Return(String),
    /// Return `"<prefix><raw>"`.
    Prefix(String),
    /// Fail with the given error.
    Fail(RewriteError),
}

/// A mock rewriter that records every call it receives and answers with a
/// programmer-specified result.
pub struct MockRewriter {
    pub behaviour: MockBehaviour,
    /// All `(raw, ctx)` pairs seen by this rewriter, in call order.
    pub calls: Arc<Mutex<Vec<(String, RewriteContext)>>>,
}

impl MockRewriter {
    fn with(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always answers with `text`.
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with(MockBehaviour::Return(text.into()))
    }

    /// Create a mock that prepends `prefix` to the input.
    pub fn prefixing(prefix: impl Into<String>) -> Self {
        Self::with(MockBehaviour::Prefix(prefix.into()))
    }

    /// Create a mock that always fails.
    pub fn failing(err: RewriteError) -> Self {
        Self::with(MockBehaviour::Fail(err))
    }

    /// Number of times `rewrite` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextRewriter for MockRewriter {
    async fn rewrite(&self, raw: &str, ctx: &RewriteContext) -> Result<String, RewriteError> {
        self.calls.lock().unwrap().push((raw.to_owned(), ctx.clone()));

        match &self.behaviour {
            MockBehaviour::Return(text) => Ok(text.clone()),
            MockBehaviour::Prefix(prefix) => Ok(format!("{prefix}{raw}")),
            MockBehaviour::Fail(err) => Err(err.clone()),
        }
    }
}
