//! The `TextRewriter` trait — the contract every rewriting backend must fulfil.

use async_trait::async_trait;

use crate::RewriteError;

/// Who the text is written for.  Fed into the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteContext {
    pub employee_name: String,
    pub employee_position: String,
}

impl RewriteContext {
    pub fn new(employee_name: impl Into<String>, employee_position: impl Into<String>) -> Self {
        Self {
            employee_name: employee_name.into(),
            employee_position: employee_position.into(),
        }
    }
}

/// Turns a rough justification into formal wording.
#[async_trait]
pub trait TextRewriter: Send + Sync {
    /// Rewrite `raw` for the employee described by `ctx`.
    async fn rewrite(&self, raw: &str, ctx: &RewriteContext) -> Result<String, RewriteError>;
}
