//! Fallback policy: a rewrite never fails from the caller's point of view.

use tracing::warn;

use crate::{RewriteContext, TextRewriter};

/// Rewrite `raw`, or return it unchanged if the rewriter fails.
///
/// Blank input is returned as-is without calling the rewriter.
pub async fn refine_or_original(
    rewriter: &dyn TextRewriter,
    raw: &str,
    ctx: &RewriteContext,
) -> String {
    if raw.trim().is_empty() {
        return raw.to_owned();
    }

    match rewriter.rewrite(raw, ctx).await {
        Ok(refined) if !refined.trim().is_empty() => refined,
        Ok(_) => {
            warn!("rewriter returned blank text, keeping original");
            raw.to_owned()
        }
        Err(e) => {
            warn!("rewrite failed, keeping original: {}", e);
            raw.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockRewriter;
    use crate::RewriteError;

    fn ctx() -> RewriteContext {
        RewriteContext::new("Siti Aminah", "Staf Administrasi")
    }

    #[tokio::test]
    async fn successful_rewrite_is_returned() {
        let rewriter = MockRewriter::returning("Dengan hormat, saya lupa melakukan presensi pulang.");
        let out = refine_or_original(&rewriter, "lupa absen", &ctx()).await;

        assert_eq!(out, "Dengan hormat, saya lupa melakukan presensi pulang.");
        let calls = rewriter.calls.lock().unwrap();
        assert_eq!(calls[0].0, "lupa absen");
        assert_eq!(calls[0].1, ctx());
    }

    #[tokio::test]
    async fn failure_falls_back_to_input() {
        let rewriter = MockRewriter::failing(RewriteError::Http("503".into()));
        let out = refine_or_original(&rewriter, "lupa absen", &ctx()).await;

        assert_eq!(out, "lupa absen");
        assert_eq!(rewriter.call_count(), 1);
    }

    #[tokio::test]
    async fn blank_answer_falls_back_to_input() {
        let rewriter = MockRewriter::returning("  \n");
        assert_eq!(refine_or_original(&rewriter, "lupa absen", &ctx()).await, "lupa absen");
    }

    #[tokio::test]
    async fn blank_input_skips_the_call() {
        let rewriter = MockRewriter::prefixing("formal: ");
        assert_eq!(refine_or_original(&rewriter, "   ", &ctx()).await, "   ");
        assert_eq!(rewriter.call_count(), 0);
    }
}
