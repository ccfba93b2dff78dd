//! `rewriter` crate — the text-rewriting collaborator.
//!
//! Every rewriter implements [`TextRewriter`].  Callers never see its
//! failures: [`refine_or_original`] falls back to the input text on any
//! error.

pub mod error;
pub mod traits;
pub mod gemini;
pub mod fallback;
pub mod mock;

pub use error::RewriteError;
pub use traits::{RewriteContext, TextRewriter};
pub use gemini::{GeminiConfig, GeminiRewriter};
pub use fallback::refine_or_original;
