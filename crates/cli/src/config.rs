//! Runtime configuration.
//!
//! Every setting comes from the environment.  `SANGGAH_DATA_DIR` is read by
//! the `--data-dir` argument and overrides the default below.
//!
//! | variable | default | meaning |
//! |----------|---------|---------|
//! | SANGGAH_DATA_DIR | ./sanggah-data | directory holding the collections |
//! | SANGGAH_SEED | true | write the demo employees on first run (`0`/`no`/`off` disable) |
//! | SANGGAH_LOG | info | log level when `RUST_LOG` is unset |
//! | GEMINI_API_KEY (or API_KEY) | unset | rewriter credential |
//! | GEMINI_MODEL | gemini-2.5-flash | rewriter model |
//! | GEMINI_ENDPOINT | https://generativelanguage.googleapis.com | rewriter base URL |
//! | GEMINI_TIMEOUT_MS | 30000 | rewriter request timeout |

use std::path::PathBuf;
use std::time::Duration;

use rewriter::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use rewriter::GeminiConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub seed: bool,
    pub log_level: String,
    pub gemini: GeminiConfig,
    /// Problems found while reading the environment, logged once logging is up.
    pub warnings: Vec<String>,
}

pub const DEFAULT_DATA_DIR: &str = "./sanggah-data";

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Accepts the usual on/off spellings; anything else yields `None`.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "y" => Some(true),
        "0" | "false" | "no" | "off" | "n" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut warnings = Vec::new();
        let seed = match var("SANGGAH_SEED") {
            None => true,
            Some(v) => parse_flag(&v).unwrap_or_else(|| {
                warnings.push(format!("SANGGAH_SEED={v} is not a boolean, seeding stays enabled"));
                true
            }),
        };

        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed,
            log_level: var("SANGGAH_LOG").unwrap_or_else(|| "info".into()),
            gemini: GeminiConfig {
                api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                endpoint: var("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
                timeout: Duration::from_millis(
                    var("GEMINI_TIMEOUT_MS")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(30_000),
                ),
            },
            warnings,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
