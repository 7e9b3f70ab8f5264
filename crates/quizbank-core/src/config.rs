//! quizbank configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::favorites::DEFAULT_FAVORITES_KEY;
use crate::loader::DEFAULT_TIMEOUT_SECS;

/// Top-level quizbank configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizbankConfig {
    /// Question bank location: a file path or an `http(s)://` URL.
    #[serde(default = "default_questions")]
    pub questions: String,
    /// File holding persisted client-side slots.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// Slot name for the favorite list.
    #[serde(default = "default_favorites_key")]
    pub favorites_key: String,
    /// Timeout for fetching the bank over HTTP.
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_questions() -> String {
    "vprasanja.json".to_string()
}
fn default_storage_path() -> PathBuf {
    PathBuf::from(".quizbank/storage.json")
}
fn default_favorites_key() -> String {
    DEFAULT_FAVORITES_KEY.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for QuizbankConfig {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            storage_path: default_storage_path(),
            favorites_key: default_favorites_key(),
            request_timeout_secs: default_timeout(),
        }
    }
}

impl QuizbankConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizbank.toml` in the current directory
/// 2. `~/.config/quizbank/config.toml`
///
/// Environment variable overrides: `QUIZBANK_QUESTIONS`, `QUIZBANK_STORAGE`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizbank.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            toml::from_str::<QuizbankConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizbankConfig::default(),
    };

    if let Ok(questions) = std::env::var("QUIZBANK_QUESTIONS") {
        config.questions = questions;
    }
    if let Ok(storage) = std::env::var("QUIZBANK_STORAGE") {
        config.storage_path = PathBuf::from(storage);
    }

    config.questions = resolve_env_vars(&config.questions);
    config.storage_path = PathBuf::from(resolve_env_vars(&config.storage_path.to_string_lossy()));
    config.favorites_key = resolve_env_vars(&config.favorites_key);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizbank"))
}
