//! quizkit configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_CODE_LANGUAGE;
use crate::scoring::DEFAULT_PASSING_THRESHOLD;
use crate::session::SessionOptions;

/// Top-level quizkit configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Score percentage required to pass (0-100).
    #[serde(default = "default_passing_threshold")]
    pub passing_threshold: u8,
    /// How many row errors an import summary shows.
    #[serde(default = "default_max_reported_errors")]
    pub max_reported_errors: usize,
    /// Language given to new code questions.
    #[serde(default = "default_code_language")]
    pub default_code_language: String,
    /// Attempt limit per learner and quiz (None = unlimited).
    #[serde(default)]
    pub max_attempts: Option<u32>,
    /// Minutes allowed per attempt (None = untimed).
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    /// Present questions in random order.
    #[serde(default)]
    pub randomize_questions: bool,
    /// Present each question's options in random order.
    #[serde(default)]
    pub randomize_options: bool,
}

fn default_passing_threshold() -> u8 {
    DEFAULT_PASSING_THRESHOLD
}
fn default_max_reported_errors() -> usize {
    10
}
fn default_code_language() -> String {
    DEFAULT_CODE_LANGUAGE.to_string()
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            passing_threshold: default_passing_threshold(),
            max_reported_errors: default_max_reported_errors(),
            default_code_language: default_code_language(),
            max_attempts: None,
            time_limit_minutes: None,
            randomize_questions: false,
            randomize_options: false,
        }
    }
}

impl QuizkitConfig {
    /// Reject values that make no sense.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.passing_threshold <= 100,
            "passing_threshold must be between 0 and 100, got {}",
            self.passing_threshold
        );
        anyhow::ensure!(
            self.max_reported_errors >= 1,
            "max_reported_errors must be at least 1"
        );
        anyhow::ensure!(
            !self.default_code_language.trim().is_empty(),
            "default_code_language must not be empty"
        );
        anyhow::ensure!(
            self.time_limit_minutes != Some(0),
            "time_limit_minutes must be at least 1"
        );
        Ok(())
    }

    /// How quiz sessions should be started under this config.
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            randomize_questions: self.randomize_questions,
            randomize_options: self.randomize_options,
            time_limit_minutes: self.time_limit_minutes,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable overrides: `QUIZKIT_PASSING_THRESHOLD`,
/// `QUIZKIT_MAX_REPORTED_ERRORS`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
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
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    if let Ok(value) = std::env::var("QUIZKIT_PASSING_THRESHOLD") {
        config.passing_threshold = value
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZKIT_PASSING_THRESHOLD: {value}"))?;
    }
    if let Ok(value) = std::env::var("QUIZKIT_MAX_REPORTED_ERRORS") {
        config.max_reported_errors = value
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZKIT_MAX_REPORTED_ERRORS: {value}"))?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a TOML config string (useful for testing).
pub fn parse_config(content: &str) -> Result<QuizkitConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}
