use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{RetryPolicy, ANTHROPIC_API_URL};
use crate::locale::Language;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub port: u16,
    pub rust_log: String,
    pub llm_max_attempts: u32,
    pub llm_backoff_base: Duration,
    pub default_language: Language,
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_api_url: std::env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| ANTHROPIC_API_URL.to_string()),
            port: parse_env("PORT", 8080).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_max_attempts: parse_env("LLM_MAX_ATTEMPTS", 3)
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?,
            llm_backoff_base: Duration::from_millis(
                parse_env("LLM_BACKOFF_BASE_MS", 1000)
                    .context("LLM_BACKOFF_BASE_MS must be a number of milliseconds")?,
            ),
            default_language: parse_env("DEFAULT_LANGUAGE", Language::En)
                .context("DEFAULT_LANGUAGE must be 'en' or 'ar'")?,
            session_ttl: Duration::from_secs(
                60 * parse_env::<u64>("SESSION_TTL_MINUTES", 60)
                    .context("SESSION_TTL_MINUTES must be a number of minutes")?,
            ),
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.llm_max_attempts, self.llm_backoff_base)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid value '{raw}' for {key}: {e}")),
        Err(_) => Ok(default),
    }
}
