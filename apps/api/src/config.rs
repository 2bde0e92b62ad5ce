use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    /// Sessions fall back to an in-memory store when unset.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub optimizer_model: String,
    pub optimizer_max_tokens: u32,
    pub provider_timeout: Duration,
    pub model_catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            database_url: optional_env("DATABASE_URL"),
            port: parse_or("PORT", optional_env("PORT"), 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            optimizer_model: optional_env("OPTIMIZER_MODEL")
                .unwrap_or_else(|| "claude-sonnet-4-5".to_string()),
            optimizer_max_tokens: parse_or(
                "OPTIMIZER_MAX_TOKENS",
                optional_env("OPTIMIZER_MAX_TOKENS"),
                2048,
            )?,
            provider_timeout: Duration::from_secs(parse_or(
                "PROVIDER_TIMEOUT_SECS",
                optional_env("PROVIDER_TIMEOUT_SECS"),
                60,
            )?),
            model_catalog_path: optional_env("MODEL_CATALOG_PATH").map(PathBuf::from),
        })
    }
}

/// Blank values count as missing.
fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_env_rejects_blank_value() {
        std::env::set_var("PROMPT_FORGE_TEST_BLANK_KEY", "   ");
        let err = require_env("PROMPT_FORGE_TEST_BLANK_KEY").unwrap_err();
        assert!(err.to_string().contains("PROMPT_FORGE_TEST_BLANK_KEY"));

        std::env::set_var("PROMPT_FORGE_TEST_SET_KEY", " sk-test ");
        assert_eq!(require_env("PROMPT_FORGE_TEST_SET_KEY").unwrap(), "sk-test");
    }

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        assert_eq!(parse_or::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_parse_or_parses_value() {
        let timeout = parse_or::<u64>("PROVIDER_TIMEOUT_SECS", Some("15".to_string()), 60);
        assert_eq!(timeout.unwrap(), 15);
    }

    #[test]
    fn test_parse_or_names_the_bad_variable() {
        let err = parse_or::<u16>("PORT", Some("eighty".to_string()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
