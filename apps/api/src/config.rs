use anyhow::{bail, Context, Result};

const DEFAULT_LLM_API_URL: &str = "https://api.mistral.ai/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "mistral-small-latest";

/// Application configuration loaded from environment variables.
/// Fails at startup if the provider credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub score_threshold: f64,
    pub max_refine_tries: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. `from_env` passes the
    /// process environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            llm_api_key: require(&lookup, "MISTRAL_API_KEY")?,
            llm_api_url: lookup("LLM_API_URL").unwrap_or_else(|| DEFAULT_LLM_API_URL.to_string()),
            llm_model: lookup("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", 60)?,
            score_threshold: score_threshold(&lookup)?,
            max_refine_tries: parse_or(&lookup, "MAX_REFINE_TRIES", 3)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// The loop compares review scores against this, so it must sit on the
/// 0–10 rating scale. NaN is rejected by the range check.
fn score_threshold<F>(lookup: &F) -> Result<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let threshold: f64 = parse_or(lookup, "SCORE_THRESHOLD", 8.0)?;
    if !(0.0..=10.0).contains(&threshold) {
        bail!("SCORE_THRESHOLD must be between 0 and 10, got {threshold}");
    }
    Ok(threshold)
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}
