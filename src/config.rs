use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::api::client::DEFAULT_API_URL;
use crate::state::search::DEFAULT_DEBOUNCE;
use crate::state::service::DEFAULT_FETCH_CONCURRENCY;
use crate::words::frequency::DEFAULT_TOP_N;

/// Central configuration loaded from environment variables.
///
/// Every setting has a default, so an empty environment is valid. The .env
/// file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// REST API base URL (defaults to https://jsonplaceholder.typicode.com).
    pub api_url: String,
    /// Quiet period before an interactive search term is sent.
    pub search_debounce: Duration,
    /// How many words the frequency table keeps.
    pub top_words: usize,
    /// Maximum comment requests in flight when a user is selected.
    pub fetch_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_debounce: DEFAULT_DEBOUNCE,
            top_words: DEFAULT_TOP_N,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// `load()` passes the process environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let debounce_ms = parse_var(
            &lookup,
            "USERLENS_SEARCH_DEBOUNCE_MS",
            defaults.search_debounce.as_millis() as u64,
        )?;

        let top_words = parse_var(&lookup, "USERLENS_TOP_WORDS", defaults.top_words)?;
        if top_words == 0 {
            anyhow::bail!("USERLENS_TOP_WORDS must be at least 1");
        }

        Ok(Self {
            api_url: lookup("USERLENS_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_url),
            search_debounce: Duration::from_millis(debounce_ms),
            top_words,
            fetch_concurrency: parse_var(
                &lookup,
                "USERLENS_FETCH_CONCURRENCY",
                defaults.fetch_concurrency,
            )?
            .max(1),
        })
    }
}

/// Parse `key` from `lookup`, falling back to `default` when unset or blank.
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a number, got {raw:?}")),
        _ => Ok(default),
    }
}
