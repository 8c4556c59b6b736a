//! Startup configuration, read once from the environment.
//!
//! Required credentials are checked together so a misconfigured deployment
//! reports every missing name at once. Optional settings fall back to the
//! production defaults.

use std::path::PathBuf;
use std::time::Duration;

use homework_core::{BotError, DEFAULT_PRACTICUM_ENDPOINT, DEFAULT_TELEGRAM_API_URL};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);
pub const DEFAULT_LOG_FILE: &str = "logs.log";

/// The three secrets the bot cannot run without.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    /// Homework status endpoint, queried with `?from_date=`.
    pub practicum_endpoint: String,
    /// Bot API base URL (without `/bot<token>`).
    pub telegram_api_url: String,
    pub poll_interval: Duration,
    pub log_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut require = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };
        let practicum_token = require("PRACTICUM_TOKEN");
        let telegram_token = require("TELEGRAM_TOKEN");
        let telegram_chat_id = require("TELEGRAM_CHAT_ID");
        if !missing.is_empty() {
            return Err(BotError::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let poll_interval = match get("POLL_INTERVAL_SECS") {
            None => DEFAULT_POLL_INTERVAL,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(BotError::Config(format!(
                        "POLL_INTERVAL_SECS must be a positive integer, got {raw:?}"
                    )))
                }
            },
        };

        Ok(Self {
            credentials: Credentials {
                practicum_token,
                telegram_token,
                telegram_chat_id,
            },
            practicum_endpoint: get("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            poll_interval,
            log_file: log_file_from(&lookup),
        })
    }
}

/// Log destination. Resolved separately so logging can start before the
/// credentials are validated.
pub fn log_file_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("HOMEWORK_BOT_LOG")
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
}
