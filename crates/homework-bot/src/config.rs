//! Startup configuration.
//!
//! The three credentials are required and are checked explicitly so the
//! missing ones can be reported by name. Everything else has a default.

use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Practicum API token variable.
pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
/// Telegram bot token variable.
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
/// Target chat variable.
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Homework status endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Seconds between poll cycles.
pub const DEFAULT_RETRY_SECS: u64 = 600;

/// Secrets loaded once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`. Unset and blank values both count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut read = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let practicum_token = read(ENV_PRACTICUM_TOKEN);
        let telegram_token = read(ENV_TELEGRAM_TOKEN);
        let telegram_chat_id = read(ENV_TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Non-secret runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Homework status endpoint
    pub endpoint: String,
    /// Bot API base URL
    pub telegram_api_url: String,
    /// Sleep between cycles, identical after success and failure
    pub retry_interval: Duration,
    /// Initial `from_date` cursor
    pub from_date: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            telegram_api_url: notify::channels::telegram::DEFAULT_API_BASE.to_string(),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_SECS),
            from_date: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_all_credentials_present() {
        let creds = Credentials::from_lookup(lookup(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "42"),
        ]))
        .unwrap();

        assert_eq!(creds.practicum_token, "p-token");
        assert_eq!(creds.telegram_token, "t-token");
        assert_eq!(creds.telegram_chat_id, "42");
    }

    #[test]
    fn test_missing_credentials_are_named() {
        let err = Credentials::from_lookup(lookup(&[("TELEGRAM_TOKEN", "t-token")])).unwrap_err();
        assert_eq!(err.missing(), ["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let err = Credentials::from_lookup(lookup(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "   "),
            ("TELEGRAM_CHAT_ID", "42"),
        ]))
        .unwrap_err();
        assert_eq!(err.missing(), ["TELEGRAM_TOKEN"]);
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let creds = Credentials {
            practicum_token: "secret-p".to_string(),
            telegram_token: "secret-t".to_string(),
            telegram_chat_id: "42".to_string(),
        };
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.retry_interval, Duration::from_secs(600));
        assert_eq!(settings.from_date, 0);
    }
}
