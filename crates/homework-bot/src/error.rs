//! Error types for the poll pipeline.
//!
//! `Display` output of [`BotError`] is shown in the chat as part of the
//! failure notification.

use thiserror::Error;

/// A failure in one stage of the fetch → validate → extract pipeline.
#[derive(Debug, Error)]
pub enum BotError {
    /// The request to the status API could not complete
    #[error("Ошибка отправки запроса на сервер API: {0}")]
    Transport(#[source] reqwest::Error),

    /// The status API answered with something other than 200 OK
    #[error("Сервер недоступен, код: {status}")]
    ServerUnavailable { status: u16 },

    /// The body is not valid JSON
    #[error("Некорректный ответ API: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The body is JSON but not the expected shape
    #[error("Неверный формат ответа API: {0}")]
    ResponseShape(String),

    /// A homework record lacks a required key
    #[error("В ответе API отсутствует ключ '{0}'")]
    MissingKey(&'static str),

    /// A homework record carries a status outside the verdict table
    #[error("Некорректные данные по статусу ДЗ: '{0}'")]
    UnknownStatus(String),
}

impl BotError {
    /// Short machine-readable name used in structured logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::ServerUnavailable { .. } => "server_unavailable",
            Self::InvalidJson(_) => "invalid_json",
            Self::ResponseShape(_) => "response_shape",
            Self::MissingKey(_) => "missing_key",
            Self::UnknownStatus(_) => "unknown_status",
        }
    }
}

/// Startup configuration errors. These are the only fatal errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
}

impl ConfigError {
    /// Names of the variables that were not set.
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::MissingVars(names) => names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_unavailable_message() {
        let err = BotError::ServerUnavailable { status: 503 };
        assert_eq!(err.to_string(), "Сервер недоступен, код: 503");
        assert_eq!(err.kind(), "server_unavailable");
    }

    #[test]
    fn test_missing_vars_message() {
        let err = ConfigError::MissingVars(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
        assert_eq!(err.missing(), ["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
    }
}
