//! Review verdicts and the status message template.

use std::fmt;

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::BotError;

/// Outcome of a homework review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Reviewer accepted the work
    Approved,
    /// A reviewer picked the work up
    Reviewing,
    /// Reviewer requested changes
    Rejected,
}

impl Verdict {
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Look up a verdict by its API status key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verdict| verdict.key() == key)
    }

    /// Status key as sent by the API.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable text sent to the chat.
    pub const fn text(&self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Format the chat message for a homework and its verdict.
pub fn status_message(homework_name: &str, verdict: Verdict) -> String {
    format!(
        "Изменился статус проверки работы \"{homework_name}\". {}",
        verdict.text()
    )
}

/// Build the status message for one homework record.
#[instrument(skip_all)]
pub fn parse_status(homework: &Value) -> Result<String, BotError> {
    if !homework.is_object() {
        return Err(BotError::ResponseShape(
            "запись о работе не является словарём".to_string(),
        ));
    }

    let homework_name = string_field(homework, "homework_name")?;
    let status = string_field(homework, "status")?;

    let Some(verdict) = Verdict::from_key(status) else {
        error!(status, "Found a status missing from the verdict table");
        return Err(BotError::UnknownStatus(status.to_string()));
    };

    info!(homework = homework_name, %verdict, "Homework verdict");
    Ok(status_message(homework_name, verdict))
}

fn string_field<'a>(homework: &'a Value, key: &'static str) -> Result<&'a str, BotError> {
    match homework.get(key) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(BotError::ResponseShape(format!(
            "поле '{key}' не является строкой"
        ))),
        None => Err(BotError::MissingKey(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_lookup() {
        for verdict in Verdict::ALL {
            assert_eq!(Verdict::from_key(verdict.key()), Some(verdict));
        }
        assert_eq!(Verdict::from_key("unknown"), None);
        assert_eq!(Verdict::from_key("Approved"), None);
        assert_eq!(Verdict::from_key(""), None);
    }

    #[test]
    fn test_parse_status_approved() {
        let homework = json!({"homework_name": "proj1", "status": "approved"});
        assert_eq!(
            parse_status(&homework).unwrap(),
            "Изменился статус проверки работы \"proj1\". Работа проверена: ревьюеру всё понравилось. Ура!"
        );
    }

    #[test]
    fn test_parse_status_reviewing_and_rejected() {
        let reviewing = json!({"homework_name": "hw", "status": "reviewing"});
        assert_eq!(
            parse_status(&reviewing).unwrap(),
            "Изменился статус проверки работы \"hw\". Работа взята на проверку ревьюером."
        );

        let rejected = json!({"homework_name": "hw", "status": "rejected"});
        assert_eq!(
            parse_status(&rejected).unwrap(),
            "Изменился статус проверки работы \"hw\". Работа проверена: у ревьюера есть замечания."
        );
    }

    #[test]
    fn test_parse_status_unknown_status() {
        for status in ["unknown", "APPROVED", "done", ""] {
            let homework = json!({"homework_name": "x", "status": status});
            let err = parse_status(&homework).unwrap_err();
            assert!(matches!(err, BotError::UnknownStatus(ref s) if s == status));
        }
    }

    #[test]
    fn test_parse_status_missing_keys() {
        let err = parse_status(&json!({"status": "approved"})).unwrap_err();
        assert!(matches!(err, BotError::MissingKey("homework_name")));

        let err = parse_status(&json!({"homework_name": "x"})).unwrap_err();
        assert!(matches!(err, BotError::MissingKey("status")));
    }

    #[test]
    fn test_parse_status_wrong_types() {
        let err = parse_status(&json!({"homework_name": "x", "status": 1})).unwrap_err();
        assert!(matches!(err, BotError::ResponseShape(_)));

        let err = parse_status(&json!(["x", "approved"])).unwrap_err();
        assert!(matches!(err, BotError::ResponseShape(_)));
    }
}
