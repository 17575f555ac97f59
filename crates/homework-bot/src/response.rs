//! Shape checks on the decoded status API body.

use serde_json::Value;
use tracing::{instrument, warn};

use crate::error::BotError;

/// Key holding the list of homework records.
pub const HOMEWORKS_KEY: &str = "homeworks";
/// Key holding the server time to use as the next `from_date`.
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Validate the response and return its `homeworks` list.
///
/// Only the envelope is checked; record contents are validated by
/// [`crate::homework::parse_status`].
#[instrument(skip_all)]
pub fn check_response(response: &Value) -> Result<&[Value], BotError> {
    let Some(body) = response.as_object() else {
        return Err(BotError::ResponseShape(
            "ответ не является словарём".to_string(),
        ));
    };

    match body.get(HOMEWORKS_KEY) {
        Some(Value::Array(homeworks)) => Ok(homeworks.as_slice()),
        Some(_) => Err(BotError::ResponseShape(format!(
            "'{HOMEWORKS_KEY}' не является списком"
        ))),
        None => Err(BotError::ResponseShape(format!(
            "отсутствует ключ '{HOMEWORKS_KEY}'"
        ))),
    }
}

/// Compute the cursor for the next poll.
///
/// Takes `current_date` from the response when it is an integer. The cursor
/// never moves backwards.
pub fn next_cursor(response: &Value, current: i64) -> i64 {
    match response.get(CURRENT_DATE_KEY) {
        None | Some(Value::Null) => current,
        Some(value) => match value.as_i64() {
            Some(date) if date >= current => date,
            Some(date) => {
                warn!(current, received = date, "Ignoring current_date older than cursor");
                current
            }
            None => {
                warn!(received = %value, "Ignoring non-integer current_date");
                current
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_check_response_returns_homeworks() {
        let response = json!({"homeworks": [{"homework_name": "proj1"}], "current_date": 1});
        let homeworks = check_response(&response).unwrap();
        assert_eq!(homeworks.len(), 1);
        assert_eq!(homeworks[0]["homework_name"], "proj1");
    }

    #[test]
    fn test_check_response_accepts_empty_list() {
        let response = json!({"homeworks": []});
        assert!(check_response(&response).unwrap().is_empty());
    }

    #[test]
    fn test_check_response_rejects_bad_shapes() {
        let cases = [
            json!([]),
            json!("homeworks"),
            json!(null),
            json!({}),
            json!({"current_date": 1000}),
            json!({"homeworks": {}}),
            json!({"homeworks": "proj1"}),
            json!({"homeworks": null}),
        ];

        for case in &cases {
            let err = check_response(case).unwrap_err();
            assert!(
                matches!(err, BotError::ResponseShape(_)),
                "expected shape error for {case}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_next_cursor_advances() {
        assert_eq!(next_cursor(&json!({"homeworks": [], "current_date": 1000}), 0), 1000);
    }

    #[test]
    fn test_next_cursor_keeps_previous_when_absent() {
        assert_eq!(next_cursor(&json!({"homeworks": []}), 500), 500);
        assert_eq!(next_cursor(&json!({"current_date": null}), 500), 500);
    }

    #[test]
    fn test_next_cursor_never_decreases() {
        assert_eq!(next_cursor(&json!({"current_date": 100}), 500), 500);
    }

    #[test]
    fn test_next_cursor_ignores_non_integer() {
        assert_eq!(next_cursor(&json!({"current_date": "1000"}), 500), 500);
        assert_eq!(next_cursor(&json!({"current_date": 1000.5}), 500), 500);
    }
}
