//! Client for the Practicum homework status API.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::error::BotError;

/// Client for the homework status endpoint.
#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    client: reqwest::Client,
}

impl PracticumClient {
    /// Create a client for `endpoint` authenticating with `token`.
    ///
    /// No request timeout is configured beyond the client defaults.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework statuses changed since `from_date` (unix seconds).
    ///
    /// Returns the decoded body unchanged; shape checks happen in
    /// [`crate::response::check_response`].
    #[instrument(name = "get_api_answer", skip(self))]
    pub async fn get_api_answer(&self, from_date: i64) -> Result<Value, BotError> {
        debug!(endpoint = %self.endpoint, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Request to the status API failed");
                BotError::Transport(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            error!(status = status.as_u16(), "Status API endpoint unavailable");
            return Err(BotError::ServerUnavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(BotError::Transport)?;

        serde_json::from_str(&body).map_err(|e| {
            error!(error = %e, "Status API returned malformed JSON");
            BotError::InvalidJson(e)
        })
    }
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_token() {
        let client = PracticumClient::new("http://localhost/api", "very-secret");
        let rendered = format!("{client:?}");
        assert!(rendered.contains("http://localhost/api"));
        assert!(!rendered.contains("very-secret"));
    }
}
