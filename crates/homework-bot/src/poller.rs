//! The poll loop: fetch → validate → extract → deduplicate and notify → sleep.

use std::time::Duration;

use chrono::DateTime;
use notify::Notifier;
use tracing::{debug, error, info, instrument, warn};

use crate::api::PracticumClient;
use crate::config::Settings;
use crate::error::BotError;
use crate::homework::parse_status;
use crate::response::{check_response, next_cursor};
use crate::state::DedupState;

/// Prefix of the chat message sent when a cycle fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// What a single poll cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered
    Notified,
    /// The status message equals the last delivered one
    Duplicate,
    /// The response carried no homework records
    NoNewStatus,
    /// A new status message was produced but the chat did not accept it
    DeliveryFailed,
    /// The pipeline failed; `reported` is true if the failure reached the chat
    Failed { message: String, reported: bool },
}

impl CycleOutcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Render a pipeline error as the chat failure message.
pub fn failure_message(error: &BotError) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}

/// Drives poll cycles against one status endpoint and one chat.
pub struct Poller {
    client: PracticumClient,
    notifier: Notifier,
    state: DedupState,
    cursor: i64,
    retry_interval: Duration,
}

impl Poller {
    #[must_use]
    pub fn new(client: PracticumClient, notifier: Notifier, settings: &Settings) -> Self {
        Self {
            client,
            notifier,
            state: DedupState::new(),
            cursor: settings.from_date,
            retry_interval: settings.retry_interval,
        }
    }

    /// Current `from_date` cursor.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn state(&self) -> &DedupState {
        &self.state
    }

    /// Run cycles forever, sleeping the same interval after every outcome.
    pub async fn run(&mut self) {
        info!(
            endpoint = %self.client.endpoint(),
            interval_secs = self.retry_interval.as_secs(),
            "Starting homework status polling"
        );

        loop {
            let outcome = self.run_cycle().await;
            debug!(?outcome, "Poll cycle finished");
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Run one cycle and report what happened.
    ///
    /// The cursor moves only once the status has been handled, so a message
    /// that failed to deliver is fetched again on the next cycle.
    #[instrument(name = "poll_cycle", skip(self), fields(cursor = self.cursor))]
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let (message, cursor) = match self.check_homework().await {
            Ok(checked) => checked,
            Err(error) => return self.report_failure(&error).await,
        };

        let outcome = match message {
            Some(message) => self.deliver_status(message).await,
            None => {
                info!("No new homework status");
                CycleOutcome::NoNewStatus
            }
        };

        if outcome != CycleOutcome::DeliveryFailed {
            self.advance_cursor(cursor);
        }

        outcome
    }

    /// Fetch, validate and extract. Returns the status message, if any, and
    /// the cursor to use once it has been handled.
    async fn check_homework(&self) -> Result<(Option<String>, i64), BotError> {
        let response = self.client.get_api_answer(self.cursor).await?;
        let homeworks = check_response(&response)?;

        let message = match homeworks.first() {
            Some(homework) => Some(parse_status(homework)?),
            None => None,
        };

        Ok((message, next_cursor(&response, self.cursor)))
    }

    fn advance_cursor(&mut self, cursor: i64) {
        if cursor != self.cursor {
            debug!(
                from = self.cursor,
                to = cursor,
                at = %format_cursor(cursor),
                "Advancing cursor"
            );
            self.cursor = cursor;
        }
    }

    async fn deliver_status(&mut self, message: String) -> CycleOutcome {
        if !self.state.is_new_message(&message) {
            debug!("Status unchanged since last notification");
            return CycleOutcome::Duplicate;
        }

        info!("Sending status notification");
        if self.notifier.notify(&message).await {
            self.state.record_message(message);
            CycleOutcome::Notified
        } else {
            warn!("Status notification not delivered, will retry next cycle");
            CycleOutcome::DeliveryFailed
        }
    }

    async fn report_failure(&mut self, error: &BotError) -> CycleOutcome {
        let message = failure_message(error);
        error!(kind = error.kind(), error = %error, "Poll cycle failed");

        if !self.state.is_new_error(&message) {
            info!("Failure already reported, not notifying again");
            return CycleOutcome::Failed {
                message,
                reported: false,
            };
        }

        let reported = self.notifier.notify(&message).await;
        if reported {
            self.state.record_error(message.clone());
        }

        CycleOutcome::Failed { message, reported }
    }
}

fn format_cursor(cursor: i64) -> String {
    DateTime::from_timestamp(cursor, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| cursor.to_string())
}
