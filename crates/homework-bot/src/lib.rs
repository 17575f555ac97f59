//! Homework status bot.
//!
//! Polls the Practicum homework status API on a fixed interval and reports
//! review verdict changes to a single Telegram chat.
//!
//! Each cycle runs a short pipeline:
//!
//! 1. [`api::PracticumClient::get_api_answer`] fetches statuses since the cursor
//! 2. [`response::check_response`] validates the envelope
//! 3. [`homework::parse_status`] turns the newest record into a chat message
//! 4. [`poller::Poller`] suppresses repeats and hands new messages to [`notify::Notifier`]
//!
//! Failures from any stage come back as [`BotError`] and are reported to the
//! chat under the same repeat suppression.

pub mod api;
pub mod config;
pub mod error;
pub mod homework;
pub mod logging;
pub mod poller;
pub mod response;
pub mod state;

pub use api::PracticumClient;
pub use config::{Credentials, Settings};
pub use error::{BotError, ConfigError};
pub use homework::Verdict;
pub use poller::{CycleOutcome, Poller};
pub use state::DedupState;
