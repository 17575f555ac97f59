//! Chat notifications for the homework status bot.
//!
//! Delivery is best-effort: a failed send is logged and reported back to the
//! caller as `false`, it never propagates as an error.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use notify::{Notifier, TelegramChannel};
//!
//! # async fn example() {
//! let channel = TelegramChannel::new("123456:bot-token", "42");
//! let notifier = Notifier::with_channels(vec![Arc::new(channel)]);
//!
//! let delivered = notifier.notify("Homework status changed").await;
//! # let _ = delivered;
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`NotifyChannel`] trait defines the interface for notification channels
//! - [`TelegramChannel`] implements Telegram Bot API delivery
//! - [`Notifier`] dispatches a message to every enabled channel in turn

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod channels;
pub mod error;

pub use channels::telegram::TelegramChannel;
pub use channels::NotifyChannel;
pub use error::ChannelError;

use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Central notification dispatcher.
pub struct Notifier {
    channels: Vec<Arc<dyn NotifyChannel>>,
}

impl Notifier {
    /// Create a notifier with specific channels.
    #[must_use]
    pub fn with_channels(channels: Vec<Arc<dyn NotifyChannel>>) -> Self {
        Self { channels }
    }

    /// Send a message to every enabled channel and wait for the results.
    ///
    /// Returns `true` only if at least one channel was attempted and every
    /// attempted channel accepted the message. Failures are logged and swallowed.
    pub async fn notify(&self, text: &str) -> bool {
        let mut attempted = false;
        let mut failed = false;

        for channel in &self.channels {
            let channel_name = channel.name();

            if !channel.enabled() {
                debug!(channel = channel_name, "Channel disabled, skipping");
                continue;
            }

            attempted = true;
            match channel.send(text).await {
                Ok(()) => {
                    info!(channel = channel_name, "Message sent");
                }
                Err(e) => {
                    error!(
                        channel = channel_name,
                        error = %e,
                        "Failed to send message"
                    );
                    failed = true;
                }
            }
        }

        if !attempted {
            warn!("No enabled notification channels, message dropped");
        }

        attempted && !failed
    }
}
