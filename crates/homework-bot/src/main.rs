//! homework-bot - report Practicum homework review verdicts to Telegram.
//!
//! # Environment Variables
//!
//! - `PRACTICUM_TOKEN` - Practicum API OAuth token (required)
//! - `TELEGRAM_TOKEN` - Telegram bot token (required)
//! - `TELEGRAM_CHAT_ID` - chat that receives the notifications (required)
//!
//! A `.env` file in the working directory is loaded first; variables already
//! set in the environment win.
//!
//! # Examples
//!
//! ```bash
//! # Poll every 10 minutes, forever
//! homework-bot
//!
//! # Single cycle with debug logs, e.g. from cron
//! homework-bot --once --verbose
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use homework_bot::config::{DEFAULT_ENDPOINT, DEFAULT_RETRY_SECS};
use homework_bot::logging::{self, LogFormat};
use homework_bot::{Credentials, PracticumClient, Poller, Settings};
use notify::channels::telegram::DEFAULT_API_BASE;
use notify::{Notifier, TelegramChannel};
use tracing::{error, info};

/// Report Practicum homework review verdicts to a Telegram chat.
#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Poll Practicum homework statuses and notify a Telegram chat")]
#[command(version)]
struct Cli {
    /// Homework status API endpoint
    #[arg(long, env = "PRACTICUM_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_API_BASE)]
    telegram_api_url: String,

    /// Seconds to sleep between poll cycles
    #[arg(long, env = "RETRY_TIME", default_value_t = DEFAULT_RETRY_SECS)]
    interval: u64,

    /// Initial from_date cursor (unix seconds)
    #[arg(long, default_value_t = 0)]
    from_date: i64,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log output format
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t)]
    log_format: LogFormat,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            endpoint: self.endpoint.clone(),
            telegram_api_url: self.telegram_api_url.clone(),
            retry_interval: Duration::from_secs(self.interval),
            from_date: self.from_date,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so clap's env fallbacks see it.
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.log_format, cli.verbose)?;

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded environment file");
    }

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            for name in e.missing() {
                error!(variable = name, "Required environment variable is not set");
            }
            error!(error = %e, "Missing required credentials, exiting");
            std::process::exit(1);
        }
    };
    info!("Credentials loaded");

    let settings = cli.settings();

    let client = PracticumClient::new(&settings.endpoint, &credentials.practicum_token);
    let channel = TelegramChannel::new(
        &credentials.telegram_token,
        &credentials.telegram_chat_id,
    )
    .with_api_base(&settings.telegram_api_url);
    let notifier = Notifier::with_channels(vec![Arc::new(channel)]);

    let mut poller = Poller::new(client, notifier, &settings);

    if cli.once {
        let outcome = poller.run_cycle().await;
        info!(?outcome, cursor = poller.cursor(), "Single poll cycle finished");
        if outcome.is_failure() {
            std::process::exit(1);
        }
        return Ok(());
    }

    poller.run().await;
    Ok(())
}
