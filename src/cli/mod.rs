pub mod commands;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::{Result, RsspushError};
use crate::fetcher::parallel::{DEFAULT_LOOKBACK_HOURS, DEFAULT_WORKERS};
use crate::notifier::telegram::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(name = "rsspush")]
#[command(about = "Push recent RSS/Atom entries to a Telegram channel", long_about = None)]
pub struct Cli {
    /// Telegram bot token
    #[arg(long = "tg-bot", default_value = "")]
    pub tg_bot: String,

    /// Telegram channel id
    #[arg(long = "tg-channel", default_value_t = 0, allow_negative_numbers = true)]
    pub tg_channel: i64,

    /// Deliver entries from this many full hours back
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_HOURS, allow_negative_numbers = true)]
    pub startby: i32,

    /// Subscription file (JSON, or TOML with a .toml extension)
    #[arg(long = "rss-filepath", default_value = "rss.json")]
    pub rss_filepath: PathBuf,

    /// Log items instead of sending them, with debug logging
    #[arg(long)]
    pub debug: bool,

    /// Number of parallel workers for fetching feeds
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-feed download timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub fetch_timeout: u64,

    /// Per-message send timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub send_timeout: u64,

    /// Telegram Bot API base URL
    #[arg(long = "tg-api-url", default_value = DEFAULT_API_URL)]
    pub tg_api_url: String,
}

/// Validated process parameters.
#[derive(Clone)]
pub struct Settings {
    pub bot_token: String,
    pub channel_id: i64,
    pub lookback_hours: i32,
    pub subscriptions_path: PathBuf,
    pub dry_run: bool,
    pub workers: usize,
    pub fetch_timeout: Duration,
    pub send_timeout: Duration,
    pub api_url: String,
}

impl Cli {
    /// Check required values. The token and channel are required even in
    /// dry-run mode.
    pub fn settings(&self) -> Result<Settings> {
        let bot_token = self.tg_bot.trim();
        if bot_token.is_empty() || self.tg_channel == 0 {
            return Err(RsspushError::Config(
                "--tg-bot and --tg-channel cannot be empty".into(),
            ));
        }
        if self.workers == 0 {
            return Err(RsspushError::Config("--workers must be at least 1".into()));
        }
        if self.fetch_timeout == 0 || self.send_timeout == 0 {
            return Err(RsspushError::Config("timeouts must be at least 1 second".into()));
        }
        url::Url::parse(&self.tg_api_url)?;

        Ok(Settings {
            bot_token: bot_token.to_string(),
            channel_id: self.tg_channel,
            lookback_hours: self.startby,
            subscriptions_path: self.rss_filepath.clone(),
            dry_run: self.debug,
            workers: self.workers,
            fetch_timeout: Duration::from_secs(self.fetch_timeout),
            send_timeout: Duration::from_secs(self.send_timeout),
            api_url: self.tg_api_url.clone(),
        })
    }
}
