//! # rsspush
//!
//! Pulls a list of RSS/Atom feeds once, keeps the entries published in the
//! last few full hours, and pushes them to a Telegram channel.
//!
//! ## Architecture
//!
//! ```text
//! subscriptions → producer → work queue → worker pool → delivery queue → delivery stage → Telegram
//! ```
//!
//! - [`config`]: subscription document (`rss.json`)
//! - [`fetcher`]: HTTP download, window filtering and the worker pool
//! - [`normalizer`]: RSS/Atom parsing into [`FeedItem`](domain::FeedItem)s
//! - [`delivery`]: serialized, paced sending with a heartbeat fallback
//! - [`notifier`]: Telegram Bot API client
//! - [`pipeline`]: wires the stages together for one run
//!
//! ## Quick Start
//!
//! ```bash
//! # Push entries from the last 3 hours
//! rsspush --tg-bot "$BOT_TOKEN" --tg-channel -1001234567890
//!
//! # See what would be sent, without sending
//! rsspush --tg-bot "$BOT_TOKEN" --tg-channel -1001234567890 --debug
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct builds the fetcher, notifier
/// and pipeline once, before any task runs.
pub mod app;

/// Command-line interface using clap.
pub mod cli;

/// Subscription document loading.
pub mod config;

/// Serialized delivery with pacing and heartbeat.
pub mod delivery;

/// Core domain models.
///
/// - [`Subscription`](domain::Subscription): one configured feed
/// - [`FeedItem`](domain::FeedItem): a normalized feed entry
/// - [`TimeWindow`](domain::TimeWindow): the hour-aligned look-back range
pub mod domain;

/// Feed downloading.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for raw downloads
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`FeedFetcher`](fetcher::FeedFetcher): download, parse and window filtering
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): fixed-size worker pool
pub mod fetcher;

/// Feed parsing and normalization.
///
/// Converts RSS 0.9x/1.0/2.0, Atom 0.3/1.0, and JSON Feed 1.0
/// into [`FeedItem`](domain::FeedItem)s.
pub mod normalizer;

/// Outbound messaging through the Telegram Bot API.
pub mod notifier;

/// Producer and run orchestration.
pub mod pipeline;

#[cfg(test)]
mod test_helpers;
